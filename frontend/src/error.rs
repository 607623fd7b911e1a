use crate::parser::lexer::{Token, TokenType};
use thiserror::Error;

/// The parser stops at the first grammar violation and reports it here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected token {found}: expected {expected}")]
    UnexpectedToken { expected: TokenType, found: Token },
}

impl ParseError {
    pub fn expected(&self) -> TokenType {
        match self {
            ParseError::UnexpectedToken { expected, .. } => *expected,
        }
    }

    /// The offending token.
    pub fn token(&self) -> &Token {
        match self {
            ParseError::UnexpectedToken { found, .. } => found,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_names_both_tokens() {
        let error = ParseError::UnexpectedToken {
            expected: TokenType::RightParen,
            found: Token::new(TokenType::Facts, "Facts", 3),
        };
        assert_eq!(
            error.to_string(),
            "unexpected token (FACTS,\"Facts\",3): expected RIGHT_PAREN"
        );
        assert_eq!(error.expected(), TokenType::RightParen);
        assert_eq!(error.token().line, 3);
    }
}

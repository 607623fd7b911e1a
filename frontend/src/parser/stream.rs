/// Single-token lookahead over a token iterator
///
/// The upstream iterator may be logically unbounded. When it does run dry the
/// last token is kept as the current one, so reading past the end is an
/// ordinary state rather than an error.
use super::lexer::{Token, TokenType};
use crate::error::{ParseError, ParseResult};

pub struct TokenStream<I> {
    tokens: I,
    current: Token,
}

impl<I: Iterator<Item = Token>> TokenStream<I> {
    pub fn new(mut tokens: I) -> Self {
        let current = tokens.next().unwrap_or_else(|| Token::eof(1));
        TokenStream { tokens, current }
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Literal text of the current token.
    pub fn value(&self) -> &str {
        &self.current.value
    }

    pub fn check(&self, kind: TokenType) -> bool {
        self.current.kind == kind
    }

    pub fn is_one_of(&self, kinds: &[TokenType]) -> bool {
        kinds.contains(&self.current.kind)
    }

    /// Fail unless the current token is `kind`. Does not advance.
    pub fn expect(&self, kind: TokenType) -> ParseResult<()> {
        if self.check(kind) {
            Ok(())
        } else {
            Err(self.unexpected(kind))
        }
    }

    pub fn advance(&mut self) {
        if let Some(next) = self.tokens.next() {
            self.current = next;
        }
    }

    /// Match `kind`, returning the matched token and moving past it.
    pub fn consume(&mut self, kind: TokenType) -> ParseResult<Token> {
        self.expect(kind)?;
        let token = self.current.clone();
        self.advance();
        Ok(token)
    }

    pub fn unexpected(&self, expected: TokenType) -> ParseError {
        ParseError::UnexpectedToken {
            expected,
            found: self.current.clone(),
        }
    }
}

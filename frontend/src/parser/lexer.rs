/// Lexer for Datalog source using logos
///
/// Converts source text into the token sequence consumed by the parser.
use crate::ast::Span;
use logos::{FilterResult, Logos};
use std::fmt;

/// Token types of the Datalog grammar.
///
/// `Undefined` and `Eof` are never produced by logos directly; the [`Lexer`]
/// emits them for unrecognised input and for the end of the source.
/// `Comment` is never emitted: block comments are skipped, or reported as
/// `Undefined` when they are not closed.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#([^|\n][^\n]*)?")]
pub enum TokenType {
    #[token("#|", block_comment)]
    Comment,

    // Keywords
    #[token("Schemes")]
    Schemes,

    #[token("Facts")]
    Facts,

    #[token("Rules")]
    Rules,

    #[token("Queries")]
    Queries,

    // Literals
    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    Id,

    #[regex(r"'([^']|'')*'")]
    String,

    // Punctuation
    #[token(":-")]
    ColonDash,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    #[token(".")]
    Period,

    #[token("?")]
    Question,

    #[token("(")]
    LeftParen,

    #[token(")")]
    RightParen,

    Undefined,

    Eof,
}

impl TokenType {
    pub fn name(self) -> &'static str {
        match self {
            TokenType::Schemes => "SCHEMES",
            TokenType::Facts => "FACTS",
            TokenType::Rules => "RULES",
            TokenType::Queries => "QUERIES",
            TokenType::Id => "ID",
            TokenType::String => "STRING",
            TokenType::ColonDash => "COLON_DASH",
            TokenType::Colon => "COLON",
            TokenType::Comma => "COMMA",
            TokenType::Period => "PERIOD",
            TokenType::Question => "QUESTION",
            TokenType::LeftParen => "LEFT_PAREN",
            TokenType::RightParen => "RIGHT_PAREN",
            TokenType::Comment => "COMMENT",
            TokenType::Undefined => "UNDEFINED",
            TokenType::Eof => "EOF",
        }
    }
}

/// Skip a `#| ... |#` block comment, consuming the rest of the input when
/// the closing `|#` is missing.
fn block_comment(lex: &mut logos::Lexer<TokenType>) -> FilterResult<(), ()> {
    match lex.remainder().find("|#") {
        Some(end) => {
            lex.bump(end + 2);
            FilterResult::Skip
        }
        None => {
            lex.bump(lex.remainder().len());
            FilterResult::Error(())
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its literal text and source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub value: String,
    pub line: usize,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenType, value: impl Into<String>, line: usize) -> Self {
        Token {
            kind,
            value: value.into(),
            line,
            span: Span { start: 0, end: 0 },
        }
    }

    pub fn eof(line: usize) -> Self {
        Token::new(TokenType::Eof, "", line)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},\"{}\",{})", self.kind, self.value, self.line)
    }
}

/// Token iterator over a source string.
///
/// Never returns `None`: once the source is exhausted every call yields the
/// same `EOF` token.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenType>,
    source: &'src str,
    line: usize,
    scanned: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            inner: TokenType::lexer(source),
            source,
            line: 1,
            scanned: 0,
        }
    }

    /// Advance the line counter up to byte offset `to`.
    fn track_lines(&mut self, to: usize) {
        self.line += self.source[self.scanned..to].matches('\n').count();
        self.scanned = to;
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let Some(result) = self.inner.next() else {
            self.track_lines(self.source.len());
            let end = self.source.len();
            return Some(Token::eof(self.line).with_span(Span { start: end, end }));
        };

        let range = self.inner.span();
        self.track_lines(range.start);
        let line = self.line;
        let slice = self.inner.slice();
        let span = Span {
            start: range.start,
            end: range.end,
        };

        let token = match result {
            Ok(TokenType::String) => {
                Token::new(TokenType::String, &slice[1..slice.len() - 1], line)
            }
            Ok(kind) => Token::new(kind, slice, line),
            Err(()) => Token::new(TokenType::Undefined, slice, line),
        };

        Some(token.with_span(span))
    }
}

/// Lex `source` into a finite token list ending with a single `EOF`.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    for token in Lexer::new(source) {
        let done = token.kind == TokenType::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}

/// Parser for Datalog source code
///
/// Uses logos for lexing and a hand-written predictive parser over a
/// single-token lookahead [`TokenStream`].
use crate::ast::DatalogProgram;
use crate::error::ParseResult;

pub mod grammar;
pub mod lexer;
pub mod stream;

pub use lexer::{tokenize, Lexer, Token, TokenType};
pub use stream::TokenStream;

/// Parse a program from any token source.
///
/// The source may be unbounded; parsing stops at the `EOF` that closes the
/// query section or at the first unexpected token.
pub fn parse<I>(tokens: I) -> ParseResult<DatalogProgram>
where
    I: IntoIterator<Item = Token>,
{
    let mut stream = TokenStream::new(tokens.into_iter());
    grammar::program(&mut stream)
}

/// Lex and parse a Datalog source string
pub fn parse_source(source: &str) -> ParseResult<DatalogProgram> {
    parse(Lexer::new(source))
}

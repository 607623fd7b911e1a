//! Datalog front end
//!
//! Turns Datalog source into a [`DatalogProgram`] of schemes, facts, rules and
//! queries, and renders it back to canonical text through a
//! [`listener::Walker`].

pub mod ast;
pub mod check;
pub mod diagnostic;
pub mod error;
pub mod listener;
pub mod parser;

pub use ast::{DatalogProgram, Parameter, ParameterKind, Predicate, Rule};
pub use check::{CheckError, Checker};
pub use error::{ParseError, ParseResult};
pub use listener::{Listener, PrintListener, Section, Walker};
pub use parser::{parse, parse_source, Token, TokenType};

/// Parse `source` and render the result.
///
/// Success is `"Success!\n"` followed by the program rendering; failure is
/// `"Failure!\n  "` followed by the offending token.
pub fn report(source: &str) -> String {
    outcome(&parse_source(source))
}

/// Render a parse result as `report` does.
pub fn outcome(result: &ParseResult<DatalogProgram>) -> String {
    match result {
        Ok(program) => format!("Success!\n{}", program),
        Err(error) => format!("Failure!\n  {}", error.token()),
    }
}

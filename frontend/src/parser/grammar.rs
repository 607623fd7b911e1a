/// Grammar productions for Datalog
///
/// One function per non-terminal, each choosing its alternative from the
/// current token alone:
///
/// ```text
/// program       -> SCHEMES COLON scheme schemeList
///                  FACTS COLON fact factList
///                  RULES COLON ruleList
///                  QUERIES COLON query queryList EOF
/// scheme        -> predicate
/// fact          -> predicate PERIOD
/// rule          -> predicate COLON_DASH predicate predicateList PERIOD
/// query         -> predicate QUESTION
/// predicate     -> ID LEFT_PAREN parameter parameterList RIGHT_PAREN
/// predicateList -> COMMA predicate predicateList | ε
/// parameterList -> COMMA parameter parameterList | ε
/// parameter     -> ID | STRING
/// ```
use super::lexer::{Token, TokenType};
use super::stream::TokenStream;
use crate::ast::*;
use crate::error::ParseResult;
use tracing::debug;

const PREDICATE_FIRST: &[TokenType] = &[TokenType::Id];
const LIST_TAIL_FIRST: &[TokenType] = &[TokenType::Comma];

const SCHEME_LIST_FOLLOW: &[TokenType] = &[TokenType::Facts];
const FACT_LIST_FOLLOW: &[TokenType] = &[TokenType::Rules];
const RULE_LIST_FOLLOW: &[TokenType] = &[TokenType::Queries];
const QUERY_LIST_FOLLOW: &[TokenType] = &[TokenType::Eof];
const PARAMETER_LIST_FOLLOW: &[TokenType] = &[TokenType::RightParen];
const PREDICATE_LIST_FOLLOW: &[TokenType] = &[TokenType::Period];

/// Parse a complete program
pub fn program<I>(stream: &mut TokenStream<I>) -> ParseResult<DatalogProgram>
where
    I: Iterator<Item = Token>,
{
    let mut program = DatalogProgram::new();

    section_header(stream, TokenType::Schemes)?;
    program.add_scheme(scheme(stream)?);
    for item in list(stream, PREDICATE_FIRST, SCHEME_LIST_FOLLOW, scheme)? {
        program.add_scheme(item);
    }
    debug!(count = program.schemes().len(), "parsed schemes");

    section_header(stream, TokenType::Facts)?;
    program.add_fact(fact(stream)?);
    for item in list(stream, PREDICATE_FIRST, FACT_LIST_FOLLOW, fact)? {
        program.add_fact(item);
    }
    debug!(count = program.facts().len(), "parsed facts");

    section_header(stream, TokenType::Rules)?;
    for item in list(stream, PREDICATE_FIRST, RULE_LIST_FOLLOW, rule)? {
        program.add_rule(item);
    }
    debug!(count = program.rules().len(), "parsed rules");

    section_header(stream, TokenType::Queries)?;
    program.add_query(query(stream)?);
    for item in list(stream, PREDICATE_FIRST, QUERY_LIST_FOLLOW, query)? {
        program.add_query(item);
    }
    debug!(count = program.queries().len(), "parsed queries");

    stream.consume(TokenType::Eof)?;
    Ok(program)
}

fn section_header<I>(stream: &mut TokenStream<I>, keyword: TokenType) -> ParseResult<()>
where
    I: Iterator<Item = Token>,
{
    stream.consume(keyword)?;
    stream.consume(TokenType::Colon)?;
    Ok(())
}

/// Zero or more `element`s, decided one token at a time.
///
/// An element starts whenever the current token is in `first`; the list ends
/// on a token in `follow`. Anything else is reported against `follow[0]`,
/// which is the token the enclosing production needs next.
fn list<I, T>(
    stream: &mut TokenStream<I>,
    first: &[TokenType],
    follow: &[TokenType],
    mut element: impl FnMut(&mut TokenStream<I>) -> ParseResult<T>,
) -> ParseResult<Vec<T>>
where
    I: Iterator<Item = Token>,
{
    let mut items = Vec::new();
    loop {
        if stream.is_one_of(first) {
            items.push(element(stream)?);
        } else if stream.is_one_of(follow) {
            return Ok(items);
        } else {
            return Err(stream.unexpected(follow[0]));
        }
    }
}

/// Scheme: `student(N,I,A,M)`
///
/// Parameter kinds are not restricted here; see [`crate::check`].
pub fn scheme<I>(stream: &mut TokenStream<I>) -> ParseResult<Predicate>
where
    I: Iterator<Item = Token>,
{
    predicate(stream)
}

/// Fact: `student('Reagan','52','11 Maple','Econ').`
pub fn fact<I>(stream: &mut TokenStream<I>) -> ParseResult<Predicate>
where
    I: Iterator<Item = Token>,
{
    let fact = predicate(stream)?;
    stream.consume(TokenType::Period)?;
    Ok(fact)
}

/// Rule: `WhoMajor(N,M) :- student(N,I,A,M),instructor(M,A,Y).`
pub fn rule<I>(stream: &mut TokenStream<I>) -> ParseResult<Rule>
where
    I: Iterator<Item = Token>,
{
    let head = predicate(stream)?;
    stream.consume(TokenType::ColonDash)?;

    let mut body = vec![predicate(stream)?];
    body.extend(list(
        stream,
        LIST_TAIL_FIRST,
        PREDICATE_LIST_FOLLOW,
        |stream| {
            stream.consume(TokenType::Comma)?;
            predicate(stream)
        },
    )?);
    stream.consume(TokenType::Period)?;

    Ok(Rule::new(head, body))
}

/// Query: `WhoMajor('Roosevelt',N)?`
pub fn query<I>(stream: &mut TokenStream<I>) -> ParseResult<Predicate>
where
    I: Iterator<Item = Token>,
{
    let query = predicate(stream)?;
    stream.consume(TokenType::Question)?;
    Ok(query)
}

/// Predicate: `name(p1,p2,...)` with at least one parameter
pub fn predicate<I>(stream: &mut TokenStream<I>) -> ParseResult<Predicate>
where
    I: Iterator<Item = Token>,
{
    let name = stream.consume(TokenType::Id)?.value;
    stream.consume(TokenType::LeftParen)?;

    let mut parameters = vec![parameter(stream)?];
    parameters.extend(list(
        stream,
        LIST_TAIL_FIRST,
        PARAMETER_LIST_FOLLOW,
        |stream| {
            stream.consume(TokenType::Comma)?;
            parameter(stream)
        },
    )?);
    stream.consume(TokenType::RightParen)?;

    Ok(Predicate::new(name, parameters))
}

/// Parameter: an identifier or a quoted string
pub fn parameter<I>(stream: &mut TokenStream<I>) -> ParseResult<Parameter>
where
    I: Iterator<Item = Token>,
{
    if stream.check(TokenType::String) {
        let token = stream.consume(TokenType::String)?;
        Ok(Parameter::string(token.value))
    } else {
        let token = stream.consume(TokenType::Id)?;
        Ok(Parameter::id(token.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::parser::lexer::Lexer;

    fn stream(source: &str) -> TokenStream<Lexer<'_>> {
        TokenStream::new(Lexer::new(source))
    }

    #[test]
    fn test_parse_parameter() {
        assert_eq!(parameter(&mut stream("X")).unwrap(), Parameter::id("X"));
        assert_eq!(
            parameter(&mut stream("'hello world'")).unwrap(),
            Parameter::string("hello world")
        );
    }

    #[test]
    fn test_parse_parameter_rejects_punctuation() {
        let error = parameter(&mut stream(")")).unwrap_err();
        assert_eq!(error.expected(), TokenType::Id);
        assert_eq!(error.token().kind, TokenType::RightParen);
    }

    #[test]
    fn test_parse_predicate() {
        let mut tokens = stream("student(N,'51',A) rest");
        let predicate = predicate(&mut tokens).unwrap();
        assert_eq!(predicate.name(), "student");
        assert_eq!(
            predicate.parameters(),
            &[
                Parameter::id("N"),
                Parameter::string("51"),
                Parameter::id("A")
            ]
        );
        assert_eq!(tokens.value(), "rest");
    }

    #[test]
    fn test_missing_right_paren() {
        let mut tokens = stream("a(A,B Facts");
        let error = predicate(&mut tokens).unwrap_err();
        assert_eq!(
            error,
            ParseError::UnexpectedToken {
                expected: TokenType::RightParen,
                found: Token::new(TokenType::Facts, "Facts", 1)
                    .with_span(Span { start: 6, end: 11 }),
            }
        );
        assert!(tokens.check(TokenType::Facts));
    }

    #[test]
    fn test_parse_fact_and_query() {
        let fact = fact(&mut stream("snap('12345','C. Brown').")).unwrap();
        assert_eq!(fact.to_string(), "snap(12345,C. Brown)");

        let query = query(&mut stream("snap(Id,'C. Brown')?")).unwrap();
        assert_eq!(query.to_string(), "snap(Id,C. Brown)");

        let error = super::fact(&mut stream("snap('1')?")).unwrap_err();
        assert_eq!(error.expected(), TokenType::Period);
    }

    #[test]
    fn test_parse_rule() {
        let rule = rule(&mut stream("a(X,Y) :- b(X,Z),c(Z,Y),d(Y).")).unwrap();
        assert_eq!(rule.head().name(), "a");
        assert_eq!(rule.body().len(), 3);
        assert_eq!(rule.to_string(), "a(X,Y) :- b(X,Z),c(Z,Y),d(Y)");
    }

    #[test]
    fn test_rule_body_missing_separator() {
        let error = rule(&mut stream("a(X) :- b(X) c(X).")).unwrap_err();
        assert_eq!(error.expected(), TokenType::Period);
        assert_eq!(error.token().value, "c");
    }

    #[test]
    fn test_scheme_accepts_string_parameters() {
        let scheme = scheme(&mut stream("a('x',B)")).unwrap();
        assert!(scheme.parameters()[0].is_string());
    }

    #[test]
    fn test_long_lists_are_iterative() {
        let parameters: Vec<String> = (0..50_000).map(|i| format!("X{i}")).collect();
        let source = format!("big({})", parameters.join(","));
        let predicate = predicate(&mut stream(&source)).unwrap();
        assert_eq!(predicate.arity(), 50_000);
    }
}

/// Program representation for Datalog
///
/// Schemes, facts, rule heads and bodies, and queries are all [`Predicate`]s;
/// what differs between them is which [`Parameter`] kinds are meaningful.
use crate::listener::{PrintListener, Walker};
use std::collections::BTreeSet;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// Names a relation column or a variable
    Id,
    /// Literal constant, stored without its quotes
    String,
}

/// A single predicate argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    kind: ParameterKind,
    value: String,
}

impl Parameter {
    pub fn new(kind: ParameterKind, value: impl Into<String>) -> Self {
        Parameter {
            kind,
            value: value.into(),
        }
    }

    pub fn id(name: impl Into<String>) -> Self {
        Parameter::new(ParameterKind::Id, name)
    }

    pub fn string(literal: impl Into<String>) -> Self {
        Parameter::new(ParameterKind::String, literal)
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_id(&self) -> bool {
        self.kind == ParameterKind::Id
    }

    pub fn is_string(&self) -> bool {
        self.kind == ParameterKind::String
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Relation name plus positional parameters: `student(N,I,A,M)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    name: String,
    parameters: Vec<Parameter>,
}

impl Predicate {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Predicate {
            name: name.into(),
            parameters,
        }
    }

    pub fn add_parameter(&mut self, parameter: Parameter) {
        self.parameters.push(parameter);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", parameter)?;
        }
        f.write_str(")")
    }
}

/// Rule: `WhoMajor(N,M) :- student(N,I,A,M),instructor(M,A,Y)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    head: Predicate,
    body: Vec<Predicate>,
}

impl Rule {
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub fn new(head: Predicate, body: Vec<Predicate>) -> Self {
        assert!(!body.is_empty(), "rule `{}` has an empty body", head);
        Rule { head, body }
    }

    pub fn head(&self) -> &Predicate {
        &self.head
    }

    pub fn body(&self) -> &[Predicate] {
        &self.body
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} :- ", self.head)?;
        for (i, predicate) in self.body.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", predicate)?;
        }
        Ok(())
    }
}

/// A complete Datalog program.
///
/// The four sections keep insertion order; nothing is deduplicated here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatalogProgram {
    schemes: Vec<Predicate>,
    facts: Vec<Predicate>,
    rules: Vec<Rule>,
    queries: Vec<Predicate>,
}

impl DatalogProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_scheme(&mut self, scheme: Predicate) {
        self.schemes.push(scheme);
    }

    pub fn add_fact(&mut self, fact: Predicate) {
        self.facts.push(fact);
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn add_query(&mut self, query: Predicate) {
        self.queries.push(query);
    }

    pub fn schemes(&self) -> &[Predicate] {
        &self.schemes
    }

    pub fn facts(&self) -> &[Predicate] {
        &self.facts
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn queries(&self) -> &[Predicate] {
        &self.queries
    }

    /// Distinct literal values appearing in facts, in lexicographic order.
    pub fn domain(&self) -> BTreeSet<String> {
        let mut printer = PrintListener::new();
        Walker::new(&mut printer).walk(self);
        printer.into_domain()
    }
}

impl fmt::Display for DatalogProgram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut printer = PrintListener::new();
        Walker::new(&mut printer).walk(self);
        f.write_str(printer.output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<Parameter> {
        names.iter().map(|n| Parameter::id(*n)).collect()
    }

    #[test]
    fn test_parameter_equality_is_structural() {
        assert_eq!(Parameter::id("x"), Parameter::id("x"));
        assert_ne!(Parameter::id("x"), Parameter::string("x"));
        assert!(Parameter::string("x").is_string());
        assert!(!Parameter::string("x").is_id());
    }

    #[test]
    fn test_predicate_display() {
        assert_eq!(Predicate::new("f", vec![]).to_string(), "f()");
        assert_eq!(Predicate::new("f", ids(&["g"])).to_string(), "f(g)");
        assert_eq!(
            Predicate::new("f", ids(&["g", "h", "i"])).to_string(),
            "f(g,h,i)"
        );

        let mixed = Predicate::new(
            "f",
            vec![
                Parameter::string("this is a string"),
                Parameter::id("i"),
                Parameter::string("C+ doh"),
            ],
        );
        assert_eq!(mixed.to_string(), "f(this is a string,i,C+ doh)");
    }

    #[test]
    fn test_add_parameter() {
        let mut predicate = Predicate::new("f", vec![]);
        predicate.add_parameter(Parameter::id("X"));
        predicate.add_parameter(Parameter::string("1"));
        assert_eq!(predicate.arity(), 2);
        assert_eq!(predicate.to_string(), "f(X,1)");
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule::new(
            Predicate::new("WhoMajor", ids(&["N", "M"])),
            vec![
                Predicate::new("student", ids(&["N", "I", "A", "M"])),
                Predicate::new("instructor", ids(&["M", "A", "Y"])),
            ],
        );
        assert_eq!(
            rule.to_string(),
            "WhoMajor(N,M) :- student(N,I,A,M),instructor(M,A,Y)"
        );
    }

    #[test]
    #[should_panic(expected = "empty body")]
    fn test_rule_requires_body() {
        Rule::new(Predicate::new("a", ids(&["X"])), vec![]);
    }

    #[test]
    fn test_programs_do_not_share_sections() {
        let mut first = DatalogProgram::new();
        first.add_scheme(Predicate::new("a", ids(&["A"])));
        let second = DatalogProgram::new();
        assert_eq!(first.schemes().len(), 1);
        assert!(second.schemes().is_empty());
    }

    #[test]
    fn test_domain_is_sorted_and_deduplicated() {
        let mut program = DatalogProgram::new();
        program.add_fact(Predicate::new("b", vec![Parameter::string("y")]));
        program.add_fact(Predicate::new("a", vec![Parameter::string("x")]));
        program.add_fact(Predicate::new("a", vec![Parameter::string("x")]));
        program.add_query(Predicate::new("q", vec![Parameter::string("z")]));
        let domain: Vec<_> = program.domain().into_iter().collect();
        assert_eq!(domain, vec!["x".to_string(), "y".to_string()]);
        assert!(program.to_string().ends_with("Domain(2):\n  x\n  y"));
    }
}

use super::{Listener, Section};
use crate::ast::{DatalogProgram, Predicate, Rule};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Renders a program to its canonical text and collects the fact domain.
///
/// ```text
/// Schemes(1):
///   a(A,B)
///
/// Facts(1):
///   a(1,2).
///
/// Rules(0):
///
/// Queries(1):
///   a(X,Y)?
///
/// Domain(2):
///   1
///   2
/// ```
#[derive(Debug, Default)]
pub struct PrintListener {
    output: String,
    domain: BTreeSet<String>,
}

impl PrintListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn domain(&self) -> &BTreeSet<String> {
        &self.domain
    }

    pub fn into_output(self) -> String {
        self.output
    }

    pub fn into_domain(self) -> BTreeSet<String> {
        self.domain
    }
}

impl Listener for PrintListener {
    fn exit_program(&mut self, _program: &DatalogProgram) {
        write!(self.output, "Domain({}):", self.domain.len()).unwrap();
        for value in &self.domain {
            write!(self.output, "\n  {}", value).unwrap();
        }
    }

    fn enter_section(&mut self, section: Section, len: usize) {
        writeln!(self.output, "{}({}):", section, len).unwrap();
    }

    fn exit_section(&mut self, _section: Section, _len: usize) {
        self.output.push('\n');
    }

    fn enter_scheme(&mut self, scheme: &Predicate) {
        writeln!(self.output, "  {}", scheme).unwrap();
    }

    fn enter_fact(&mut self, fact: &Predicate) {
        self.domain.extend(
            fact.parameters()
                .iter()
                .filter(|p| p.is_string())
                .map(|p| p.value().to_string()),
        );
        writeln!(self.output, "  {}.", fact).unwrap();
    }

    fn enter_rule(&mut self, rule: &Rule) {
        writeln!(self.output, "  {}.", rule).unwrap();
    }

    fn enter_query(&mut self, query: &Predicate) {
        writeln!(self.output, "  {}?", query).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Parameter;
    use crate::listener::Walker;
    use pretty_assertions::assert_eq;

    fn ids(names: &[&str]) -> Vec<Parameter> {
        names.iter().map(|n| Parameter::id(*n)).collect()
    }

    fn strings(values: &[&str]) -> Vec<Parameter> {
        values.iter().map(|v| Parameter::string(*v)).collect()
    }

    fn render(program: &DatalogProgram) -> String {
        let mut printer = PrintListener::new();
        Walker::new(&mut printer).walk(program);
        printer.into_output()
    }

    #[test]
    fn test_render_empty_program() {
        assert_eq!(
            render(&DatalogProgram::new()),
            "Schemes(0):\n\nFacts(0):\n\nRules(0):\n\nQueries(0):\n\nDomain(0):"
        );
    }

    #[test]
    fn test_render_full_program() {
        let mut program = DatalogProgram::new();
        program.add_scheme(Predicate::new("student", ids(&["N", "I", "A", "M"])));
        program.add_scheme(Predicate::new("WhoMajor", ids(&["N", "M"])));
        program.add_fact(Predicate::new(
            "student",
            strings(&["Roosevelt", "51", "10 Main", "Econ"]),
        ));
        program.add_fact(Predicate::new(
            "student",
            strings(&["Clinton", "54", "", "Lying"]),
        ));
        program.add_rule(Rule::new(
            Predicate::new("WhoMajor", ids(&["N", "M"])),
            vec![
                Predicate::new("student", ids(&["N", "I", "A", "M"])),
                Predicate::new("instructor", ids(&["M", "A", "Y"])),
            ],
        ));
        program.add_query(Predicate::new(
            "WhoMajor",
            vec![Parameter::string("Roosevelt"), Parameter::id("N")],
        ));

        let expected = concat!(
            "Schemes(2):\n",
            "  student(N,I,A,M)\n",
            "  WhoMajor(N,M)\n",
            "\n",
            "Facts(2):\n",
            "  student(Roosevelt,51,10 Main,Econ).\n",
            "  student(Clinton,54,,Lying).\n",
            "\n",
            "Rules(1):\n",
            "  WhoMajor(N,M) :- student(N,I,A,M),instructor(M,A,Y).\n",
            "\n",
            "Queries(1):\n",
            "  WhoMajor(Roosevelt,N)?\n",
            "\n",
            "Domain(8):\n",
            "  \n",
            "  10 Main\n",
            "  51\n",
            "  54\n",
            "  Clinton\n",
            "  Econ\n",
            "  Lying\n",
            "  Roosevelt",
        );
        assert_eq!(render(&program), expected);
    }

    #[test]
    fn test_domain_ignores_queries_and_rules() {
        let mut program = DatalogProgram::new();
        program.add_fact(Predicate::new("b", strings(&["x"])));
        program.add_fact(Predicate::new("a", strings(&["x"])));
        program.add_fact(Predicate::new("a", vec![Parameter::id("Y")]));
        program.add_query(Predicate::new("a", strings(&["q"])));

        let mut printer = PrintListener::new();
        Walker::new(&mut printer).walk(&program);
        let domain: Vec<_> = printer.domain().iter().cloned().collect();
        assert_eq!(domain, vec!["x".to_string()]);
        assert!(printer.output().ends_with("Domain(1):\n  x"));
    }
}

/// Semantic checks for parsed Datalog programs
///
/// The parser only enforces grammar shape. This pass enforces:
/// - Schemes declare each relation once, with `ID` columns only
/// - Facts are ground (`STRING` parameters only)
/// - Every fact, rule predicate and query names a declared relation with
///   matching arity
/// - Rule heads only use variables bound in the body
use crate::ast::*;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("relation {0} is declared more than once")]
    DuplicateScheme(String),

    #[error("scheme {scheme} column {position} is a literal; schemes take identifiers only")]
    LiteralInScheme { scheme: String, position: usize },

    #[error("fact {fact} argument {position} is a variable; facts must be ground")]
    VariableInFact { fact: String, position: usize },

    #[error("unknown relation {0}")]
    UnknownRelation(String),

    #[error("{predicate} has {found} arguments, relation {relation} expects {expected}")]
    ArityMismatch {
        predicate: String,
        relation: String,
        expected: usize,
        found: usize,
    },

    #[error("rule {rule} is unsafe: head variable {variable} does not appear in the body")]
    UnsafeRule { rule: String, variable: String },
}

pub type CheckResult<T> = Result<T, CheckError>;

/// Declared relations and their arities
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    relations: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, scheme: &Predicate) -> CheckResult<()> {
        if self.relations.contains_key(scheme.name()) {
            return Err(CheckError::DuplicateScheme(scheme.name().to_string()));
        }
        self.relations.insert(scheme.name().to_string(), scheme.arity());
        Ok(())
    }

    pub fn arity(&self, relation: &str) -> Option<usize> {
        self.relations.get(relation).copied()
    }
}

/// Semantic checker for Datalog programs
#[derive(Debug, Default)]
pub struct Checker {
    catalog: Catalog,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn check_program(&mut self, program: &DatalogProgram) -> CheckResult<()> {
        // First pass: relation declarations
        for scheme in program.schemes() {
            self.check_scheme(scheme)?;
            self.catalog.declare(scheme)?;
        }

        // Second pass: everything that refers to a relation
        for fact in program.facts() {
            self.check_fact(fact)?;
        }
        for rule in program.rules() {
            self.check_rule(rule)?;
        }
        for query in program.queries() {
            self.check_arity(query)?;
        }

        debug!(relations = self.catalog.relations.len(), "semantic check passed");
        Ok(())
    }

    fn check_scheme(&self, scheme: &Predicate) -> CheckResult<()> {
        match scheme.parameters().iter().position(Parameter::is_string) {
            Some(i) => Err(CheckError::LiteralInScheme {
                scheme: scheme.to_string(),
                position: i + 1,
            }),
            None => Ok(()),
        }
    }

    fn check_fact(&self, fact: &Predicate) -> CheckResult<()> {
        self.check_arity(fact)?;
        match fact.parameters().iter().position(Parameter::is_id) {
            Some(i) => Err(CheckError::VariableInFact {
                fact: fact.to_string(),
                position: i + 1,
            }),
            None => Ok(()),
        }
    }

    fn check_rule(&self, rule: &Rule) -> CheckResult<()> {
        self.check_arity(rule.head())?;
        for predicate in rule.body() {
            self.check_arity(predicate)?;
        }

        let bound: HashSet<&str> = rule
            .body()
            .iter()
            .flat_map(|p| p.parameters())
            .filter(|p| p.is_id())
            .map(|p| p.value())
            .collect();

        let unbound = rule
            .head()
            .parameters()
            .iter()
            .filter(|p| p.is_id())
            .find(|p| !bound.contains(p.value()));

        match unbound {
            Some(variable) => Err(CheckError::UnsafeRule {
                rule: rule.to_string(),
                variable: variable.value().to_string(),
            }),
            None => Ok(()),
        }
    }

    fn check_arity(&self, predicate: &Predicate) -> CheckResult<()> {
        let expected = self
            .catalog
            .arity(predicate.name())
            .ok_or_else(|| CheckError::UnknownRelation(predicate.name().to_string()))?;

        if predicate.arity() != expected {
            return Err(CheckError::ArityMismatch {
                predicate: predicate.to_string(),
                relation: predicate.name().to_string(),
                expected,
                found: predicate.arity(),
            });
        }
        Ok(())
    }
}

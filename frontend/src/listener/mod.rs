//! Traversal of a parsed [`DatalogProgram`].
//!
//! The [`Walker`] owns the visiting order and a [`Listener`] owns whatever is
//! computed along the way, so rendering today and evaluation later share one
//! traversal without touching the program types.

use crate::ast::{DatalogProgram, Predicate, Rule};
use std::fmt;

mod print;

pub use print::PrintListener;

/// The four program sections, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Schemes,
    Facts,
    Rules,
    Queries,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Schemes,
        Section::Facts,
        Section::Rules,
        Section::Queries,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Schemes => "Schemes",
            Section::Facts => "Facts",
            Section::Rules => "Rules",
            Section::Queries => "Queries",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Callbacks fired by the [`Walker`]. Every method defaults to a no-op.
pub trait Listener {
    fn enter_program(&mut self, _program: &DatalogProgram) {}
    fn exit_program(&mut self, _program: &DatalogProgram) {}

    /// Called before the first element of `section`, with its element count.
    fn enter_section(&mut self, _section: Section, _len: usize) {}
    fn exit_section(&mut self, _section: Section, _len: usize) {}

    fn enter_scheme(&mut self, _scheme: &Predicate) {}
    fn exit_scheme(&mut self, _scheme: &Predicate) {}

    fn enter_fact(&mut self, _fact: &Predicate) {}
    fn exit_fact(&mut self, _fact: &Predicate) {}

    fn enter_rule(&mut self, _rule: &Rule) {}
    fn exit_rule(&mut self, _rule: &Rule) {}

    fn enter_query(&mut self, _query: &Predicate) {}
    fn exit_query(&mut self, _query: &Predicate) {}
}

/// Drives a [`Listener`] over a program: program entry, then schemes, facts,
/// rules and queries in stored order, then program exit.
pub struct Walker<'l, L: Listener + ?Sized> {
    listener: &'l mut L,
}

impl<'l, L: Listener + ?Sized> Walker<'l, L> {
    pub fn new(listener: &'l mut L) -> Self {
        Walker { listener }
    }

    pub fn walk(&mut self, program: &DatalogProgram) {
        self.listener.enter_program(program);
        for section in Section::ALL {
            self.walk_section(section, program);
        }
        self.listener.exit_program(program);
    }

    fn walk_section(&mut self, section: Section, program: &DatalogProgram) {
        let len = match section {
            Section::Schemes => program.schemes().len(),
            Section::Facts => program.facts().len(),
            Section::Rules => program.rules().len(),
            Section::Queries => program.queries().len(),
        };

        self.listener.enter_section(section, len);
        match section {
            Section::Schemes => {
                for scheme in program.schemes() {
                    self.listener.enter_scheme(scheme);
                    self.listener.exit_scheme(scheme);
                }
            }
            Section::Facts => {
                for fact in program.facts() {
                    self.listener.enter_fact(fact);
                    self.listener.exit_fact(fact);
                }
            }
            Section::Rules => {
                for rule in program.rules() {
                    self.listener.enter_rule(rule);
                    self.listener.exit_rule(rule);
                }
            }
            Section::Queries => {
                for query in program.queries() {
                    self.listener.enter_query(query);
                    self.listener.exit_query(query);
                }
            }
        }
        self.listener.exit_section(section, len);
    }
}

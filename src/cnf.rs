//! Clause sets and the claim biconditional encoder
//!
//! A claim made by `s` with proposition `P` is encoded as `s ⟺ P`:
//! - `s → P` becomes `¬s` added to every clause of `cnf(P)`
//! - `¬s → ¬P` becomes `s` added to every clause of `cnf(¬P)`
//!
//! Because `cnf` is defined once per connective kind, a single routine covers
//! every pattern family at every arity.

use std::fmt;

use crate::ast::{Formula, Literal};

/// A disjunction of literals
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Clause(Vec<Literal>);

impl Clause {
    /// Creates a clause from literals
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause(literals)
    }

    /// Creates a clause from DIMACS integers, skipping zeros
    pub fn from_dimacs(lits: &[i32]) -> Self {
        Clause(lits.iter().filter_map(|&l| Literal::from_dimacs(l)).collect())
    }

    /// Returns the literals
    pub fn literals(&self) -> &[Literal] {
        &self.0
    }

    /// Number of literals
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true for the empty (unsatisfiable) clause
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the clause as DIMACS integers
    pub fn to_dimacs(&self) -> Vec<i32> {
        self.0.iter().map(|l| l.to_dimacs()).collect()
    }

    /// Returns true if some literal holds under the assignment
    pub fn is_satisfied_by<F: Fn(u32) -> bool>(&self, knight: &F) -> bool {
        self.0.iter().any(|l| l.evaluate(knight))
    }
}

impl fmt::Debug for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// An ordered conjunction of clauses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClauseSet {
    num_variables: u32,
    clauses: Vec<Clause>,
}

impl ClauseSet {
    /// Creates a new empty clause set
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause
    pub fn add_clause(&mut self, clause: Clause) {
        // Update max variable
        for lit in clause.literals() {
            self.num_variables = self.num_variables.max(lit.var());
        }
        self.clauses.push(clause);
    }

    /// Appends every clause of another set
    pub fn extend(&mut self, other: &ClauseSet) {
        self.num_variables = self.num_variables.max(other.num_variables);
        self.clauses.extend(other.clauses.iter().cloned());
    }

    /// Highest variable id mentioned
    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    /// Number of clauses
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Returns true if there are no clauses
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Returns the clauses in order
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Returns the sorted, deduplicated variables mentioned by any clause
    pub fn variables(&self) -> Vec<u32> {
        let mut vars: Vec<u32> = self
            .clauses
            .iter()
            .flat_map(|c| c.literals().iter().map(|l| l.var()))
            .collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    /// Returns the clause set in the solver wire format
    pub fn to_dimacs(&self) -> Vec<Vec<i32>> {
        self.clauses.iter().map(Clause::to_dimacs).collect()
    }

    /// Returns true if every clause holds under the assignment
    pub fn is_satisfied_by<F: Fn(u32) -> bool>(&self, knight: &F) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied_by(knight))
    }
}

impl FromIterator<Clause> for ClauseSet {
    fn from_iter<I: IntoIterator<Item = Clause>>(iter: I) -> Self {
        let mut set = ClauseSet::new();
        for clause in iter {
            set.add_clause(clause);
        }
        set
    }
}

/// Encodes `knight(speaker) ⟺ proposition`
///
/// Only reads its inputs; all participants must already have variables.
pub fn encode_claim(speaker: u32, proposition: &Formula) -> ClauseSet {
    let speaker = Literal::positive(speaker);
    let mut set = ClauseSet::new();

    // A knight's claim holds
    for clause in proposition.cnf() {
        set.add_clause(guarded(!speaker, clause));
    }

    // A knave's claim fails
    for clause in proposition.negate().cnf() {
        set.add_clause(guarded(speaker, clause));
    }

    set
}

fn guarded(guard: Literal, body: Vec<Literal>) -> Clause {
    let mut literals = Vec::with_capacity(body.len() + 1);
    literals.push(guard);
    literals.extend(body);
    Clause::new(literals)
}

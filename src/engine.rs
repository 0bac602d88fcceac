//! SAT solver trait and implementations

pub mod rustsat_adapter;

pub use rustsat_adapter::RustSatAdapter;

use crate::error::{KnavesError, Result};

/// Core SAT solver trait
///
/// This trait defines the interface that all SAT solver backends must implement.
/// Variables are 1-indexed, and literals are represented as signed integers
/// (positive for true, negative for false). Backends must accept clauses
/// after a successful `solve`, which is how models are enumerated.
pub trait SATSolver {
    /// Adds the given number of variables to the solver
    fn add_variables(&mut self, num_vars: u32);

    /// Adds a clause to the solver
    ///
    /// Returns false if the clause is trivially unsatisfiable
    ///
    /// # Arguments
    /// * `lits` - Slice of literals (1-indexed, negated by sign)
    fn add_clause(&mut self, lits: &[i32]) -> bool;

    /// Solves the current formula
    ///
    /// Returns true if satisfiable, false if unsatisfiable
    fn solve(&mut self) -> Result<bool>;

    /// Returns the assignment of a variable in the last model
    ///
    /// `None` if the backend holds no definite value for it, which happens
    /// for variables that no clause constrains.
    fn value_of(&self, var: u32) -> Option<bool>;

    /// Returns the number of variables in the solver
    fn num_variables(&self) -> u32;

    /// Returns the number of clauses added
    fn num_clauses(&self) -> u32;
}

/// Exhaustive search over all assignments
///
/// Only suitable for a handful of variables; useful as a reference backend.
pub struct TruthTableSolver {
    num_vars: u32,
    clauses: Vec<Vec<i32>>,
    model: Option<u64>,
}

impl TruthTableSolver {
    /// Largest number of variables this solver accepts
    pub const MAX_VARIABLES: u32 = 20;

    /// Creates a new truth-table solver
    pub fn new() -> Self {
        Self {
            num_vars: 0,
            clauses: Vec::new(),
            model: None,
        }
    }

    fn satisfies(&self, bits: u64) -> bool {
        self.clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let value = bits & (1 << (lit.unsigned_abs() - 1)) != 0;
                value == (lit > 0)
            })
        })
    }
}

impl Default for TruthTableSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SATSolver for TruthTableSolver {
    fn add_variables(&mut self, num_vars: u32) {
        self.num_vars += num_vars;
    }

    fn add_clause(&mut self, lits: &[i32]) -> bool {
        if lits.is_empty() || lits.contains(&0) {
            return false;
        }
        for &lit in lits {
            self.num_vars = self.num_vars.max(lit.unsigned_abs());
        }
        self.clauses.push(lits.to_vec());
        true
    }

    fn solve(&mut self) -> Result<bool> {
        if self.num_vars > Self::MAX_VARIABLES {
            return Err(KnavesError::Solver(format!(
                "{} variables exceed the truth-table limit of {}",
                self.num_vars,
                Self::MAX_VARIABLES
            )));
        }
        self.model = (0..1u64 << self.num_vars).find(|&bits| self.satisfies(bits));
        Ok(self.model.is_some())
    }

    fn value_of(&self, var: u32) -> Option<bool> {
        if var == 0 || var > self.num_vars {
            return None;
        }
        self.model.map(|bits| bits & (1 << (var - 1)) != 0)
    }

    fn num_variables(&self) -> u32 {
        self.num_vars
    }

    fn num_clauses(&self) -> u32 {
        self.clauses.len() as u32
    }
}

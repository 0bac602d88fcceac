//! Adapters for rustsat solver backends
//!
//! Provides adapters to use rustsat-compatible SAT solvers with the puzzle solver.

use rustsat::solvers::{Solve, SolverResult};
use rustsat::types::{Clause, Lit, TernaryVal, Var};

use super::SATSolver;
use crate::error::{KnavesError, Result};

/// Adapter that wraps rustsat solvers to implement our SATSolver trait
///
/// This allows any rustsat-compatible solver to be used for puzzles.
///
/// # Example
///
/// ```ignore
/// use rustsat_batsat::BasicSolver;
/// let solver = RustSatAdapter::new(BasicSolver::default());
/// ```
pub struct RustSatAdapter<S> {
    solver: S,
    num_vars: u32,
    num_clauses: u32,
}

impl<S> RustSatAdapter<S> {
    /// Creates a new adapter wrapping the given solver
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            num_vars: 0,
            num_clauses: 0,
        }
    }
}

fn to_lit(lit: i32) -> Option<Lit> {
    let var_idx = lit.unsigned_abs().checked_sub(1)?;
    if var_idx > Var::MAX_IDX {
        return None;
    }
    let var = Var::new(var_idx);
    Some(if lit > 0 { var.pos_lit() } else { var.neg_lit() })
}

impl<S: Solve> SATSolver for RustSatAdapter<S> {
    fn add_variables(&mut self, num_vars: u32) {
        // RustSat auto-creates variables as needed when clauses are added
        // Just track the count for our interface
        self.num_vars += num_vars;
    }

    fn add_clause(&mut self, lits: &[i32]) -> bool {
        let lits_vec: Option<Vec<Lit>> = lits.iter().map(|&lit| to_lit(lit)).collect();
        let Some(lits_vec) = lits_vec else {
            log::error!("clause {:?} holds a literal rustsat cannot represent", lits);
            return false;
        };
        if lits_vec.is_empty() {
            return false;
        }

        for &lit in lits {
            self.num_vars = self.num_vars.max(lit.unsigned_abs());
        }
        let clause = Clause::from(&lits_vec[..]);
        self.num_clauses += 1;
        self.solver.add_clause(clause).is_ok()
    }

    fn solve(&mut self) -> Result<bool> {
        match self.solver.solve() {
            Ok(SolverResult::Sat) => Ok(true),
            Ok(SolverResult::Unsat) => Ok(false),
            Ok(SolverResult::Interrupted) => Err(KnavesError::Aborted),
            Err(e) => Err(KnavesError::Solver(e.to_string())),
        }
    }

    fn value_of(&self, var: u32) -> Option<bool> {
        if var == 0 || var > self.num_vars {
            return None;
        }
        match self.solver.lit_val(to_lit(var as i32)?) {
            Ok(TernaryVal::True) => Some(true),
            Ok(TernaryVal::False) => Some(false),
            Ok(TernaryVal::DontCare) | Err(_) => None,
        }
    }

    fn num_variables(&self) -> u32 {
        self.num_vars
    }

    fn num_clauses(&self) -> u32 {
        self.num_clauses
    }
}

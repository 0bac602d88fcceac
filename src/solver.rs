//! Main solver API
//!
//! The solver hands a puzzle's clauses to a SAT backend and enumerates every
//! consistent knight/knave assignment.

use crate::engine::{rustsat_adapter::RustSatAdapter, SATSolver};
use crate::error::{KnavesError, Result};
use crate::instance::{Model, PuzzleInstance};
use log::{info, warn};
use rustsat_batsat::BasicSolver;
use std::time::{Duration, Instant};

/// Solver options
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Stop enumeration after this many models (None = enumerate all)
    pub max_models: Option<usize>,
    /// Enumeration timeout in milliseconds (None = no timeout)
    ///
    /// Checked before every SAT call; when it has elapsed the enumeration
    /// yields `KnavesError::Aborted`.
    pub timeout_ms: Option<u64>,
}

/// Puzzle solver (uses batsat by default)
pub struct Solver {
    options: Options,
}

impl Solver {
    /// Creates a new solver with the given options (uses batsat backend)
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Returns the options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Starts a fresh enumeration of the puzzle's models using batsat
    ///
    /// Models are produced on demand. Calling this again restarts from the
    /// beginning with a new backend.
    pub fn models(&self, puzzle: &PuzzleInstance) -> Result<Models<RustSatAdapter<BasicSolver>>> {
        self.models_with(RustSatAdapter::new(BasicSolver::default()), puzzle)
    }

    /// Starts a fresh enumeration with a custom SAT solver
    ///
    /// The backend should be empty; the puzzle's clauses are loaded into it.
    pub fn models_with<S: SATSolver>(&self, mut sat_solver: S, puzzle: &PuzzleInstance) -> Result<Models<S>> {
        let num_vars = puzzle.num_variables();
        sat_solver.add_variables(num_vars);

        let mut exhausted = false;
        for clause in puzzle.clauses().clauses() {
            if clause.is_empty() {
                exhausted = true;
            } else if !sat_solver.add_clause(&clause.to_dimacs()) {
                return Err(KnavesError::Solver(format!("backend rejected clause {:?}", clause)));
            }
        }

        let mut mentioned = vec![false; num_vars as usize];
        for var in puzzle.clauses().variables() {
            if let Some(slot) = var.checked_sub(1).and_then(|i| mentioned.get_mut(i as usize)) {
                *slot = true;
            }
        }

        Ok(Models {
            sat_solver,
            mentioned,
            cube: None,
            deadline: self
                .options
                .timeout_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            limit: self.options.max_models,
            emitted: 0,
            exhausted,
            done: false,
        })
    }

    /// Solves a puzzle using batsat backend
    ///
    /// Returns a Solution holding every model (up to `max_models`) and
    /// statistics.
    pub fn solve(&self, puzzle: &PuzzleInstance) -> Result<Solution> {
        self.solve_with(RustSatAdapter::new(BasicSolver::default()), puzzle)
    }

    /// Solves a puzzle with a custom SAT solver
    pub fn solve_with<S: SATSolver>(&self, sat_solver: S, puzzle: &PuzzleInstance) -> Result<Solution> {
        let solving_start = Instant::now();
        let models = self
            .models_with(sat_solver, puzzle)?
            .collect::<Result<Vec<_>>>()?;
        let solving_time = solving_start.elapsed();

        let stats = Statistics {
            solving_time,
            num_variables: puzzle.num_variables(),
            num_clauses: puzzle.clauses().num_clauses() as u32,
            num_models: models.len(),
        };
        info!(
            "{} model(s) over {} variables and {} clauses in {} ms",
            stats.num_models,
            stats.num_variables,
            stats.num_clauses,
            stats.solving_time()
        );

        if models.is_empty() {
            Ok(Solution::Unsat { stats })
        } else {
            Ok(Solution::Sat { models, stats })
        }
    }
}

/// One SAT model with its free variables still open
///
/// Every completion of the free variables is a model of the puzzle.
struct Cube {
    knights: Vec<bool>,
    free: Vec<usize>,
    next: u64,
    count: u64,
}

impl Cube {
    fn next_model(&mut self) -> Option<Model> {
        if self.next >= self.count {
            return None;
        }
        for (bit, &i) in self.free.iter().enumerate() {
            self.knights[i] = self.next >> bit & 1 == 1;
        }
        self.next += 1;
        Some(Model::from_knights(&self.knights))
    }
}

/// Lazy model enumeration over a loaded backend
///
/// After each SAT call the assignment to the determined variables is blocked,
/// so no model is produced twice.
pub struct Models<S> {
    sat_solver: S,
    mentioned: Vec<bool>,
    cube: Option<Cube>,
    deadline: Option<Instant>,
    limit: Option<usize>,
    emitted: usize,
    exhausted: bool,
    done: bool,
}

impl<S: SATSolver> Models<S> {
    /// Number of models produced so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn emit(&mut self, model: Model) -> Option<Result<Model>> {
        self.emitted += 1;
        Some(Ok(model))
    }

    fn fail(&mut self, err: KnavesError) -> Option<Result<Model>> {
        self.done = true;
        Some(Err(err))
    }

    /// Reads the backend's model and blocks its determined part
    fn next_cube(&mut self) -> Result<Cube> {
        let mut knights = Vec::with_capacity(self.mentioned.len());
        let mut free = Vec::new();
        let mut block = Vec::new();

        for (i, &mentioned) in self.mentioned.iter().enumerate() {
            let var = i as u32 + 1;
            match self.sat_solver.value_of(var).filter(|_| mentioned) {
                Some(value) => {
                    knights.push(value);
                    block.push(if value { -(var as i32) } else { var as i32 });
                }
                None => {
                    knights.push(false);
                    free.push(i);
                }
            }
        }

        if free.len() >= u64::BITS as usize {
            return Err(KnavesError::Solver(format!(
                "{} free variables are too many to enumerate",
                free.len()
            )));
        }

        // An empty blocking clause would be the empty clause
        if block.is_empty() {
            self.exhausted = true;
        } else if !self.sat_solver.add_clause(&block) {
            return Err(KnavesError::Solver(format!(
                "backend rejected blocking clause {:?}",
                block
            )));
        }

        Ok(Cube {
            knights,
            count: 1 << free.len(),
            free,
            next: 0,
        })
    }
}

impl<S: SATSolver> Iterator for Models<S> {
    type Item = Result<Model>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.limit.is_some_and(|limit| self.emitted >= limit) {
            warn!("stopping enumeration at the cap of {} models", self.emitted);
            self.done = true;
            return None;
        }

        if let Some(model) = self.cube.as_mut().and_then(Cube::next_model) {
            return self.emit(model);
        }
        self.cube = None;

        if self.exhausted {
            self.done = true;
            return None;
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            warn!("enumeration timed out after {} models", self.emitted);
            return self.fail(KnavesError::Aborted);
        }

        match self.sat_solver.solve() {
            Ok(true) => {}
            Ok(false) => {
                self.done = true;
                return None;
            }
            Err(e) => return self.fail(e),
        }

        let mut cube = match self.next_cube() {
            Ok(cube) => cube,
            Err(e) => return self.fail(e),
        };
        let model = cube.next_model();
        self.cube = Some(cube);
        match model {
            Some(model) => self.emit(model),
            None => {
                self.done = true;
                None
            }
        }
    }
}

/// Outcome of solving a puzzle
#[derive(Debug)]
pub enum Solution {
    /// Puzzle has at least one consistent assignment
    Sat {
        /// Models in enumeration order
        models: Vec<Model>,
        /// Solving statistics
        stats: Statistics,
    },
    /// Puzzle is inconsistent
    Unsat {
        /// Solving statistics
        stats: Statistics,
    },
}

impl Solution {
    /// Returns true if the puzzle is satisfiable
    pub fn is_sat(&self) -> bool {
        matches!(self, Solution::Sat { .. })
    }

    /// Returns true if the puzzle is unsatisfiable
    pub fn is_unsat(&self) -> bool {
        matches!(self, Solution::Unsat { .. })
    }

    /// Returns true if more than one model was found
    pub fn is_ambiguous(&self) -> bool {
        self.models().len() > 1
    }

    /// Returns the models; empty if the puzzle is UNSAT
    pub fn models(&self) -> &[Model] {
        match self {
            Solution::Sat { models, .. } => models,
            Solution::Unsat { .. } => &[],
        }
    }

    /// Returns the statistics
    pub fn statistics(&self) -> &Statistics {
        match self {
            Solution::Sat { stats, .. } => stats,
            Solution::Unsat { stats } => stats,
        }
    }
}

/// Statistics collected during solving
#[derive(Debug, Clone)]
pub struct Statistics {
    solving_time: Duration,
    num_variables: u32,
    num_clauses: u32,
    num_models: usize,
}

impl Statistics {
    /// Returns solving time in milliseconds
    pub fn solving_time(&self) -> u64 {
        self.solving_time.as_millis() as u64
    }

    /// Returns number of variables
    pub fn num_variables(&self) -> u32 {
        self.num_variables
    }

    /// Returns number of clauses
    pub fn num_clauses(&self) -> u32 {
        self.num_clauses
    }

    /// Returns number of models found
    pub fn num_models(&self) -> usize {
        self.num_models
    }
}

//! # knaves-rs
//!
//! A solver for "knights and knaves" logic puzzles.
//!
//! Every inhabitant of the island is either a knight (always truthful) or a
//! knave (always lying). Each person makes a claim in plain English; a puzzle
//! asks for every knight/knave assignment consistent with all claims.
//!
//! Solving is a plain satisfiability query. The interesting part is the
//! translation layer: each claim is normalized into a template, classified
//! against a closed catalog of sentence shapes, its participants are
//! extracted slot by slot, and the claim is encoded as the CNF of
//! `knight(speaker) ⟺ P`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use knaves_rs::translator::Translator;
//! use knaves_rs::solver::{Options, Solver};
//!
//! let puzzle = Translator::translate_puzzle(
//!     &["A", "B"],
//!     &[("A", "B is a knight"), ("B", "A and I are different")],
//! )?;
//!
//! let solver = Solver::new(Options::default());
//! let solution = solver.solve(&puzzle)?;
//! for model in solution.models() {
//!     println!("{:?}", puzzle.render(model));
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2024_compatibility)]

/// Roles, literals and the symbolic formula tree
pub mod ast;

/// Person registry, claims, puzzle instances and models
pub mod instance;

/// Clause sets and the biconditional encoder
pub mod cnf;

/// Claim pipeline: normalize, classify, extract, encode
pub mod translator;

/// SAT backend trait and adapters
pub mod engine;

/// Main solver API
pub mod solver;

/// Cleaning of raw puzzle text into names and claims
pub mod corpus;

/// Error types
pub mod error {
    //! Error types for knaves-rs

    use thiserror::Error;

    /// Errors that can occur while translating or solving a puzzle
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum KnavesError {
        /// The normalized claim matches no catalog pattern
        #[error("unsupported template: {0}")]
        UnsupportedTemplate(String),

        /// A name was never registered in the puzzle
        #[error("unknown person: {0}")]
        UnknownPerson(String),

        /// The claim text does not fit the slot structure of its pattern
        #[error("malformed claim: {0}")]
        MalformedClaim(String),

        /// Raw puzzle text could not be split into names and claims
        #[error("badly formatted puzzle: {0}")]
        PuzzleFormat(String),

        /// The SAT backend failed
        #[error("solver failure: {0}")]
        Solver(String),

        /// Solving was aborted
        #[error("solving aborted")]
        Aborted,

        /// Invalid argument
        #[error("invalid argument: {0}")]
        InvalidArgument(String),
    }

    /// Result type for knaves-rs operations
    pub type Result<T> = std::result::Result<T, KnavesError>;
}

// Re-export commonly used types
pub use error::{KnavesError, Result};

//! Instance types: Person, Registry, Claim, PuzzleInstance and Model
//!
//! The registry is the only mutable shared state of a puzzle. It is filled
//! before any claim is translated and only read afterwards.

use rustc_hash::FxHashMap;
use std::fmt;

use crate::cnf::ClauseSet;
use crate::error::{KnavesError, Result};
use crate::translator::Translation;

/// A named participant and the variable meaning "this person is a knight"
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    name: String,
    var: u32,
}

impl Person {
    /// Returns the person's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the person's variable id (1-based)
    pub fn var(&self) -> u32 {
        self.var
    }
}

/// Assigns every participant a unique positive variable id
///
/// Ids are handed out in first-seen order starting at 1 and never change for
/// the lifetime of the registry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    people: Vec<Person>,
    indices: FxHashMap<String, u32>,
}

impl Registry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from names, registering them in order
    ///
    /// Repeated names keep their first id.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let mut registry = Self::new();
        for name in names {
            registry.register(name.as_ref())?;
        }
        Ok(registry)
    }

    /// Registers a name and returns its variable id
    ///
    /// Idempotent: registering the same name twice returns the same id.
    ///
    /// # Errors
    /// Returns an error if the name is empty or contains whitespace
    pub fn register(&mut self, name: &str) -> Result<u32> {
        if let Some(&var) = self.indices.get(name) {
            return Ok(var);
        }
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(KnavesError::InvalidArgument(format!(
                "'{}' is not a valid person name",
                name
            )));
        }

        let var = self.people.len() as u32 + 1;
        self.people.push(Person {
            name: name.to_string(),
            var,
        });
        self.indices.insert(name.to_string(), var);
        Ok(var)
    }

    /// Returns the variable id of a registered name
    ///
    /// # Errors
    /// Returns `UnknownPerson` if the name was never registered
    pub fn resolve(&self, name: &str) -> Result<u32> {
        self.indices
            .get(name)
            .copied()
            .ok_or_else(|| KnavesError::UnknownPerson(name.to_string()))
    }

    /// Returns true if the name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.indices.contains_key(name)
    }

    /// Returns the person owning the given variable
    pub fn get(&self, var: u32) -> Option<&Person> {
        var.checked_sub(1).and_then(|i| self.people.get(i as usize))
    }

    /// Returns the name of the person owning the given variable
    pub fn name_of(&self, var: u32) -> Option<&str> {
        self.get(var).map(Person::name)
    }

    /// Number of registered people
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Returns true if nobody is registered
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Iterates over people in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    /// Iterates over names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.people.iter().map(Person::name)
    }
}

/// One claim made by one speaker
///
/// The text is expected to be cleaned already: no reporting verb, no
/// surrounding quotes, no trailing punctuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    speaker: String,
    text: String,
}

impl Claim {
    /// Creates a claim
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }

    /// Returns the speaker's name
    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    /// Returns the claim text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: '{}'", self.speaker, self.text)
    }
}

/// A total assignment: one signed integer per registered variable, in order
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Model {
    values: Vec<i32>,
}

impl Model {
    /// Builds a model from knight flags, where `knights[i]` belongs to variable `i + 1`
    pub fn from_knights(knights: &[bool]) -> Self {
        let values = knights
            .iter()
            .enumerate()
            .map(|(i, &k)| if k { i as i32 + 1 } else { -(i as i32 + 1) })
            .collect();
        Self { values }
    }

    /// Returns the signed literals of this model
    pub fn literals(&self) -> &[i32] {
        &self.values
    }

    /// Returns whether person `var` is a knight in this model
    pub fn is_knight(&self, var: u32) -> Option<bool> {
        var.checked_sub(1)
            .and_then(|i| self.values.get(i as usize))
            .map(|&v| v > 0)
    }

    /// Number of variables assigned
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the model assigns no variables
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Every claim of one puzzle encoded into a single clause set
///
/// Built once by aggregation, never modified, handed to the solver.
#[derive(Debug, Clone)]
pub struct PuzzleInstance {
    registry: Registry,
    translations: Vec<Translation>,
    clauses: ClauseSet,
}

impl PuzzleInstance {
    /// Unions the clause sets of all translated claims
    ///
    /// Duplicate clauses are kept; they do not change the models.
    pub fn aggregate(registry: Registry, translations: Vec<Translation>) -> Self {
        let mut clauses = ClauseSet::new();
        for translation in &translations {
            clauses.extend(translation.clauses());
        }
        Self {
            registry,
            translations,
            clauses,
        }
    }

    /// Returns the frozen person registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the per-claim translations in claim order
    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    /// Returns the claims in order
    pub fn claims(&self) -> impl Iterator<Item = &Claim> {
        self.translations.iter().map(Translation::claim)
    }

    /// Returns the union of all claim clauses
    pub fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }

    /// Number of person variables
    pub fn num_variables(&self) -> u32 {
        self.registry.len() as u32
    }

    /// Renders a model as `knight(<name>)` / `knave(<name>)` tokens in registration order
    pub fn render(&self, model: &Model) -> Vec<String> {
        model
            .literals()
            .iter()
            .map(|&lit| {
                let name = self.registry.name_of(lit.unsigned_abs()).unwrap_or("?");
                if lit > 0 {
                    format!("knight({})", name)
                } else {
                    format!("knave({})", name)
                }
            })
            .collect()
    }
}

//! Claim translation
//!
//! Turns each claim into clauses in four steps: normalize the text into a
//! template, classify the template against the catalog, extract the
//! participants, and encode `knight(speaker) ⟺ P`.

pub mod catalog;
pub mod extractor;
pub mod normalizer;

pub use catalog::{classify, Family, Pattern};
pub use extractor::{extract, Participant};
pub use normalizer::{normalize, Template};

use log::debug;
use std::collections::BTreeSet;

use crate::ast::{Formula, Literal};
use crate::cnf::{encode_claim, ClauseSet};
use crate::error::Result;
use crate::instance::{Claim, PuzzleInstance, Registry};

/// Everything derived from one claim
#[derive(Debug, Clone)]
pub struct Translation {
    claim: Claim,
    template: Template,
    pattern: &'static Pattern,
    participants: Vec<Participant>,
    formula: Formula,
    clauses: ClauseSet,
}

impl Translation {
    /// The claim that was translated
    pub fn claim(&self) -> &Claim {
        &self.claim
    }

    /// The normalized template
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// The catalog pattern the template matched
    pub fn pattern(&self) -> &'static Pattern {
        self.pattern
    }

    /// The extracted participants in claim order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// The proposition P asserted by the claim
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// The clauses of `knight(speaker) ⟺ P`
    pub fn clauses(&self) -> &ClauseSet {
        &self.clauses
    }
}

/// Translates claims against a frozen person registry
///
/// The translator only reads the registry, so one registry can back any
/// number of translators.
pub struct Translator<'a> {
    registry: &'a Registry,
}

impl<'a> Translator<'a> {
    /// Creates a translator over the given registry
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Returns the registry
    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    /// Translates a single claim
    ///
    /// # Errors
    /// - `UnknownPerson` if the speaker is not registered
    /// - `UnsupportedTemplate` if the claim matches no pattern
    /// - `MalformedClaim` if its participants cannot be read
    pub fn translate(&self, claim: &Claim) -> Result<Translation> {
        let speaker = self.registry.resolve(claim.speaker())?;
        let template = normalize(claim, self.registry);
        let pattern = classify(&template)?;
        let participants = extract(claim, pattern, self.registry)?;

        let operands = participants
            .iter()
            .map(|p| Ok(Literal::of(self.registry.resolve(p.name())?, p.role())))
            .collect::<Result<Vec<_>>>()?;
        let formula = pattern.family().proposition(&operands)?;
        let clauses = encode_claim(speaker, &formula);

        debug!(
            "{} => '{}' [{}] {} ⟺ {}",
            claim,
            template,
            pattern.id(),
            claim.speaker(),
            formula.display(self.registry)
        );

        Ok(Translation {
            claim: claim.clone(),
            template,
            pattern,
            participants,
            formula,
            clauses,
        })
    }

    /// Translates claims in order, stopping at the first failure
    ///
    /// A puzzle missing one claim's clauses would be under-constrained, so
    /// there is no partial result.
    pub fn translate_all(&self, claims: &[Claim]) -> Result<Vec<Translation>> {
        claims.iter().map(|c| self.translate(c)).collect()
    }

    /// Registers the people of a puzzle, translates its claims and
    /// aggregates the clauses
    ///
    /// Names are registered in the given order. Every speaker must be one of
    /// them; an undeclared speaker fails with `UnknownPerson`.
    pub fn translate_puzzle<N, S, T>(names: &[N], claims: &[(S, T)]) -> Result<PuzzleInstance>
    where
        N: AsRef<str>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let registry = Registry::from_names(names)?;
        let claims: Vec<Claim> = claims
            .iter()
            .map(|(speaker, text)| Claim::new(speaker.as_ref(), text.as_ref()))
            .collect();
        let translations = Translator::new(&registry).translate_all(&claims)?;
        Ok(PuzzleInstance::aggregate(registry, translations))
    }
}

/// Templates seen during a session, kept sorted
///
/// Callers own the log and decide what to record; nothing is collected
/// implicitly.
#[derive(Debug, Clone, Default)]
pub struct TemplateLog {
    seen: BTreeSet<Template>,
}

impl TemplateLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one template; returns true if it was new
    pub fn record(&mut self, template: &Template) -> bool {
        self.seen.insert(template.clone())
    }

    /// Records the templates of every claim of a puzzle
    pub fn record_puzzle(&mut self, puzzle: &PuzzleInstance) {
        for translation in puzzle.translations() {
            self.record(translation.template());
        }
    }

    /// Returns true if the template has been seen
    pub fn contains(&self, template: &Template) -> bool {
        self.seen.contains(template)
    }

    /// Iterates over seen templates in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.seen.iter()
    }

    /// Number of distinct templates
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns true if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

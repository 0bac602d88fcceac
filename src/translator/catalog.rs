//! The closed catalog of supported claim shapes
//!
//! Each pattern is a token grammar
//!
//! ```text
//! head item (joiner item)* tail
//! ```
//!
//! where `item` is repeated once per participant. The number of repetitions
//! is recovered from the token count alone:
//! `len = |head| + |item| + (n - 1) * (|joiner| + |item|) + |tail|`.
//! Slot tokens (`name`, `k_id`, `k_ids`) inside the grammar mark where the
//! extractor reads participants and roles from the claim text.
//!
//! The catalog is fixed at compile time. No two patterns accept the same
//! template; the catalog tests enumerate every pattern at arities 1 through 5
//! to check this.

use crate::ast::{Formula, Literal};
use crate::error::{KnavesError, Result};

use super::normalizer::{tokenize, Template};

/// Version of the pattern catalog; bump whenever a pattern is added or changed
pub const CATALOG_VERSION: u32 = 1;

/// How the operands of a conditional body are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Junction {
    /// All operands hold
    All,
    /// At least one operand holds
    Any,
}

/// Pattern family: the connective structure a pattern denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// `X is a knight`
    Atomic,
    /// `it's false that X is a knight`
    NegatedAtomic,
    /// `X is a knight and Y is a knave and ...`
    Conjunction,
    /// `X is a knight or Y is a knave or ...`
    Disjunction,
    /// `it's false that X is a knight and ...`
    NegatedConjunction,
    /// `it's false that X is a knight or ...`
    NegatedDisjunction,
    /// `either X is a knight or Y is a knight`, `X and Y are different`
    ExclusiveOr,
    /// `X and Y are the same`
    Biconditional,
    /// `neither X nor Y are knights`
    Nor,
    /// `X could claim that ...`: a forced antecedent implying the body
    Conditional(Junction),
    /// `X and Y are knights`
    CollectiveConjunction,
}

impl Family {
    /// Returns the connective symbol of this family
    pub fn connective(&self) -> &'static str {
        match self {
            Family::Atomic => "id",
            Family::NegatedAtomic => "¬",
            Family::Conjunction | Family::CollectiveConjunction => "∧",
            Family::Disjunction => "∨",
            Family::NegatedConjunction => "¬∧",
            Family::NegatedDisjunction => "¬∨",
            Family::ExclusiveOr => "⊕",
            Family::Biconditional => "↔",
            Family::Nor => "↓",
            Family::Conditional(_) => "→",
        }
    }

    /// Builds the proposition denoted by this family over the given operands
    ///
    /// For conditionals the first operand is the antecedent.
    ///
    /// # Errors
    /// Returns `MalformedClaim` if the operand count does not fit the family
    pub fn proposition(&self, operands: &[Literal]) -> Result<Formula> {
        let arity = |ok: bool| -> Result<()> {
            if ok {
                Ok(())
            } else {
                Err(KnavesError::MalformedClaim(format!(
                    "{:?} cannot take {} operand(s)",
                    self,
                    operands.len()
                )))
            }
        };

        match self {
            Family::Atomic => {
                arity(operands.len() == 1)?;
                Ok(Formula::lit(operands[0]))
            }
            Family::NegatedAtomic => {
                arity(operands.len() == 1)?;
                Ok(Formula::lit(operands[0]).not())
            }
            Family::Conjunction | Family::CollectiveConjunction => {
                arity(!operands.is_empty())?;
                Ok(Formula::all_of(operands))
            }
            Family::Disjunction => {
                arity(!operands.is_empty())?;
                Ok(Formula::any_of(operands))
            }
            Family::NegatedConjunction => {
                arity(!operands.is_empty())?;
                Ok(Formula::all_of(operands).not())
            }
            Family::NegatedDisjunction => {
                arity(!operands.is_empty())?;
                Ok(Formula::any_of(operands).not())
            }
            Family::ExclusiveOr => {
                arity(operands.len() == 2)?;
                Ok(Formula::lit(operands[0]).xor(Formula::lit(operands[1])))
            }
            Family::Biconditional => {
                arity(operands.len() == 2)?;
                Ok(Formula::lit(operands[0]).iff(Formula::lit(operands[1])))
            }
            Family::Nor => {
                arity(operands.len() == 2)?;
                Ok(Formula::any_of(operands).not())
            }
            Family::Conditional(junction) => {
                arity(operands.len() >= 2)?;
                let body = match (&operands[1..], junction) {
                    ([only], _) => Formula::lit(*only),
                    (rest, Junction::All) => Formula::all_of(rest),
                    (rest, Junction::Any) => Formula::any_of(rest),
                };
                Ok(Formula::lit(operands[0]).implies(body))
            }
        }
    }
}

/// How many participants a pattern accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Exactly this many items
    Exactly(usize),
    /// This many items or more
    AtLeast(usize),
}

impl Arity {
    /// Returns true if `n` items are accepted
    pub fn admits(&self, n: usize) -> bool {
        match *self {
            Arity::Exactly(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }
}

/// What the slots in a pattern's head contribute to the participant list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lead {
    /// The head has no bound slots
    Plain,
    /// The head names a person who is assumed to be a knight; that person
    /// becomes the antecedent
    Antecedent,
    /// The head's role word applies to the speaker, who becomes the antecedent
    SpeakerAntecedent,
    /// The head names a person that does not take part in the proposition
    Ignored,
}

/// Which part of a pattern a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// Tokens before the first item
    Head,
    /// Tokens of the item with this index
    Item(usize),
    /// Joiner tokens before the item with this index
    Joiner(usize),
    /// Tokens after the last item
    Tail,
}

/// One entry of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    id: &'static str,
    family: Family,
    head: &'static str,
    item: &'static str,
    joiner: &'static str,
    tail: &'static str,
    arity: Arity,
    lead: Lead,
    shared_role: bool,
}

const ITEM: &str = "name is a k_id";
const THAT_ITEM: &str = "that name is a k_id";

impl Pattern {
    const fn new(id: &'static str, family: Family, head: &'static str, item: &'static str) -> Self {
        Self {
            id,
            family,
            head,
            item,
            joiner: "",
            tail: "",
            arity: Arity::Exactly(1),
            lead: Lead::Plain,
            shared_role: false,
        }
    }

    const fn joined(self, joiner: &'static str, arity: Arity) -> Self {
        Self { joiner, arity, ..self }
    }

    const fn tail(self, tail: &'static str) -> Self {
        Self { tail, ..self }
    }

    const fn with_lead(self, lead: Lead) -> Self {
        Self { lead, ..self }
    }

    const fn shared_role(self) -> Self {
        Self {
            shared_role: true,
            ..self
        }
    }

    /// Stable identifier of this pattern
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Family of this pattern
    pub fn family(&self) -> Family {
        self.family
    }

    /// Accepted participant counts
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Contribution of the head slots
    pub fn lead(&self) -> Lead {
        self.lead
    }

    /// Whether a role word in the tail applies to every item
    pub fn has_shared_role(&self) -> bool {
        self.shared_role
    }

    /// Returns the number of items a token sequence of length `len` would hold
    ///
    /// `None` if the length does not fit the pattern's stride or arity.
    pub fn items_for_len(&self, len: usize) -> Option<usize> {
        let head = tokenize(self.head).len();
        let item = tokenize(self.item).len();
        let joiner = tokenize(self.joiner).len();
        let tail = tokenize(self.tail).len();

        let body = len.checked_sub(head + tail)?;
        let n = if joiner == 0 {
            (body == item).then_some(1)?
        } else {
            let rest = body.checked_sub(item)?;
            if rest % (joiner + item) != 0 {
                return None;
            }
            1 + rest / (joiner + item)
        };
        self.arity.admits(n).then_some(n)
    }

    /// Returns the grammar tokens at arity `n`, each labelled with its part
    pub fn layout(&self, n: usize) -> Vec<(Part, &'static str)> {
        let mut layout: Vec<(Part, &'static str)> =
            tokenize(self.head).into_iter().map(|t| (Part::Head, t)).collect();
        for k in 0..n {
            if k > 0 {
                layout.extend(tokenize(self.joiner).into_iter().map(|t| (Part::Joiner(k), t)));
            }
            layout.extend(tokenize(self.item).into_iter().map(|t| (Part::Item(k), t)));
        }
        layout.extend(tokenize(self.tail).into_iter().map(|t| (Part::Tail, t)));
        layout
    }

    /// Returns the number of items if the template has this pattern's shape
    pub fn matches(&self, template: &Template) -> Option<usize> {
        let tokens = template.tokens();
        let n = self.items_for_len(tokens.len())?;
        self.layout(n)
            .iter()
            .zip(&tokens)
            .all(|((_, expected), actual)| expected == actual)
            .then_some(n)
    }

    /// Renders the template this pattern accepts at arity `n`
    pub fn instantiate(&self, n: usize) -> Template {
        let tokens: Vec<&str> = self.layout(n).into_iter().map(|(_, t)| t).collect();
        Template::from_tokens(&tokens)
    }

    /// Human-readable shape, with repetition written as `(...)+`
    pub fn shape(&self) -> String {
        let mut parts = vec![self.head.to_string(), self.item.to_string()];
        if !self.joiner.is_empty() {
            let repeat = match self.arity {
                Arity::Exactly(n) if n <= 2 => String::new(),
                Arity::Exactly(n) => format!("{{{}}}", n - 1),
                Arity::AtLeast(_) => "+".to_string(),
            };
            parts.push(format!("({} {}){}", self.joiner, self.item, repeat));
        }
        parts.push(self.tail.to_string());
        let text: Vec<&str> = parts.iter().map(String::as_str).filter(|p| !p.is_empty()).collect();
        Template::new(&text.join(" ")).to_string()
    }
}

static CATALOG: &[Pattern] = &[
    // P
    Pattern::new("atomic", Family::Atomic, "", ITEM),
    // ¬P
    Pattern::new("false-that", Family::NegatedAtomic, "it's false that", ITEM),
    Pattern::new("not-the-case", Family::NegatedAtomic, "it's not the case that", ITEM),
    // P ∧ Q ∧ ...
    Pattern::new("and", Family::Conjunction, "", ITEM).joined("and", Arity::AtLeast(2)),
    Pattern::new("both-and", Family::Conjunction, "both", ITEM).joined("and", Arity::Exactly(2)),
    Pattern::new("know-that", Family::Conjunction, "name know", THAT_ITEM)
        .joined("and", Arity::AtLeast(2))
        .with_lead(Lead::Ignored),
    Pattern::new("all-of", Family::Conjunction, "all of the following is true:", THAT_ITEM)
        .joined("and", Arity::AtLeast(2)),
    // P ∨ Q ∨ ...
    Pattern::new("or", Family::Disjunction, "", ITEM).joined("or", Arity::AtLeast(2)),
    Pattern::new("at-least-one", Family::Disjunction, "at least one of the following is true:", THAT_ITEM)
        .joined("or", Arity::AtLeast(2)),
    // ¬(P ∧ Q ∧ ...)
    Pattern::new("false-that-and", Family::NegatedConjunction, "it's false that", ITEM)
        .joined("and", Arity::AtLeast(2)),
    Pattern::new("not-the-case-and", Family::NegatedConjunction, "it's not the case that", ITEM)
        .joined("and", Arity::AtLeast(2)),
    // ¬(P ∨ Q ∨ ...)
    Pattern::new("false-that-or", Family::NegatedDisjunction, "it's false that", ITEM)
        .joined("or", Arity::AtLeast(2)),
    Pattern::new("not-the-case-or", Family::NegatedDisjunction, "it's not the case that", ITEM)
        .joined("or", Arity::AtLeast(2)),
    // P ⊕ Q
    Pattern::new("either-or", Family::ExclusiveOr, "either", ITEM).joined("or", Arity::Exactly(2)),
    Pattern::new("different", Family::ExclusiveOr, "", "name")
        .joined("and", Arity::Exactly(2))
        .tail("are different"),
    Pattern::new("not-the-same", Family::ExclusiveOr, "", "name")
        .joined("and", Arity::Exactly(2))
        .tail("are not the same"),
    Pattern::new("exactly-one", Family::ExclusiveOr, "of", "name")
        .joined("and", Arity::Exactly(2))
        .tail(", exactly one is a k_id")
        .shared_role(),
    // P ↔ Q
    Pattern::new("both-or-both", Family::Biconditional, "", "name")
        .joined("and", Arity::Exactly(2))
        .tail("are both k_ids or both k_ids"),
    Pattern::new("the-same", Family::Biconditional, "", "name")
        .joined("and", Arity::Exactly(2))
        .tail("are the same"),
    // ¬(P ∨ Q)
    Pattern::new("neither-nor", Family::Nor, "neither", "name")
        .joined("nor", Arity::Exactly(2))
        .tail("are k_ids")
        .shared_role(),
    // A → P, with A forced
    Pattern::new("could-claim", Family::Conditional(Junction::All), "name could claim that", ITEM)
        .with_lead(Lead::Antecedent),
    Pattern::new("could-claim-and", Family::Conditional(Junction::All), "name could claim that", ITEM)
        .joined("and", Arity::AtLeast(2))
        .with_lead(Lead::Antecedent),
    Pattern::new("could-claim-or", Family::Conditional(Junction::Any), "name could claim that", ITEM)
        .joined("or", Arity::AtLeast(2))
        .with_lead(Lead::Antecedent),
    Pattern::new("could-say", Family::Conditional(Junction::All), "name could say that", ITEM)
        .with_lead(Lead::Antecedent),
    Pattern::new("could-say-and", Family::Conditional(Junction::All), "name could say that", ITEM)
        .joined("and", Arity::AtLeast(2))
        .with_lead(Lead::Antecedent),
    Pattern::new("could-say-or", Family::Conditional(Junction::Any), "name could say that", ITEM)
        .joined("or", Arity::AtLeast(2))
        .with_lead(Lead::Antecedent),
    Pattern::new("would-tell", Family::Conditional(Junction::All), "name would tell you that", ITEM)
        .with_lead(Lead::Antecedent),
    Pattern::new("would-tell-and", Family::Conditional(Junction::All), "name would tell you that", ITEM)
        .joined("and", Arity::AtLeast(2))
        .with_lead(Lead::Antecedent),
    Pattern::new("would-tell-or", Family::Conditional(Junction::Any), "name would tell you that", ITEM)
        .joined("or", Arity::AtLeast(2))
        .with_lead(Lead::Antecedent),
    Pattern::new("only-would-say", Family::Conditional(Junction::All), "only a k_id would say that", ITEM)
        .with_lead(Lead::SpeakerAntecedent),
    Pattern::new("only-would-say-and", Family::Conditional(Junction::All), "only a k_id would say that", ITEM)
        .joined("and", Arity::AtLeast(2))
        .with_lead(Lead::SpeakerAntecedent),
    Pattern::new("only-would-say-or", Family::Conditional(Junction::Any), "only a k_id would say that", ITEM)
        .joined("or", Arity::AtLeast(2))
        .with_lead(Lead::SpeakerAntecedent),
    // P ∧ Q, collective
    Pattern::new("are-both", Family::CollectiveConjunction, "", "name")
        .joined("and", Arity::Exactly(2))
        .tail("are k_ids")
        .shared_role(),
    Pattern::new("both-are", Family::CollectiveConjunction, "both", "name")
        .joined("and", Arity::Exactly(2))
        .tail("are k_ids")
        .shared_role(),
    Pattern::new("are-both-trailing", Family::CollectiveConjunction, "", "name")
        .joined("and", Arity::Exactly(2))
        .tail("are both k_ids")
        .shared_role(),
];

/// Returns every pattern of the catalog, in catalog order
pub fn patterns() -> &'static [Pattern] {
    CATALOG
}

/// Looks a pattern up by id
pub fn pattern(id: &str) -> Option<&'static Pattern> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Classifies a template against the catalog
///
/// # Errors
/// Returns `UnsupportedTemplate` carrying the template if no pattern matches
pub fn classify(template: &Template) -> Result<&'static Pattern> {
    let mut matches = CATALOG.iter().filter(|p| p.matches(template).is_some());
    let found = matches
        .next()
        .ok_or_else(|| KnavesError::UnsupportedTemplate(template.to_string()))?;
    debug_assert!(
        matches.next().is_none(),
        "catalog is ambiguous for template '{}'",
        template
    );
    Ok(found)
}

//! Participant extraction
//!
//! Reads `(name, role)` pairs out of a claim by walking the claim's tokens in
//! lockstep with the matched pattern's layout. Normalization maps tokens one
//! to one, so position `i` of the claim lines up with position `i` of the
//! grammar; only the slot positions are read.

use std::fmt;

use log::trace;

use crate::ast::Role;
use crate::error::{KnavesError, Result};
use crate::instance::{Claim, Registry};

use super::catalog::{Lead, Part, Pattern};
use super::normalizer::{claim_tokens, NAME, ROLE, ROLES};

/// A person referenced by a claim together with the role claimed for them
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Participant {
    name: String,
    role: Role,
}

impl Participant {
    /// Creates a participant
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// The person's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The claimed role
    pub fn role(&self) -> Role {
        self.role
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.role, self.name)
    }
}

#[derive(Default, Clone, Copy)]
struct Slots<'a> {
    name: Option<&'a str>,
    role: Option<Role>,
}

/// Extracts the participants of a claim already classified as `pattern`
///
/// Participants come out in claim order. A forced antecedent comes first;
/// items without their own role word take the shared tail role if the
/// pattern has one, and `knight` otherwise.
///
/// # Errors
/// Returns `MalformedClaim` if the token count does not fit the pattern's
/// stride, if a role slot holds no role word, or if a name slot holds a name
/// that is not registered.
pub fn extract(claim: &Claim, pattern: &Pattern, registry: &Registry) -> Result<Vec<Participant>> {
    let tokens = claim_tokens(claim);
    let n = pattern.items_for_len(tokens.len()).ok_or_else(|| {
        KnavesError::MalformedClaim(format!(
            "{} tokens do not fit the stride of pattern '{}' in '{}'",
            tokens.len(),
            pattern.id(),
            claim.text()
        ))
    })?;

    let mut head = Slots::default();
    let mut tail = Slots::default();
    let mut items = vec![Slots::default(); n];

    for ((part, slot), &token) in pattern.layout(n).into_iter().zip(&tokens) {
        let target = match part {
            Part::Head => &mut head,
            Part::Item(k) => &mut items[k],
            Part::Tail => &mut tail,
            Part::Joiner(_) => continue,
        };
        match slot {
            NAME => {
                if !registry.contains(token) {
                    return Err(KnavesError::MalformedClaim(format!(
                        "'{}' in '{}' is not a registered person",
                        token,
                        claim.text()
                    )));
                }
                target.name.get_or_insert(token);
            }
            ROLE | ROLES => {
                let role = Role::from_word(token).ok_or_else(|| {
                    KnavesError::MalformedClaim(format!(
                        "expected a role word, found '{}' in '{}'",
                        token,
                        claim.text()
                    ))
                })?;
                target.role.get_or_insert(role);
            }
            _ => {}
        }
    }

    let mut participants = Vec::with_capacity(n + 1);
    match pattern.lead() {
        Lead::Antecedent => {
            let name = head.name.ok_or_else(|| missing("antecedent", claim))?;
            participants.push(Participant::new(name, Role::Knight));
        }
        Lead::SpeakerAntecedent => {
            participants.push(Participant::new(
                claim.speaker(),
                head.role.unwrap_or(Role::Knight),
            ));
        }
        Lead::Plain | Lead::Ignored => {}
    }

    let shared = if pattern.has_shared_role() { tail.role } else { None };
    for item in items {
        let name = item.name.ok_or_else(|| missing("subject", claim))?;
        let role = item.role.or(shared).unwrap_or(Role::Knight);
        participants.push(Participant::new(name, role));
    }

    for p in &participants {
        trace!("'{}' -> {}", claim.text(), p);
    }
    Ok(participants)
}

fn missing(what: &str, claim: &Claim) -> KnavesError {
    KnavesError::MalformedClaim(format!("no {} slot filled in '{}'", what, claim.text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translator::catalog::pattern;
    use pretty_assertions::assert_eq;

    fn registry() -> Registry {
        Registry::from_names(&["Alice", "Bob", "Carl", "Dave"]).unwrap()
    }

    fn run(speaker: &str, text: &str, id: &str) -> Result<Vec<Participant>> {
        extract(&Claim::new(speaker, text), pattern(id).unwrap(), &registry())
    }

    #[test]
    fn atomic_reads_name_and_role() {
        assert_eq!(
            run("Alice", "Bob is a knave", "atomic").unwrap(),
            vec![Participant::new("Bob", Role::Knave)]
        );
    }

    #[test]
    fn variable_length_conjunction() {
        let got = run(
            "Alice",
            "Bob is a knight and I am a knave and Dave is a knight",
            "and",
        )
        .unwrap();
        assert_eq!(
            got,
            vec![
                Participant::new("Bob", Role::Knight),
                Participant::new("Alice", Role::Knave),
                Participant::new("Dave", Role::Knight),
            ]
        );
    }

    #[test]
    fn shared_tail_role() {
        let got = run("Alice", "Neither Bob nor Carl are knaves", "neither-nor").unwrap();
        assert_eq!(
            got,
            vec![
                Participant::new("Bob", Role::Knave),
                Participant::new("Carl", Role::Knave),
            ]
        );
    }

    #[test]
    fn roles_default_to_knight_without_role_words() {
        let got = run("Alice", "Bob and I are different", "different").unwrap();
        assert_eq!(
            got,
            vec![
                Participant::new("Bob", Role::Knight),
                Participant::new("Alice", Role::Knight),
            ]
        );
    }

    #[test]
    fn unbound_tail_roles_are_ignored() {
        let got = run(
            "Alice",
            "Bob and Carl are both knaves or both knights",
            "both-or-both",
        )
        .unwrap();
        assert!(got.iter().all(|p| p.role() == Role::Knight));
    }

    #[test]
    fn antecedent_comes_first() {
        let got = run("Alice", "Carl could claim that Bob is a knave", "could-claim").unwrap();
        assert_eq!(
            got,
            vec![
                Participant::new("Carl", Role::Knight),
                Participant::new("Bob", Role::Knave),
            ]
        );
    }

    #[test]
    fn speaker_antecedent_takes_head_role() {
        let got = run(
            "Alice",
            "Only a knave would say that Bob is a knight",
            "only-would-say",
        )
        .unwrap();
        assert_eq!(
            got,
            vec![
                Participant::new("Alice", Role::Knave),
                Participant::new("Bob", Role::Knight),
            ]
        );
    }

    #[test]
    fn knower_is_not_a_participant() {
        let got = run(
            "Alice",
            "I know that Bob is a knight and that Carl is a knave",
            "know-that",
        )
        .unwrap();
        assert_eq!(
            got,
            vec![
                Participant::new("Bob", Role::Knight),
                Participant::new("Carl", Role::Knave),
            ]
        );
    }

    #[test]
    fn stride_mismatch_is_malformed() {
        let err = run("Alice", "Bob is a knight and Carl is", "and").unwrap_err();
        assert!(matches!(err, KnavesError::MalformedClaim(_)));
    }

    #[test]
    fn unregistered_name_is_malformed() {
        let err = run("Alice", "Zed is a knight", "atomic").unwrap_err();
        assert!(matches!(err, KnavesError::MalformedClaim(_)));
    }

    #[test]
    fn bad_role_word_is_malformed() {
        let err = run("Alice", "Bob is a king", "atomic").unwrap_err();
        assert!(matches!(err, KnavesError::MalformedClaim(_)));
    }
}

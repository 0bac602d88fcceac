//! Shared helpers for integration tests

#![allow(dead_code)]

use knaves_rs::ast::Role;
use knaves_rs::instance::{Claim, Registry};
use knaves_rs::translator::catalog::{Lead, Part, Pattern};
use knaves_rs::translator::normalizer::{NAME, ROLE, ROLES};
use knaves_rs::translator::Participant;

/// Speaker of every synthesized claim
pub const SPEAKER: &str = "Ann";

/// Names handed out to name slots, in order
pub const CAST: &[&str] = &["Bob", "Cid", "Dee", "Eve", "Fay"];

/// Registry holding the speaker and the whole cast
pub fn registry() -> Registry {
    let mut names = vec![SPEAKER];
    names.extend_from_slice(CAST);
    Registry::from_names(&names).unwrap()
}

/// Highest arity worth generating for a pattern
pub const MAX_ITEMS: usize = 4;

/// Arities in `1..=MAX_ITEMS` a pattern accepts
pub fn arities(pattern: &Pattern) -> impl Iterator<Item = usize> + '_ {
    (1..=MAX_ITEMS).filter(move |&n| pattern.arity().admits(n))
}

#[derive(Default, Clone, Copy)]
struct Slot {
    name: Option<&'static str>,
    role: Option<Role>,
}

/// Builds a concrete claim of `pattern` with `n` items, together with the
/// participants it should yield
///
/// Name slots take successive cast members; role slots alternate between
/// knight and knave.
pub fn synthesize(pattern: &Pattern, n: usize) -> (Claim, Vec<Participant>) {
    let mut words = Vec::new();
    let mut cast = CAST.iter();
    let mut roles = [Role::Knight, Role::Knave].into_iter().cycle();

    let mut head = Slot::default();
    let mut tail = Slot::default();
    let mut items = vec![Slot::default(); n];

    for (part, token) in pattern.layout(n) {
        let slot = match part {
            Part::Head => Some(&mut head),
            Part::Item(k) => Some(&mut items[k]),
            Part::Tail => Some(&mut tail),
            Part::Joiner(_) => None,
        };
        match token {
            NAME => {
                let name = *cast.next().expect("cast is large enough");
                if let Some(slot) = slot {
                    slot.name.get_or_insert(name);
                }
                words.push(name.to_string());
            }
            ROLE | ROLES => {
                let role = roles.next().unwrap();
                if let Some(slot) = slot {
                    slot.role.get_or_insert(role);
                }
                let word = role.name().to_string();
                words.push(if token == ROLES { word + "s" } else { word });
            }
            other => words.push(other.to_string()),
        }
    }

    let mut expected = Vec::new();
    match pattern.lead() {
        Lead::Antecedent => expected.push(Participant::new(head.name.unwrap(), Role::Knight)),
        Lead::SpeakerAntecedent => {
            expected.push(Participant::new(SPEAKER, head.role.unwrap_or(Role::Knight)))
        }
        Lead::Plain | Lead::Ignored => {}
    }
    let shared = if pattern.has_shared_role() { tail.role } else { None };
    for item in items {
        let role = item.role.or(shared).unwrap_or(Role::Knight);
        expected.push(Participant::new(item.name.unwrap(), role));
    }

    (Claim::new(SPEAKER, words.join(" ")), expected)
}

/// Every assignment of `num_vars` variables as a knight predicate
pub fn assignments(num_vars: u32) -> impl Iterator<Item = impl Fn(u32) -> bool> {
    (0..1u32 << num_vars).map(|bits| move |var: u32| bits & (1 << (var - 1)) != 0)
}

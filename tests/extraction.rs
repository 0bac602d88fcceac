//! Round trips through participant extraction: a claim generated from a
//! pattern and a known cast gives that cast back, in order

mod common;

use common::{arities, synthesize, SPEAKER};
use knaves_rs::ast::Role;
use knaves_rs::instance::{Claim, Registry};
use knaves_rs::translator::catalog::{classify, pattern, patterns};
use knaves_rs::translator::{extract, normalize, Participant};
use knaves_rs::KnavesError;
use pretty_assertions::assert_eq;

#[test]
fn test_round_trip_every_pattern() {
    let registry = common::registry();
    for p in patterns() {
        for n in arities(p) {
            let (claim, expected) = synthesize(p, n);
            let found = classify(&normalize(&claim, &registry)).unwrap();
            assert_eq!(found.id(), p.id());
            let participants = extract(&claim, found, &registry).unwrap();
            assert_eq!(participants, expected, "claim '{}'", claim);
        }
    }
}

#[test]
fn test_first_person_becomes_the_speaker() {
    let registry = Registry::from_names(&[SPEAKER, "Bob"]).unwrap();
    let claim = Claim::new(SPEAKER, "Bob is a knight or I am a knave");
    let participants = extract(&claim, pattern("or").unwrap(), &registry).unwrap();
    assert_eq!(
        participants,
        vec![
            Participant::new("Bob", Role::Knight),
            Participant::new(SPEAKER, Role::Knave),
        ]
    );
}

#[test]
fn test_longest_conjunction() {
    let registry = Registry::from_names(&["A", "B", "C", "D", "E", "F"]).unwrap();
    let claim = Claim::new(
        "A",
        "B is a knight and C is a knave and D is a knight and E is a knave and F is a knight",
    );
    let roles: Vec<Role> = extract(&claim, pattern("and").unwrap(), &registry)
        .unwrap()
        .iter()
        .map(Participant::role)
        .collect();
    assert_eq!(
        roles,
        vec![Role::Knight, Role::Knave, Role::Knight, Role::Knave, Role::Knight]
    );
}

#[test]
fn test_similar_names_do_not_collide() {
    let registry = Registry::from_names(&["Ann", "Anna"]).unwrap();
    let claim = Claim::new("Ann", "Anna is a knave");
    assert_eq!(
        extract(&claim, pattern("atomic").unwrap(), &registry).unwrap(),
        vec![Participant::new("Anna", Role::Knave)]
    );
}

#[test]
fn test_wrong_pattern_is_malformed() {
    let registry = Registry::from_names(&["A", "B", "C"]).unwrap();
    let claim = Claim::new("A", "B is a knight and C is a knave");
    let err = extract(&claim, pattern("either-or").unwrap(), &registry).unwrap_err();
    assert!(matches!(err, KnavesError::MalformedClaim(_)));
}

//! Truth-table checks of the claim encoding
//!
//! For every claim the clauses must hold exactly when the speaker's knighthood
//! equals the truth of the proposition.

mod common;

use common::{arities, assignments, synthesize, SPEAKER};
use knaves_rs::ast::{Formula, Literal};
use knaves_rs::cnf::encode_claim;
use knaves_rs::instance::{Claim, Registry};
use knaves_rs::translator::catalog::patterns;
use knaves_rs::translator::Translator;

fn check(registry: &Registry, claim: &Claim) {
    let translation = Translator::new(registry)
        .translate(claim)
        .unwrap_or_else(|e| panic!("'{}': {}", claim, e));
    let speaker = registry.resolve(claim.speaker()).unwrap();
    let num_vars = registry.len() as u32;
    assert!(num_vars <= 6);

    for knight in assignments(num_vars) {
        assert_eq!(
            translation.clauses().is_satisfied_by(&knight),
            knight(speaker) == translation.formula().evaluate(&knight),
            "{} with formula {}",
            claim,
            translation.formula().display(registry)
        );
    }
}

#[test]
fn test_every_pattern_encodes_a_biconditional() {
    let registry = common::registry();
    for p in patterns() {
        for n in arities(p) {
            let (claim, _) = synthesize(p, n);
            check(&registry, &claim);
        }
    }
}

#[test]
fn test_self_reference() {
    let registry = Registry::from_names(&[SPEAKER, "Bob"]).unwrap();
    for text in [
        "I am a knave",
        "I am a knight",
        "Bob and I are different",
        "Bob and I are the same",
        "Neither Bob nor I are knaves",
        "Only a knave would say that I am a knight",
    ] {
        check(&registry, &Claim::new(SPEAKER, text));
    }
}

#[test]
fn test_family_semantics() {
    let registry = Registry::from_names(&[SPEAKER, "Bob", "Cid"]).unwrap();
    let translator = Translator::new(&registry);
    let b = Literal::positive(2);
    let c = Literal::positive(3);

    let cases = [
        ("Bob is a knight and Cid is a knave", Formula::all_of(&[b, !c])),
        ("Bob is a knave or Cid is a knave", Formula::any_of(&[!b, !c])),
        ("it's false that Bob is a knave", Formula::lit(!b).not()),
        ("Bob and Cid are different", Formula::lit(b).xor(Formula::lit(c))),
        ("Bob and Cid are the same", Formula::lit(b).iff(Formula::lit(c))),
        ("Neither Bob nor Cid are knights", Formula::any_of(&[b, c]).not()),
        ("Bob and Cid are both knaves", Formula::all_of(&[!b, !c])),
        ("Bob could claim that Cid is a knave", Formula::lit(b).implies(Formula::lit(!c))),
    ];

    for (text, expected) in cases {
        let translation = translator.translate(&Claim::new(SPEAKER, text)).unwrap();
        for knight in assignments(3) {
            assert_eq!(
                translation.formula().evaluate(&knight),
                expected.evaluate(&knight),
                "{}",
                text
            );
        }
    }
}

#[test]
fn test_encoder_without_translation() {
    // knight(1) ⟺ (2 ∨ 3 ∨ 4 ∨ 5)
    let lits: Vec<Literal> = (2..=5).map(Literal::positive).collect();
    let proposition = Formula::any_of(&lits);
    let clauses = encode_claim(1, &proposition);

    for knight in assignments(5) {
        assert_eq!(
            clauses.is_satisfied_by(&knight),
            knight(1) == proposition.evaluate(&knight)
        );
    }
}

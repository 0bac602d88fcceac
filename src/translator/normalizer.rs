//! Template normalization
//!
//! A claim becomes a template by rewriting it token by token:
//! - the standalone word `I` becomes the speaker's name
//! - every registered name becomes `name`
//! - `knight`/`knave` become `k_id` (plurals become `k_ids`)
//! - `am` becomes `is`
//! - everything is lowercased
//!
//! Trailing punctuation is split off into its own token, so `B,` is the name
//! `B` followed by `,`. Tokens are rendered back with punctuation attached to
//! the preceding word, which makes isomorphic claims produce identical
//! template strings.

use std::fmt;

use crate::instance::{Claim, Registry};

/// Placeholder for a participant name
pub const NAME: &str = "name";
/// Placeholder for a singular role word
pub const ROLE: &str = "k_id";
/// Placeholder for a plural role word
pub const ROLES: &str = "k_ids";

const PUNCTUATION: &[char] = &[',', ';', ':', '.', '!', '?'];

/// Splits text into words and trailing punctuation marks
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for word in text.split_whitespace() {
        let core = word.trim_end_matches(PUNCTUATION);
        if !core.is_empty() {
            tokens.push(core);
        }
        // punctuation is ASCII, so byte offsets are char boundaries
        for i in core.len()..word.len() {
            tokens.push(&word[i..i + 1]);
        }
    }
    tokens
}

/// Tokenizes a claim and rewrites first-person `I` to the speaker's name
pub(crate) fn claim_tokens(claim: &Claim) -> Vec<&str> {
    tokenize(claim.text())
        .into_iter()
        .map(|token| if token == "I" { claim.speaker() } else { token })
        .collect()
}

fn is_punctuation(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if PUNCTUATION.contains(&c))
}

fn render<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut text = String::new();
    for token in tokens {
        let token = token.as_ref();
        if !text.is_empty() && !is_punctuation(token) {
            text.push(' ');
        }
        text.push_str(token);
    }
    text
}

/// The shape of a claim: its words with names and role words replaced by placeholders
///
/// Two claims with the same connective structure and different names have
/// equal templates; the template string is the classification key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Template {
    text: String,
}

impl Template {
    /// Canonicalizes an already-normalized template string (spacing and punctuation)
    pub fn new(text: &str) -> Self {
        Self::from_tokens(&tokenize(text))
    }

    /// Renders template tokens into a template
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Self {
        Self {
            text: render(tokens),
        }
    }

    /// Returns the template string
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the template tokens
    pub fn tokens(&self) -> Vec<&str> {
        tokenize(&self.text)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Normalizes a claim into its template
///
/// Pure: the claim is not modified and the same input always yields the same
/// template.
pub fn normalize(claim: &Claim, registry: &Registry) -> Template {
    let tokens: Vec<String> = claim_tokens(claim)
        .into_iter()
        .map(|token| placeholder(token, registry))
        .collect();
    Template::from_tokens(&tokens)
}

fn placeholder(token: &str, registry: &Registry) -> String {
    if registry.contains(token) {
        return NAME.to_string();
    }
    let lower = token.to_lowercase();
    match lower.as_str() {
        "knight" | "knave" => ROLE.to_string(),
        "knights" | "knaves" => ROLES.to_string(),
        "am" => "is".to_string(),
        _ => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::from_names(&["Alice", "Bob", "Carl"]).unwrap()
    }

    #[test]
    fn tokenize_splits_trailing_punctuation() {
        assert_eq!(
            tokenize("of Bob and Carl, exactly one is a knight"),
            vec!["of", "Bob", "and", "Carl", ",", "exactly", "one", "is", "a", "knight"]
        );
        assert_eq!(tokenize("true:  that"), vec!["true", ":", "that"]);
        assert_eq!(tokenize("it's false"), vec!["it's", "false"]);
    }

    #[test]
    fn first_person_at_start_middle_and_end() {
        let r = registry();
        let start = normalize(&Claim::new("Alice", "I am a knave"), &r);
        assert_eq!(start.as_str(), "name is a k_id");

        let middle = normalize(&Claim::new("Alice", "Bob and I are different"), &r);
        assert_eq!(middle.as_str(), "name and name are different");

        let end = normalize(&Claim::new("Alice", "Carl could say that I is a knight"), &r);
        assert_eq!(end.as_str(), "name could say that name is a k_id");
    }

    #[test]
    fn i_inside_words_is_untouched() {
        let r = registry();
        let t = normalize(&Claim::new("Alice", "It's false that Bob is a knight"), &r);
        assert_eq!(t.as_str(), "it's false that name is a k_id");
    }

    #[test]
    fn isomorphic_claims_share_a_template() {
        let r = registry();
        let a = normalize(&Claim::new("Alice", "Bob is a knight or Carl is a knave"), &r);
        let b = normalize(&Claim::new("Carl", "Alice is a knave or I am a knight"), &r);
        assert_eq!(a, b);
    }

    #[test]
    fn plural_roles_and_punctuation() {
        let r = registry();
        let t = normalize(&Claim::new("Alice", "Of Bob and Carl, exactly one is a knave"), &r);
        assert_eq!(t.as_str(), "of name and name, exactly one is a k_id");

        let t = normalize(&Claim::new("Alice", "Neither Bob nor Carl are knaves"), &r);
        assert_eq!(t.as_str(), "neither name nor name are k_ids");
    }

    #[test]
    fn names_must_match_whole_words() {
        let r = Registry::from_names(&["Ann"]).unwrap();
        let t = normalize(&Claim::new("Ann", "Anna and Ann are knights"), &r);
        assert_eq!(t.as_str(), "anna and name are k_ids");
    }

    #[test]
    fn template_new_canonicalizes_spacing() {
        assert_eq!(
            Template::new("of name and name ,  exactly one is a k_id").as_str(),
            "of name and name, exactly one is a k_id"
        );
    }
}

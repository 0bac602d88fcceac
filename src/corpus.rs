//! Puzzle corpus cleaning
//!
//! A corpus is plain text with puzzles separated by `###`. Each puzzle is a
//! header naming the inhabitants followed by sentences of the form
//! `<Name> says, '<claim>.'`.
//!
//! Two header styles are accepted:
//! - `A, B and C: <first sentence>. ...` where the names precede the colon
//! - `You meet two inhabitants: Zoey and Mel. ...` where the names follow it
//!   and end at the first period

use crate::error::{KnavesError, Result};
use crate::instance::PuzzleInstance;
use crate::translator::{TemplateLog, Translator};
use log::warn;

const SEPARATOR: &str = "###";

const QUOTES: &[char] = &['\'', '"', '`', '‘', '’', '“', '”'];

const REPORTERS: &[&str] = &[
    "claims, ",
    "claims that ",
    "says, ",
    "says that ",
    "tells you, ",
    "tells you that ",
];

/// A cleaned puzzle: declared names plus `(speaker, claim)` pairs in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleText {
    /// Declared inhabitants in header order
    pub names: Vec<String>,
    /// Claims in the order they appear; a speaker may occur several times
    pub claims: Vec<(String, String)>,
}

impl PuzzleText {
    /// Registers the names and translates every claim
    pub fn translate(&self) -> Result<PuzzleInstance> {
        Translator::translate_puzzle(&self.names, &self.claims)
    }
}

/// Splits a corpus into its non-empty puzzles
pub fn split_corpus(text: &str) -> Vec<&str> {
    text.split(SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Collects the templates of every puzzle in a corpus that translates
///
/// Puzzles that fail to parse or translate are skipped with a warning.
pub fn template_log(corpus: &str) -> TemplateLog {
    let mut log = TemplateLog::new();
    for (i, text) in split_corpus(corpus).iter().enumerate() {
        match parse_puzzle(text).and_then(|p| p.translate()) {
            Ok(puzzle) => log.record_puzzle(&puzzle),
            Err(e) => warn!("skipping puzzle {}: {}", i + 1, e),
        }
    }
    log
}

/// Cleans one puzzle into names and claims
///
/// # Errors
/// Returns `PuzzleFormat` if the header has no colon or no names, if a
/// sentence has no claim after its first word, or if a sentence starts with a
/// word that is not a declared name.
pub fn parse_puzzle(text: &str) -> Result<PuzzleText> {
    let (before, after) = text
        .split_once(':')
        .ok_or_else(|| KnavesError::PuzzleFormat(format!("no ':' in header of '{}'", text.trim())))?;

    let (names, body) = if is_name_list(before) {
        (split_names(before), after)
    } else {
        let (list, rest) = after.split_once('.').unwrap_or((after, ""));
        (split_names(list), rest)
    };
    if names.is_empty() {
        return Err(KnavesError::PuzzleFormat(format!(
            "no names declared in '{}'",
            text.trim()
        )));
    }

    let mut claims = Vec::new();
    for sentence in body.split('.') {
        let sentence = sentence.trim_start_matches(|c: char| c.is_whitespace() || QUOTES.contains(&c));
        let sentence = sentence.trim_end();
        if sentence.is_empty() {
            continue;
        }

        let (speaker, rest) = sentence.split_once(char::is_whitespace).ok_or_else(|| {
            KnavesError::PuzzleFormat(format!("no claim after '{}'", sentence))
        })?;
        if !names.iter().any(|n| n == speaker) {
            return Err(KnavesError::PuzzleFormat(format!(
                "'{}' is not one of the declared names {:?}",
                speaker, names
            )));
        }
        claims.push((speaker.to_string(), clean_claim(rest).to_string()));
    }

    Ok(PuzzleText { names, claims })
}

/// Strips one reporting phrase and the surrounding quote characters
fn clean_claim(text: &str) -> &str {
    let text = text.trim();
    let text = REPORTERS
        .iter()
        .find_map(|r| text.strip_prefix(r))
        .unwrap_or(text);
    text.trim_matches(|c: char| c.is_whitespace() || QUOTES.contains(&c))
}

fn name_words(list: &str) -> impl Iterator<Item = &str> {
    list.split(',')
        .flat_map(str::split_whitespace)
        .filter(|w| !w.eq_ignore_ascii_case("and"))
}

/// A header is a bare name list when every word but `and` is capitalized
fn is_name_list(header: &str) -> bool {
    let mut words = name_words(header).peekable();
    words.peek().is_some() && words.all(|w| w.starts_with(char::is_uppercase))
}

fn split_names(list: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for word in name_words(list) {
        if !names.iter().any(|n| n == word) {
            names.push(word.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pair(speaker: &str, claim: &str) -> (String, String) {
        (speaker.to_string(), claim.to_string())
    }

    #[test]
    fn names_before_colon() {
        let text = r#"A, B: A says, "B is a knight." B says, "A and I are different.""#;
        let puzzle = parse_puzzle(text).unwrap();
        assert_eq!(puzzle.names, vec!["A", "B"]);
        assert_eq!(
            puzzle.claims,
            vec![pair("A", "B is a knight"), pair("B", "A and I are different")]
        );
    }

    #[test]
    fn names_after_colon() {
        let text = "You meet two inhabitants: Zoey and Mel. Zoey tells you that Mel is a knave. \
                    Mel says, `Neither Zoey nor I are knights.'";
        let puzzle = parse_puzzle(text).unwrap();
        assert_eq!(puzzle.names, vec!["Zoey", "Mel"]);
        assert_eq!(
            puzzle.claims,
            vec![
                pair("Zoey", "Mel is a knave"),
                pair("Mel", "Neither Zoey nor I are knights"),
            ]
        );
    }

    #[test]
    fn oxford_comma_names() {
        let text = "You meet three inhabitants: Ann, Bob, and Cid. Ann claims that Bob is a knave.";
        let puzzle = parse_puzzle(text).unwrap();
        assert_eq!(puzzle.names, vec!["Ann", "Bob", "Cid"]);
        assert_eq!(puzzle.claims, vec![pair("Ann", "Bob is a knave")]);
    }

    #[test]
    fn repeated_speaker_keeps_every_claim() {
        let text = "A, B: A says that B is a knight. A claims, 'I am a knave.'";
        let puzzle = parse_puzzle(text).unwrap();
        assert_eq!(
            puzzle.claims,
            vec![pair("A", "B is a knight"), pair("A", "I am a knave")]
        );
    }

    #[test]
    fn undeclared_speaker_is_a_format_error() {
        let err = parse_puzzle("A, B: C says, 'A is a knight.'").unwrap_err();
        assert!(matches!(err, KnavesError::PuzzleFormat(_)));
    }

    #[test]
    fn missing_colon_is_a_format_error() {
        let err = parse_puzzle("A says that B is a knight.").unwrap_err();
        assert!(matches!(err, KnavesError::PuzzleFormat(_)));
    }

    #[test]
    fn split_skips_empty_puzzles() {
        let corpus = "A: A says, 'I am a knight.'###\n### B: B says, 'I am a knave.' ###";
        let puzzles = split_corpus(corpus);
        assert_eq!(puzzles.len(), 2);
        assert!(puzzles[1].starts_with("B:"));
    }

    #[test]
    fn cleaned_puzzle_translates() {
        let puzzle = parse_puzzle(r#"A, B: A says, "B is a knight." B says, "A and I are different.""#)
            .unwrap()
            .translate()
            .unwrap();
        assert_eq!(puzzle.translations().len(), 2);
    }
}

//! Lemmatization
//!
//! Command vocabulary is matched on lemmas, so inflected nouns such as
//! "buildings" must reduce to "building". Like a WordNet noun lemmatizer,
//! the default implementation only undoes plural morphology and leaves
//! every other word (including "highest" and "constructed") untouched.

use std::collections::HashMap;

/// Reduces a token to its dictionary form
pub trait Lemmatizer {
    fn lemmatize(&self, token: &str) -> String;
}

impl<L: Lemmatizer + ?Sized> Lemmatizer for Box<L> {
    fn lemmatize(&self, token: &str) -> String {
        (**self).lemmatize(token)
    }
}

/// Irregular plurals and plurals the detachment rules would get wrong
const EXCEPTIONS: &[(&str, &str)] = &[
    ("buses", "bus"),
    ("children", "child"),
    ("data", "datum"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("indices", "index"),
    ("lives", "life"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("teeth", "tooth"),
    ("women", "woman"),
    ("leaves", "leaf"),
    ("vertices", "vertex"),
];

/// Words ending in "s" that are already in dictionary form
const INVARIANT: &[&str] = &[
    "always", "analysis", "as", "basis", "campus", "chaos", "gas", "has", "is", "its",
    "news", "perhaps", "series", "species", "status", "this", "thus", "us", "was", "yes",
];

/// Suffix detachment rules, most specific first
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("ies", "y"),
    ("s", ""),
];

/// Rule-based plural-noun lemmatizer
#[derive(Debug, Clone)]
pub struct NounLemmatizer {
    exceptions: HashMap<&'static str, &'static str>,
}

impl Default for NounLemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl NounLemmatizer {
    /// Create a lemmatizer with the built-in exception table
    pub fn new() -> Self {
        Self {
            exceptions: EXCEPTIONS.iter().copied().collect(),
        }
    }

    /// Builder: add an irregular plural
    pub fn with_exception(mut self, plural: &'static str, lemma: &'static str) -> Self {
        self.exceptions.insert(plural, lemma);
        self
    }

    fn detach(token: &str) -> Option<String> {
        let lower = token.to_lowercase();
        if lower.chars().count() <= 3
            || INVARIANT.contains(&lower.as_str())
            || lower.ends_with("ss")
            || lower.ends_with("us")
            || lower.ends_with("is")
            || !lower.chars().all(|c| c.is_alphabetic() || c == '-')
        {
            return None;
        }

        SUFFIX_RULES.iter().find_map(|(suffix, replacement)| {
            lower.ends_with(suffix).then(|| {
                // Slice the original token so its case survives
                let stem = &token[..token.len() - suffix.len()];
                format!("{}{}", stem, replacement)
            })
        })
    }
}

impl Lemmatizer for NounLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        if let Some(lemma) = self.exceptions.get(token.to_lowercase().as_str()) {
            return (*lemma).to_string();
        }
        Self::detach(token).unwrap_or_else(|| token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lemma(token: &str) -> String {
        NounLemmatizer::new().lemmatize(token)
    }

    #[test]
    fn test_regular_plurals() {
        assert_eq!(lemma("buildings"), "building");
        assert_eq!(lemma("meters"), "meter");
        assert_eq!(lemma("houses"), "house");
        assert_eq!(lemma("churches"), "church");
        assert_eq!(lemma("boxes"), "box");
        assert_eq!(lemma("stories"), "story");
        assert_eq!(lemma("glasses"), "glass");
    }

    #[test]
    fn test_non_nouns_unchanged() {
        assert_eq!(lemma("highest"), "highest");
        assert_eq!(lemma("constructed"), "constructed");
        assert_eq!(lemma("before"), "before");
        assert_eq!(lemma("1940"), "1940");
        assert_eq!(lemma("the"), "the");
        assert_eq!(lemma("left"), "left");
    }

    #[test]
    fn test_invariant_words() {
        assert_eq!(lemma("was"), "was");
        assert_eq!(lemma("status"), "status");
        assert_eq!(lemma("class"), "class");
        assert_eq!(lemma("analysis"), "analysis");
    }

    #[test]
    fn test_irregular_plurals() {
        assert_eq!(lemma("people"), "person");
        assert_eq!(lemma("Children"), "child");
        let custom = NounLemmatizer::new().with_exception("storeys", "storey");
        assert_eq!(custom.lemmatize("storeys"), "storey");
    }

    #[test]
    fn test_case_is_preserved() {
        assert_eq!(lemma("Buildings"), "Building");
        assert_eq!(lemma("BUILDINGS"), "BUILDING");
    }
}

//! Part-of-speech tagging
//!
//! Taggers emit Penn Treebank tags; downstream code only sees the coarse
//! [`Category`] each tag collapses to.

use cityquery_core::Result;
use serde::{Deserialize, Serialize};

/// Coarse part-of-speech category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Noun,
    Adjective,
    Verb,
    /// Prepositions and subordinating conjunctions (Penn `IN`)
    Preposition,
    Number,
    Other,
}

/// A Penn Treebank tag such as `NN`, `JJS` or `VBN`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PennTag(String);

impl PennTag {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Collapse to a coarse category by tag prefix
    pub fn category(&self) -> Category {
        let tag = self.0.as_str();
        if tag.starts_with('N') {
            Category::Noun
        } else if tag.starts_with("JJ") {
            Category::Adjective
        } else if tag.starts_with("VB") {
            Category::Verb
        } else if tag.starts_with("IN") {
            Category::Preposition
        } else if tag.starts_with("CD") {
            Category::Number
        } else {
            Category::Other
        }
    }
}

impl std::fmt::Display for PennTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Assigns a Penn Treebank tag to every token.
///
/// Implementations must return exactly one tag per input token, in order.
/// Infrastructure failures are reported as
/// [`cityquery_core::Error::TaggingUnavailable`].
pub trait Tagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, PennTag)>>;
}

impl<T: Tagger + ?Sized> Tagger for Box<T> {
    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, PennTag)>> {
        (**self).tag(tokens)
    }
}

const DETERMINERS: &[&str] = &[
    "a", "all", "an", "any", "another", "each", "every", "no", "some", "that", "the", "these",
    "this", "those",
];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "after", "although", "at", "because", "before", "behind", "below",
    "beside", "between", "by", "during", "for", "from", "if", "in", "inside", "into", "like",
    "near", "of", "on", "outside", "over", "since", "than", "through", "under", "until",
    "while", "with", "within", "without",
];

const CLOSED_CLASS: &[(&str, &str)] = &[
    ("to", "TO"),
    ("and", "CC"),
    ("or", "CC"),
    ("but", "CC"),
    ("nor", "CC"),
    ("i", "PRP"),
    ("me", "PRP"),
    ("you", "PRP"),
    ("it", "PRP"),
    ("we", "PRP"),
    ("us", "PRP"),
    ("they", "PRP"),
    ("them", "PRP"),
    ("my", "PRP$"),
    ("your", "PRP$"),
    ("its", "PRP$"),
    ("our", "PRP$"),
    ("their", "PRP$"),
    ("can", "MD"),
    ("could", "MD"),
    ("will", "MD"),
    ("would", "MD"),
    ("should", "MD"),
    ("may", "MD"),
    ("might", "MD"),
    ("must", "MD"),
    ("which", "WDT"),
    ("who", "WP"),
    ("what", "WP"),
    ("where", "WRB"),
    ("when", "WRB"),
    ("there", "EX"),
    ("not", "RB"),
    ("n't", "RB"),
    ("very", "RB"),
    ("only", "RB"),
    ("also", "RB"),
    ("please", "UH"),
    ("'s", "POS"),
    ("is", "VBZ"),
    ("are", "VBP"),
    ("was", "VBD"),
    ("were", "VBD"),
    ("be", "VB"),
    ("been", "VBN"),
    ("being", "VBG"),
    ("has", "VBZ"),
    ("have", "VBP"),
    ("had", "VBD"),
    ("do", "VBP"),
    ("does", "VBZ"),
    ("did", "VBD"),
];

const NUMBER_WORDS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand",
];

const OPEN_CLASS: &[(&str, &str)] = &[
    // Imperative command verbs
    ("select", "VB"),
    ("show", "VB"),
    ("find", "VB"),
    ("highlight", "VB"),
    ("pick", "VB"),
    ("choose", "VB"),
    ("get", "VB"),
    ("give", "VB"),
    ("list", "VB"),
    ("mark", "VB"),
    ("display", "VB"),
    // Life-cycle participles
    ("built", "VBN"),
    ("constructed", "VBN"),
    ("erected", "VBN"),
    ("completed", "VBN"),
    ("demolished", "VBN"),
    ("destroyed", "VBN"),
    ("razed", "VBN"),
    ("torn", "VBN"),
    // Gradable adjectives
    ("high", "JJ"),
    ("low", "JJ"),
    ("tall", "JJ"),
    ("short", "JJ"),
    ("big", "JJ"),
    ("small", "JJ"),
    ("large", "JJ"),
    ("old", "JJ"),
    ("new", "JJ"),
    ("higher", "JJR"),
    ("lower", "JJR"),
    ("taller", "JJR"),
    ("shorter", "JJR"),
    ("bigger", "JJR"),
    ("smaller", "JJR"),
    ("larger", "JJR"),
    ("older", "JJR"),
    ("newer", "JJR"),
    ("highest", "JJS"),
    ("lowest", "JJS"),
    ("tallest", "JJS"),
    ("shortest", "JJS"),
    ("biggest", "JJS"),
    ("smallest", "JJS"),
    ("largest", "JJS"),
    ("oldest", "JJS"),
    ("newest", "JJS"),
    // Domain nouns
    ("building", "NN"),
    ("house", "NN"),
    ("tower", "NN"),
    ("structure", "NN"),
    ("object", "NN"),
    ("meter", "NN"),
    ("metre", "NN"),
    ("year", "NN"),
    ("height", "NN"),
    ("side", "NN"),
    ("camera", "NN"),
    ("view", "NN"),
    ("roof", "NN"),
    ("wall", "NN"),
    ("city", "NN"),
];

/// Deterministic lexicon tagger.
///
/// Closed-class words and the command vocabulary come from fixed tables;
/// unknown words fall back to suffix heuristics and finally to `NN`, the
/// same default a statistical tagger gives unseen words.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger;

impl LexiconTagger {
    pub fn new() -> Self {
        Self
    }

    fn tag_one(&self, token: &str, prev: Option<&str>) -> &'static str {
        let lower = token.to_lowercase();
        let word = lower.as_str();

        if is_numeric(word) || NUMBER_WORDS.contains(&word) {
            return "CD";
        }
        if !word.chars().any(|c| c.is_alphanumeric()) {
            return match word {
                "." | "!" | "?" => ".",
                "," => ",",
                ":" | ";" => ":",
                "(" => "(",
                ")" => ")",
                _ => "SYM",
            };
        }
        if DETERMINERS.contains(&word) {
            return "DT";
        }
        if PREPOSITIONS.contains(&word) {
            return "IN";
        }
        if let Some(tag) = lookup(CLOSED_CLASS, word) {
            return tag;
        }

        let after_determiner =
            prev.is_some_and(|p| DETERMINERS.contains(&p.to_lowercase().as_str()));

        // "on the left" is a noun, "left buildings" an adjective
        if word == "left" || word == "right" {
            return if after_determiner { "NN" } else { "JJ" };
        }
        if let Some(tag) = lookup(OPEN_CLASS, word) {
            return tag;
        }

        suffix_tag(word, after_determiner, prev.is_some() && starts_upper(token))
    }
}

impl Tagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<(String, PennTag)>> {
        Ok(tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let prev = i.checked_sub(1).map(|p| tokens[p].as_str());
                (token.clone(), PennTag::new(self.tag_one(token, prev)))
            })
            .collect())
    }
}

fn lookup(table: &[(&str, &'static str)], word: &str) -> Option<&'static str> {
    table.iter().find(|(w, _)| *w == word).map(|(_, tag)| *tag)
}

fn is_numeric(word: &str) -> bool {
    let digits = word.replace(',', "");
    !digits.is_empty()
        && digits.parse::<f64>().is_ok()
        && digits.starts_with(|c: char| c.is_ascii_digit())
}

fn starts_upper(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_uppercase())
}

fn suffix_tag(word: &str, after_determiner: bool, capitalized_mid_sentence: bool) -> &'static str {
    if capitalized_mid_sentence {
        return "NNP";
    }
    let len = word.chars().count();
    if len > 5 && word.ends_with("est") {
        "JJS"
    } else if len > 4 && word.ends_with("ed") {
        "VBN"
    } else if len > 4 && word.ends_with("ing") {
        if after_determiner { "NN" } else { "VBG" }
    } else if len > 3 && word.ends_with("ly") {
        "RB"
    } else if ["ous", "ful", "ive", "able", "ible", "al", "ic"]
        .iter()
        .any(|s| len > s.len() + 2 && word.ends_with(s))
    {
        "JJ"
    } else {
        "NN"
    }
}

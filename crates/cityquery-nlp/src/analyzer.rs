//! Query analysis: tokenize, lemmatize, tag

use crate::lemmatizer::{Lemmatizer, NounLemmatizer};
use crate::lexer::tokenize;
use crate::tagger::{Category, LexiconTagger, Tagger};
use cityquery_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A tagged token of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Text as it appeared in the query
    pub surface: String,
    /// Dictionary form used for vocabulary matching
    pub lemma: String,
    pub category: Category,
}

impl Token {
    pub fn new<S: Into<String>, L: Into<String>>(surface: S, lemma: L, category: Category) -> Self {
        Self {
            surface: surface.into(),
            lemma: lemma.into(),
            category,
        }
    }
}

/// Lexical analyzer
///
/// Analysis is a pure function of the query text for a fixed lemmatizer
/// and tagger. Unknown words are never an error; they come out as
/// [`Category::Other`] or as whatever the tagger guesses.
pub struct Analyzer<L = NounLemmatizer, T = LexiconTagger> {
    lemmatizer: L,
    tagger: T,
    fold_case: bool,
}

impl Analyzer {
    /// Create an analyzer with the built-in lemmatizer and tagger
    pub fn new() -> Self {
        Self::with_components(NounLemmatizer::new(), LexiconTagger::new())
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Lemmatizer, T: Tagger> Analyzer<L, T> {
    /// Create an analyzer from custom collaborators
    pub fn with_components(lemmatizer: L, tagger: T) -> Self {
        Self {
            lemmatizer,
            tagger,
            fold_case: false,
        }
    }

    /// Builder: lowercase lemmas so "Buildings" matches "building"
    pub fn fold_case(mut self, fold: bool) -> Self {
        self.fold_case = fold;
        self
    }

    /// Analyze a command into tagged tokens
    pub fn analyze(&self, query: &str) -> Result<Vec<Token>> {
        let surfaces = tokenize(query);
        let lemmas: Vec<String> = surfaces
            .iter()
            .map(|s| {
                let lemma = self.lemmatizer.lemmatize(s);
                if self.fold_case { lemma.to_lowercase() } else { lemma }
            })
            .collect();

        let tagged = self.tagger.tag(&lemmas)?;
        if tagged.len() != lemmas.len() {
            return Err(Error::TaggingUnavailable(format!(
                "tagger returned {} tags for {} tokens",
                tagged.len(),
                lemmas.len()
            )));
        }

        let tokens: Vec<Token> = surfaces
            .into_iter()
            .zip(tagged)
            .map(|(surface, (lemma, tag))| Token {
                surface,
                lemma,
                category: tag.category(),
            })
            .collect();

        debug!("Analyzed query {:?} into {} tokens", query, tokens.len());
        Ok(tokens)
    }
}

//! CityQuery Lexical Analyzer
//!
//! Turns a free-text command into a sequence of tagged tokens.
//!
//! # Overview
//!
//! Analysis runs in three steps:
//! - Tokenization (Treebank-style word splitting, case preserved)
//! - Lemmatization (plural nouns reduced to their dictionary form)
//! - Part-of-speech tagging (Penn Treebank tags collapsed to coarse categories)
//!
//! Lemmatization and tagging are pluggable through the [`Lemmatizer`] and
//! [`Tagger`] traits.

pub mod analyzer;
pub mod lemmatizer;
pub mod lexer;
pub mod tagger;

pub use analyzer::{Analyzer, Token};
pub use lemmatizer::{Lemmatizer, NounLemmatizer};
pub use lexer::{Lexeme, tokenize};
pub use tagger::{Category, LexiconTagger, PennTag, Tagger};

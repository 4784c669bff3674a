//! Predicate building
//!
//! Maps the tagged tokens of a command to selection predicates. Only set
//! membership matters: word order and repetitions are ignored, and each
//! rule fires independently.

use crate::config::QueryConfig;
use crate::predicate::{Comparison, DateField, Extremum, Predicate, QueryPlan, Side, SkipReason};
use cityquery_core::Year;
use cityquery_nlp::{Category, Token};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Command vocabulary (lemma forms)
pub mod vocab {
    pub const BUILDING: &str = "building";

    pub const HIGHEST: &str = "highest";
    pub const LOWEST: &str = "lowest";
    pub const HIGH: &str = "high";
    pub const LOW: &str = "low";
    pub const HIGHER: &str = "higher";
    pub const LOWER: &str = "lower";

    pub const CONSTRUCTION_VERBS: &[&str] = &["constructed"];
    pub const DEMOLITION_VERBS: &[&str] = &["demolished", "destroyed"];

    pub const BEFORE: &str = "before";
    pub const AFTER: &str = "after";
    pub const IN: &str = "in";

    pub const LEFT: &str = "left";
    pub const RIGHT: &str = "right";
}

/// Lemma sets per category, plus number tokens in query order
#[derive(Debug, Default)]
pub struct VocabularySets<'a> {
    pub nouns: HashSet<&'a str>,
    pub adjectives: HashSet<&'a str>,
    pub verbs: HashSet<&'a str>,
    pub prepositions: HashSet<&'a str>,
    pub numbers: Vec<&'a str>,
}

impl<'a> VocabularySets<'a> {
    pub fn from_tokens(tokens: &'a [Token]) -> Self {
        let mut sets = Self::default();
        for token in tokens {
            let lemma = token.lemma.as_str();
            match token.category {
                Category::Noun => {
                    sets.nouns.insert(lemma);
                }
                Category::Adjective => {
                    sets.adjectives.insert(lemma);
                }
                Category::Verb => {
                    sets.verbs.insert(lemma);
                }
                Category::Preposition => {
                    sets.prepositions.insert(lemma);
                }
                Category::Number => sets.numbers.push(lemma),
                Category::Other => {}
            }
        }
        sets
    }

    /// First number token read as a height
    pub fn first_height(&self) -> Option<f64> {
        self.numbers
            .first()
            .and_then(|n| n.replace(',', "").parse::<f64>().ok())
            .filter(|h| h.is_finite())
    }

    /// First number token read as a year
    pub fn first_year(&self) -> Option<Year> {
        self.numbers
            .first()
            .and_then(|n| n.replace(',', "").parse::<i32>().ok())
            .map(Year::new)
    }
}

/// Builds predicates from tagged tokens
#[derive(Debug, Clone, Default)]
pub struct PredicateBuilder {
    config: QueryConfig,
}

impl PredicateBuilder {
    /// Create a new predicate builder
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Build the plan for a command
    pub fn build(&self, tokens: &[Token]) -> QueryPlan {
        let sets = VocabularySets::from_tokens(tokens);

        if !sets.nouns.contains(vocab::BUILDING) {
            debug!("No '{}' noun in query, nothing to select", vocab::BUILDING);
            return QueryPlan::skipped(SkipReason::EmptyQuery);
        }

        let mut plan = QueryPlan::default();
        self.build_height(&sets, &mut plan);
        self.build_dates(&sets, &mut plan);
        self.build_position(&sets, &mut plan);

        for predicate in &plan.predicates {
            debug!("Built predicate: {}", predicate);
        }
        for reason in &plan.skipped {
            warn!("Skipped part of query: {}", reason);
        }

        plan
    }

    fn build_height(&self, sets: &VocabularySets<'_>, plan: &mut QueryPlan) {
        let adjs = &sets.adjectives;

        if adjs.contains(vocab::HIGHEST) {
            plan.predicates.push(Predicate::HeightExtremum(Extremum::Max));
        }
        if adjs.contains(vocab::LOWEST) {
            plan.predicates.push(Predicate::HeightExtremum(Extremum::Min));
        }
        if adjs.contains(vocab::HIGH) {
            plan.predicates.push(Predicate::HeightThreshold {
                op: Comparison::Greater,
                value: self.config.high_threshold,
            });
        }
        if adjs.contains(vocab::LOW) {
            plan.predicates.push(Predicate::HeightThreshold {
                op: Comparison::Less,
                value: self.config.low_threshold,
            });
        }

        for (keyword, op) in [
            (vocab::HIGHER, Comparison::Greater),
            (vocab::LOWER, Comparison::Less),
        ] {
            if !adjs.contains(keyword) {
                continue;
            }
            match sets.first_height() {
                Some(value) => plan.predicates.push(Predicate::HeightThreshold { op, value }),
                None => plan.skipped.push(SkipReason::MissingNumberArgument {
                    keyword: keyword.to_string(),
                }),
            }
        }
    }

    fn build_dates(&self, sets: &VocabularySets<'_>, plan: &mut QueryPlan) {
        let ops: Vec<Comparison> = [
            (vocab::BEFORE, Comparison::Less),
            (vocab::AFTER, Comparison::Greater),
            (vocab::IN, Comparison::Equal),
        ]
        .into_iter()
        .filter(|(word, _)| sets.prepositions.contains(word))
        .map(|(_, op)| op)
        .collect();

        for (verbs, field) in [
            (vocab::CONSTRUCTION_VERBS, DateField::YearOfConstruction),
            (vocab::DEMOLITION_VERBS, DateField::YearOfDemolition),
        ] {
            let Some(verb) = verbs.iter().find(|v| sets.verbs.contains(*v)) else {
                continue;
            };
            if ops.is_empty() {
                debug!("'{}' without before/after/in, no date predicate", verb);
                continue;
            }
            let Some(year) = sets.first_year() else {
                plan.skipped.push(SkipReason::MissingNumberArgument {
                    keyword: verb.to_string(),
                });
                continue;
            };
            for &op in &ops {
                plan.predicates.push(Predicate::DateComparison { field, op, year });
            }
        }
    }

    fn build_position(&self, sets: &VocabularySets<'_>, plan: &mut QueryPlan) {
        for (word, side) in [(vocab::LEFT, Side::Left), (vocab::RIGHT, Side::Right)] {
            if sets.adjectives.contains(word) || sets.nouns.contains(word) {
                plan.predicates.push(Predicate::PositionSide(side));
            }
        }
    }
}

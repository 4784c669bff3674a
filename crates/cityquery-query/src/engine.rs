//! Query engine
//!
//! Ties analysis, predicate building and selection execution together.

use crate::builder::PredicateBuilder;
use crate::config::QueryConfig;
use crate::executor::{SelectionExecutor, SelectionOutcome};
use crate::predicate::QueryPlan;
use cityquery_core::{Result, SelectionContext};
use cityquery_nlp::{Analyzer, Lemmatizer, LexiconTagger, NounLemmatizer, Tagger};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of running a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub plan: QueryPlan,
    pub outcome: SelectionOutcome,
}

/// Natural-language selection engine
pub struct QueryEngine<L = NounLemmatizer, T = LexiconTagger> {
    analyzer: Analyzer<L, T>,
    builder: PredicateBuilder,
    executor: SelectionExecutor,
}

impl QueryEngine {
    /// Create an engine with the built-in lemmatizer and tagger
    pub fn new(config: QueryConfig) -> Self {
        let analyzer = Analyzer::new().fold_case(config.fold_case);
        Self::with_analyzer(analyzer, config)
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(QueryConfig::default())
    }
}

impl<L: Lemmatizer, T: Tagger> QueryEngine<L, T> {
    /// Create an engine around a custom analyzer
    pub fn with_analyzer(analyzer: Analyzer<L, T>, config: QueryConfig) -> Self {
        Self {
            analyzer,
            executor: SelectionExecutor::new(config.lateral_axis),
            builder: PredicateBuilder::new(config),
        }
    }

    /// Interpret a command without touching any selection
    pub fn plan(&self, query: &str) -> Result<QueryPlan> {
        let tokens = self.analyzer.analyze(query)?;
        Ok(self.builder.build(&tokens))
    }

    /// Interpret a command and narrow the selection of `ctx`
    pub fn run<C>(&self, query: &str, ctx: &mut C) -> Result<QueryResult>
    where
        C: SelectionContext + ?Sized,
    {
        let plan = self.plan(query)?;
        let outcome = self.executor.apply(&plan.predicates, ctx)?;

        info!(
            "Query '{}' applied {} predicates, {} objects selected",
            query,
            plan.predicates.len(),
            outcome.selected.len()
        );

        Ok(QueryResult { plan, outcome })
    }
}

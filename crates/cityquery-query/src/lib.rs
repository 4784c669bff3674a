//! CityQuery Query Engine
//!
//! Interprets tagged command tokens and narrows the scene selection.
//!
//! # Overview
//!
//! The query engine implements:
//! - Predicate building from vocabulary membership
//! - Stage planning (height, date and position stages)
//! - Sequential selection execution over a host [`SelectionContext`]
//!
//! [`SelectionContext`]: cityquery_core::SelectionContext

pub mod builder;
pub mod config;
pub mod engine;
pub mod executor;
pub mod planner;
pub mod predicate;

#[cfg(test)]
pub(crate) mod test_support;

pub use builder::{PredicateBuilder, VocabularySets};
pub use config::QueryConfig;
pub use engine::{QueryEngine, QueryResult};
pub use executor::{SelectionExecutor, SelectionOutcome, SelectionStats};
pub use planner::{Stage, plan_stages};
pub use predicate::{Comparison, DateField, Extremum, Predicate, QueryPlan, Side, SkipReason};

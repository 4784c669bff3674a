//! Stage planning
//!
//! Groups predicates into the stages the executor runs one after another.
//! Each height predicate is a stage of its own. All date predicates share a
//! single stage, as do all position predicates; within those stages an
//! object is kept when any clause matches.

use crate::predicate::{Comparison, DateField, Extremum, Predicate, Side};
use cityquery_core::Year;

/// One selection stage
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Keep the single best object by height
    Extremum(Extremum),

    /// Keep every object whose height passes the comparison
    Threshold { op: Comparison, value: f64 },

    /// Keep every object matching any date clause
    Date(Vec<(DateField, Comparison, Year)>),

    /// Keep every object lying entirely on any listed side
    Position(Vec<Side>),
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Extremum(_) => "extremum",
            Stage::Threshold { .. } => "threshold",
            Stage::Date(_) => "date",
            Stage::Position(_) => "position",
        }
    }
}

/// Group predicates into stages, preserving first-appearance order
pub fn plan_stages(predicates: &[Predicate]) -> Vec<Stage> {
    let mut stages: Vec<Stage> = Vec::new();
    let mut date_stage: Option<usize> = None;
    let mut position_stage: Option<usize> = None;

    for predicate in predicates {
        match *predicate {
            Predicate::HeightExtremum(direction) => stages.push(Stage::Extremum(direction)),

            Predicate::HeightThreshold { op, value } => stages.push(Stage::Threshold { op, value }),

            Predicate::DateComparison { field, op, year } => {
                let idx = *date_stage.get_or_insert_with(|| {
                    stages.push(Stage::Date(Vec::new()));
                    stages.len() - 1
                });
                if let Stage::Date(clauses) = &mut stages[idx] {
                    clauses.push((field, op, year));
                }
            }

            Predicate::PositionSide(side) => {
                let idx = *position_stage.get_or_insert_with(|| {
                    stages.push(Stage::Position(Vec::new()));
                    stages.len() - 1
                });
                if let Stage::Position(sides) = &mut stages[idx] {
                    if !sides.contains(&side) {
                        sides.push(side);
                    }
                }
            }
        }
    }

    stages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_predicates_are_separate_stages() {
        let stages = plan_stages(&[
            Predicate::HeightExtremum(Extremum::Max),
            Predicate::HeightThreshold {
                op: Comparison::Greater,
                value: 30.0,
            },
        ]);
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0], Stage::Extremum(Extremum::Max));
    }

    #[test]
    fn test_date_predicates_share_a_stage() {
        let stages = plan_stages(&[
            Predicate::DateComparison {
                field: DateField::YearOfConstruction,
                op: Comparison::Less,
                year: Year::new(1990),
            },
            Predicate::DateComparison {
                field: DateField::YearOfDemolition,
                op: Comparison::Less,
                year: Year::new(1990),
            },
        ]);
        assert_eq!(stages.len(), 1);
        match &stages[0] {
            Stage::Date(clauses) => assert_eq!(clauses.len(), 2),
            other => panic!("unexpected stage {:?}", other),
        }
    }

    #[test]
    fn test_position_sides_deduplicated() {
        let stages = plan_stages(&[
            Predicate::PositionSide(Side::Left),
            Predicate::PositionSide(Side::Left),
            Predicate::PositionSide(Side::Right),
        ]);
        assert_eq!(stages, vec![Stage::Position(vec![Side::Left, Side::Right])]);
    }

    #[test]
    fn test_stage_order_follows_predicates() {
        let stages = plan_stages(&[
            Predicate::HeightThreshold {
                op: Comparison::Less,
                value: 15.0,
            },
            Predicate::DateComparison {
                field: DateField::YearOfConstruction,
                op: Comparison::Greater,
                year: Year::new(1940),
            },
            Predicate::PositionSide(Side::Right),
        ]);
        let names: Vec<&str> = stages.iter().map(Stage::name).collect();
        assert_eq!(names, vec!["threshold", "date", "position"]);
    }

    #[test]
    fn test_empty_plan() {
        assert!(plan_stages(&[]).is_empty());
    }
}

//! Selection predicates and query plans

use cityquery_core::{BuildingAttributes, Year};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Less,
    Greater,
    Equal,
}

impl Comparison {
    /// Evaluate `lhs <op> rhs` strictly (no `<=`/`>=`)
    pub fn holds<T: PartialOrd>(self, lhs: T, rhs: T) -> bool {
        match self {
            Comparison::Less => lhs < rhs,
            Comparison::Greater => lhs > rhs,
            Comparison::Equal => lhs == rhs,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Less => "<",
            Comparison::Greater => ">",
            Comparison::Equal => "==",
        }
    }
}

/// Direction of an extremum search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Extremum {
    Max,
    Min,
}

impl Extremum {
    /// Whether `candidate` strictly beats the current best
    pub fn beats(self, candidate: f64, best: f64) -> bool {
        match self {
            Extremum::Max => candidate > best,
            Extremum::Min => candidate < best,
        }
    }
}

/// Life-cycle date attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateField {
    YearOfConstruction,
    YearOfDemolition,
}

impl DateField {
    pub fn name(self) -> &'static str {
        match self {
            DateField::YearOfConstruction => "year_of_construction",
            DateField::YearOfDemolition => "year_of_demolition",
        }
    }

    /// Read this field from an attribute record
    pub fn get(self, attrs: &BuildingAttributes) -> Option<Year> {
        match self {
            DateField::YearOfConstruction => attrs.year_of_construction,
            DateField::YearOfDemolition => attrs.year_of_demolition,
        }
    }
}

/// Side of the camera along the lateral axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Whether a lateral coordinate lies strictly on this side of the camera
    pub fn contains(self, coordinate: f64, camera: f64) -> bool {
        match self {
            Side::Left => coordinate < camera,
            Side::Right => coordinate > camera,
        }
    }
}

/// A selection rule derived from a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    /// Keep the single tallest (or lowest) selected object
    HeightExtremum(Extremum),

    /// Keep selected objects whose height compares against `value`
    HeightThreshold { op: Comparison, value: f64 },

    /// Keep selected objects whose date field compares against `year`
    DateComparison {
        field: DateField,
        op: Comparison,
        year: Year,
    },

    /// Keep selected objects lying entirely on one side of the camera
    PositionSide(Side),
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::HeightExtremum(Extremum::Max) => write!(f, "height is maximal"),
            Predicate::HeightExtremum(Extremum::Min) => write!(f, "height is minimal"),
            Predicate::HeightThreshold { op, value } => {
                write!(f, "height {} {}", op.symbol(), value)
            }
            Predicate::DateComparison { field, op, year } => {
                write!(f, "{} {} {}", field.name(), op.symbol(), year)
            }
            Predicate::PositionSide(Side::Left) => write!(f, "left of camera"),
            Predicate::PositionSide(Side::Right) => write!(f, "right of camera"),
        }
    }
}

/// Why part of a command produced no predicate. These are handled no-ops,
/// never failures.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    #[error("query does not mention a building")]
    EmptyQuery,

    #[error("'{keyword}' needs a number argument")]
    MissingNumberArgument { keyword: String },
}

/// Predicates built from one command, in application order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryPlan {
    pub predicates: Vec<Predicate>,
    pub skipped: Vec<SkipReason>,
}

impl QueryPlan {
    /// A plan that does nothing for the given reason
    pub fn skipped(reason: SkipReason) -> Self {
        Self {
            predicates: Vec::new(),
            skipped: vec![reason],
        }
    }

    /// True if applying this plan cannot change the selection
    pub fn is_noop(&self) -> bool {
        self.predicates.is_empty()
    }
}

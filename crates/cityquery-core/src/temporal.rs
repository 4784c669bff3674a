//! Year and date handling for building life-cycle attributes
//!
//! City databases store construction and demolition as dates. Queries only
//! ever compare calendar years, taken from the first four characters of the
//! stored value.

use crate::property::PropertyValue;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar year
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(i32);

impl Year {
    /// Create a year
    pub const fn new(year: i32) -> Self {
        Self(year)
    }

    /// Get the numeric year
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Parse the leading four characters of a stored value
    /// (`"1920-05-01"`, `"1920"`, `"19201231"`)
    pub fn parse_prefix(text: &str) -> Option<Self> {
        let text = text.trim();
        let prefix = text.get(..4).unwrap_or(text);
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        prefix.parse().ok().map(Self)
    }

    /// Read a year from a host property value
    pub fn from_property(value: &PropertyValue) -> Option<Self> {
        match value {
            PropertyValue::Integer(i) => i32::try_from(*i).ok().map(Self),
            PropertyValue::String(s) if !value.is_null() => Self::parse_prefix(s),
            _ => None,
        }
    }
}

impl From<NaiveDate> for Year {
    fn from(date: NaiveDate) -> Self {
        Self(date.year())
    }
}

impl std::fmt::Display for Year {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Parse a stored date; a bare year maps to January 1st of that year
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    // Timestamps such as "1920-05-01 00:00:00+01"
    if let Some(date) = text.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()) {
        return Some(date);
    }
    Year::parse_prefix(text)
        .filter(|_| text.len() == 4)
        .and_then(|y| NaiveDate::from_ymd_opt(y.value(), 1, 1))
}

/// Read a date from a host property value
pub fn date_from_property(value: &PropertyValue) -> Option<NaiveDate> {
    match value {
        PropertyValue::Integer(i) => i32::try_from(*i)
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)),
        PropertyValue::String(s) if !value.is_null() => parse_date(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_prefix() {
        assert_eq!(Year::parse_prefix("1920-05-01"), Some(Year::new(1920)));
        assert_eq!(Year::parse_prefix("1960"), Some(Year::new(1960)));
        assert_eq!(Year::parse_prefix("19201231"), Some(Year::new(1920)));
        assert_eq!(Year::parse_prefix("None"), None);
        assert_eq!(Year::parse_prefix(""), None);
        assert_eq!(Year::parse_prefix("19a0-01-01"), None);
    }

    #[test]
    fn test_from_property() {
        assert_eq!(Year::from_property(&PropertyValue::Integer(1935)), Some(Year::new(1935)));
        assert_eq!(
            Year::from_property(&PropertyValue::String("2001-09-30".into())),
            Some(Year::new(2001))
        );
        assert_eq!(Year::from_property(&PropertyValue::String("None".into())), None);
        assert_eq!(Year::from_property(&PropertyValue::Float(1935.0)), None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("1920-05-01"), NaiveDate::from_ymd_opt(1920, 5, 1));
        assert_eq!(parse_date("1920-05-01 00:00:00+01"), NaiveDate::from_ymd_opt(1920, 5, 1));
        assert_eq!(parse_date("1920"), NaiveDate::from_ymd_opt(1920, 1, 1));
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Year::new(812).to_string(), "0812");
    }

    proptest! {
        #[test]
        fn prop_prefix_matches_formatted_date(y in 1000i32..=9999, m in 1u32..=12, d in 1u32..=28) {
            let text = format!("{:04}-{:02}-{:02}", y, m, d);
            prop_assert_eq!(Year::parse_prefix(&text), Some(Year::new(y)));
            prop_assert_eq!(parse_date(&text).map(Year::from), Some(Year::new(y)));
        }
    }
}

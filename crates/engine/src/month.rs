use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// A calendar month in canonical `"YYYY-MM"` form.
///
/// Payments are bucketed by month key. The stored string is zero-padded, so
/// lexicographic order equals chronological order and keys compare with plain
/// `Ord`.
///
/// # Examples
///
/// ```rust
/// use engine::MonthKey;
///
/// let key: MonthKey = "2024-05".parse().unwrap();
/// assert_eq!(key.as_str(), "2024-05");
/// assert!("2024-05".parse::<MonthKey>().unwrap() < "2024-11".parse().unwrap());
/// ```
///
/// Malformed keys are rejected:
///
/// ```rust
/// use engine::MonthKey;
///
/// assert!("2024-13".parse::<MonthKey>().is_err());
/// assert!("24-05".parse::<MonthKey>().is_err());
/// assert!("2024/05".parse::<MonthKey>().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey(String);

impl MonthKey {
    /// The month containing `date`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::from_parts(date.year(), date.month())
    }

    /// The current month (UTC).
    #[must_use]
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub(crate) fn from_parts(year: i32, month: u32) -> Self {
        Self(format!("{year:04}-{month:02}"))
    }
}

impl FromStr for MonthKey {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::Validation(format!("invalid month key: {value}"));

        let (year, month) = value.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        match month.parse::<u32>() {
            Ok(1..=12) => Ok(Self(value.to_string())),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for MonthKey {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.0
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_keys() {
        let key: MonthKey = "1999-12".parse().unwrap();
        assert_eq!(key.to_string(), "1999-12");
    }

    #[test]
    fn rejects_out_of_range_month() {
        assert!("2024-00".parse::<MonthKey>().is_err());
        assert!("2024-13".parse::<MonthKey>().is_err());
    }

    #[test]
    fn rejects_unpadded_forms() {
        assert!("2024-5".parse::<MonthKey>().is_err());
        assert!("202405".parse::<MonthKey>().is_err());
    }

    #[test]
    fn from_date_pads() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(MonthKey::from_date(date).as_str(), "2024-03");
    }

    #[test]
    fn ordering_is_chronological() {
        let a: MonthKey = "2023-12".parse().unwrap();
        let b: MonthKey = "2024-01".parse().unwrap();
        assert!(a < b);
    }
}

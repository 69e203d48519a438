//! Birth date value object.
//!
//! Dates travel as `YYYY-MM-DD` text on the wire and in storage. Parsing is
//! strict about the calendar (no 2021-02-30) but the date is date-only, with
//! no time zone attached.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// Fixed textual layout of a birth date.
pub const BIRTH_DAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthDay(NaiveDate);

impl BirthDay {
    /// Parse a birth date in the fixed `YYYY-MM-DD` format.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("birth_day is required"));
        }
        NaiveDate::parse_from_str(trimmed, BIRTH_DAY_FORMAT)
            .map(Self)
            .map_err(|e| {
                DomainError::validation(format!(
                    "birth_day {trimmed:?} does not match YYYY-MM-DD: {e}"
                ))
            })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl core::fmt::Display for BirthDay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format(BIRTH_DAY_FORMAT))
    }
}

impl core::str::FromStr for BirthDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for BirthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BirthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_iso_dates() {
        let day = BirthDay::parse("2020-07-02").unwrap();
        assert_eq!(day.as_date(), NaiveDate::from_ymd_opt(2020, 7, 2).unwrap());
        assert_eq!(day.to_string(), "2020-07-02");
    }

    #[test]
    fn rejects_impossible_and_foreign_formats() {
        for raw in ["2021-02-30", "02/07/2020", "2020-07", "yesterday", "   "] {
            let err = BirthDay::parse(raw).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)), "{raw} should be rejected");
        }
    }

    #[test]
    fn serializes_as_text() {
        let day = BirthDay::parse("1999-12-31").unwrap();
        assert_eq!(serde_json::to_string(&day).unwrap(), "\"1999-12-31\"");
        let back: BirthDay = serde_json::from_str("\"1999-12-31\"").unwrap();
        assert_eq!(back, day);
    }

    proptest! {
        /// Property: any calendar day in a wide range survives the text
        /// representation used by storage.
        #[test]
        fn storage_text_preserves_calendar_day(year in 1900i32..2100, ordinal in 1u32..=365) {
            let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
            let text = BirthDay::from_date(date).to_string();
            prop_assert_eq!(BirthDay::parse(&text).unwrap().as_date(), date);
        }

        /// Property: month numbers outside 1..=12 never parse.
        #[test]
        fn out_of_range_months_are_rejected(year in 1900i32..2100, month in 13u32..100, day in 1u32..29) {
            let raw = format!("{year:04}-{month:02}-{day:02}");
            prop_assert!(BirthDay::parse(&raw).is_err());
        }
    }
}

//! Canonical `YYYY-MM-DD` date keys.
//!
//! Every day in the completion log is identified by its canonical,
//! zero-padded local-calendar key. On canonical keys, lexicographic string
//! order equals chronological order, and this type's `Ord` agrees with both.

use crate::error::HabitError;
use chrono::{Datelike, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day, keyed as canonical `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Build a key from calendar components. `None` for invalid dates
    /// (month 13, Feb 30, and the like).
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    #[must_use]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    #[must_use]
    pub const fn as_naive(self) -> NaiveDate {
        self.0
    }

    /// The next calendar day. `None` only at the end of chrono's range.
    #[must_use]
    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// Zero-based column offset in a Monday-start week.
    #[must_use]
    pub fn weekday_from_monday(self) -> u32 {
        self.0.weekday().num_days_from_monday()
    }
}

/// Number of days in the given month, or `None` for an invalid year/month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next_first.signed_duration_since(first).num_days()).ok()
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = HabitError;

    /// Strict parse: the input must already be in canonical zero-padded
    /// form. `2024-3-1` is rejected even though chrono would accept it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HabitError::InvalidDate { input: s.into() };
        let date = NaiveDate::parse_from_str(s, KEY_FORMAT).map_err(|_| invalid())?;
        if date.format(KEY_FORMAT).to_string() == s {
            Ok(Self(date))
        } else {
            Err(invalid())
        }
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct DateKeyVisitor;

impl Visitor<'_> for DateKeyVisitor {
    type Value = DateKey;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a YYYY-MM-DD date key")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<DateKey, E> {
        value.parse().map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(DateKeyVisitor)
    }
}

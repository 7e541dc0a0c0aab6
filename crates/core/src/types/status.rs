//! Sign-off status fields for course records.
//!
//! The remote store keeps each sign-off as a single spreadsheet cell that
//! is either empty (not done) or a completion date, in lieu of a boolean
//! plus timestamp pair. [`StatusField`] preserves that wire shape while
//! giving the rest of the code a typed date to compare against.

use core::fmt;

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Wire format for dates stored in spreadsheet cells.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// A sign-off status: unset, or done on a given date.
///
/// Serializes as `""` when unset and as `YYYY-MM-DD` when done. Cells
/// holding text that does not parse as a date are treated as unset rather
/// than failing the whole fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusField(Option<NaiveDate>);

impl StatusField {
    /// An unset (not done) status.
    #[must_use]
    pub const fn unset() -> Self {
        Self(None)
    }

    /// A status completed on the given date.
    #[must_use]
    pub const fn done_on(date: NaiveDate) -> Self {
        Self(Some(date))
    }

    /// Whether the sign-off has been completed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.0.is_some()
    }

    /// The completion date, if set.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.0
    }

    /// Clear the sign-off back to the unset state.
    pub const fn clear(&mut self) {
        self.0 = None;
    }
}

impl From<Option<NaiveDate>> for StatusField {
    fn from(date: Option<NaiveDate>) -> Self {
        Self(date)
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            None => Ok(()),
        }
    }
}

impl Serialize for StatusField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        date_string::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for StatusField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        date_string::deserialize(deserializer).map(Self)
    }
}

/// Serde adapter for optional dates stored as empty-or-`YYYY-MM-DD` strings.
///
/// Used for [`StatusField`] and the course due date, which share the same
/// cell encoding in the remote store.
pub mod date_string {
    use super::{DATE_FORMAT, NaiveDate, de, fmt};

    pub fn serialize<S: serde::Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = Option<NaiveDate>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an empty string or a YYYY-MM-DD date")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                // Malformed spreadsheet cells degrade to "unset" instead of
                // poisoning the whole record set.
                Ok(NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok())
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                deserializer.deserialize_any(Visitor)
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_unset_serializes_empty() {
        let json = serde_json::to_string(&StatusField::unset()).expect("serialize");
        assert_eq!(json, "\"\"");
    }

    #[test]
    fn test_done_round_trip() {
        let field = StatusField::done_on(date(2025, 11, 3));
        let json = serde_json::to_string(&field).expect("serialize");
        assert_eq!(json, "\"2025-11-03\"");

        let back: StatusField = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, field);
        assert!(back.is_done());
    }

    #[test]
    fn test_empty_string_is_unset() {
        let field: StatusField = serde_json::from_str("\"\"").expect("deserialize");
        assert!(!field.is_done());

        let field: StatusField = serde_json::from_str("\"  \"").expect("deserialize");
        assert!(!field.is_done());
    }

    #[test]
    fn test_malformed_cell_is_unset() {
        let field: StatusField = serde_json::from_str("\"not a date\"").expect("deserialize");
        assert!(!field.is_done());
    }

    #[test]
    fn test_null_is_unset() {
        let field: StatusField = serde_json::from_str("null").expect("deserialize");
        assert!(!field.is_done());
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusField::unset().to_string(), "");
        assert_eq!(StatusField::done_on(date(2025, 1, 9)).to_string(), "2025-01-09");
    }
}

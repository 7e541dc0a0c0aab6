//! Business records stored in the remote spreadsheet-backed store.
//!
//! Every record lives in one flat store and carries a `type` tag telling
//! the three entity kinds apart. The store assigns a [`BackendId`] on
//! first creation; until that round-trip completes a record has no key.

use core::fmt;

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::BackendId;
use super::status::{StatusField, date_string};

/// The `user`/`course`/`teacher` tag distinguishing record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    User,
    Course,
    Teacher,
}

impl EntityType {
    /// Wire name of the entity, as sent in mutation requests.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Course => "course",
            Self::Teacher => "teacher",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dashboard permission level, stored on the user record as `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// Whether this role may use the CRUD screens.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::User => f.write_str("user"),
        }
    }
}

/// Teaching semester: first, second, or the summer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Semester {
    #[default]
    First,
    Second,
    Summer,
}

impl Semester {
    /// Wire value as stored in the spreadsheet (`"1"`, `"2"`, `"summer"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "1",
            Self::Second => "2",
            Self::Summer => "summer",
        }
    }

    /// Parse a wire value; tolerant of numeric cells.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "1" => Some(Self::First),
            "2" => Some(Self::Second),
            s if s.eq_ignore_ascii_case("summer") => Some(Self::Summer),
            _ => None,
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Semester {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Semester {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = Semester;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"1\", \"2\", or \"summer\"")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Semester::parse(value)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                match value {
                    1 => Ok(Semester::First),
                    2 => Ok(Semester::Second),
                    _ => Err(E::invalid_value(de::Unexpected::Unsigned(value), &self)),
                }
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

/// A boolean the spreadsheet stores as text (`"true"`/`"false"`).
///
/// Deserialization is tolerant: real booleans, `"TRUE"`, and `"1"` all
/// parse; anything else reads as false, matching how the original store
/// treats unrecognized cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringFlag(bool);

impl StringFlag {
    #[must_use]
    pub const fn new(value: bool) -> Self {
        Self(value)
    }

    /// Whether the flag is set.
    #[must_use]
    pub const fn is_true(&self) -> bool {
        self.0
    }

    /// Flip the flag.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        Self(!self.0)
    }
}

impl From<bool> for StringFlag {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl fmt::Display for StringFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "true" } else { "false" })
    }
}

impl Serialize for StringFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if self.0 { "true" } else { "false" })
    }
}

impl<'de> Deserialize<'de> for StringFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl de::Visitor<'_> for Visitor {
            type Value = StringFlag;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a boolean or boolean-like string")
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
                Ok(StringFlag(value))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                let v = value.trim();
                Ok(StringFlag(v.eq_ignore_ascii_case("true") || v == "1"))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(StringFlag(false))
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

/// A dashboard login account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned key; absent until the first create round-trip.
    #[serde(rename = "__backendId", default, skip_serializing_if = "Option::is_none")]
    pub backend_id: Option<BackendId>,
    /// Unique login key.
    pub email: Email,
    /// Stored in the clear by the remote store. A known weakness of the
    /// system, reproduced for behavioral parity.
    pub password: String,
    pub full_name: String,
    /// Permission level (`admin` gets the CRUD screens).
    #[serde(default)]
    pub position: Role,
    /// Disabled accounts cannot log in.
    #[serde(default)]
    pub active: StringFlag,
}

/// A tracked course syllabus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Store-assigned key; absent until the first create round-trip.
    #[serde(rename = "__backendId", default, skip_serializing_if = "Option::is_none")]
    pub backend_id: Option<BackendId>,
    pub course_name: String,
    /// Comma-joined coordinator names. Free text, not a relation: renaming
    /// a teacher silently orphans the association.
    #[serde(default)]
    pub coordinators: String,
    /// Year level 1-6.
    pub year_level: u8,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub semester: Semester,
    /// Filter key for the dashboard, e.g. "2025".
    pub academic_year: String,
    /// Submission deadline; empty cell means no deadline.
    #[serde(default, with = "date_string")]
    pub due_date: Option<NaiveDate>,
    /// Academic-section sign-off.
    #[serde(default)]
    pub status_academic: StatusField,
    /// Homeroom-teacher sign-off.
    #[serde(default)]
    pub status_homeroom: StatusField,
    /// Director sign-off; the date that decides overdue status.
    #[serde(default)]
    pub status_director: StatusField,
    /// Whether the signed paper copy has been scanned.
    #[serde(default)]
    pub scanned: StringFlag,
    /// Link to the scanned document, if any.
    #[serde(default)]
    pub pdf_url: String,
}

impl CourseRecord {
    /// A course is overdue iff the director sign-off date is set and falls
    /// strictly after the due date. An unset director status is never
    /// overdue, and a course with no due date cannot be overdue.
    #[must_use]
    pub fn is_overdue(&self) -> bool {
        match (self.status_director.date(), self.due_date) {
            (Some(done), Some(due)) => done > due,
            _ => false,
        }
    }

    /// All three sign-offs completed.
    #[must_use]
    pub const fn is_fully_signed(&self) -> bool {
        self.status_academic.is_done()
            && self.status_homeroom.is_done()
            && self.status_director.is_done()
    }
}

/// A teacher available for course coordination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherRecord {
    /// Store-assigned key; absent until the first create round-trip.
    #[serde(rename = "__backendId", default, skip_serializing_if = "Option::is_none")]
    pub backend_id: Option<BackendId>,
    pub full_name: String,
}

/// A record from the flat store, tagged by entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    User(UserRecord),
    Course(CourseRecord),
    Teacher(TeacherRecord),
}

impl Record {
    /// The entity tag of this record.
    #[must_use]
    pub const fn entity_type(&self) -> EntityType {
        match self {
            Self::User(_) => EntityType::User,
            Self::Course(_) => EntityType::Course,
            Self::Teacher(_) => EntityType::Teacher,
        }
    }

    /// The store-assigned key, if this record has completed a create
    /// round-trip.
    #[must_use]
    pub const fn backend_id(&self) -> Option<&BackendId> {
        match self {
            Self::User(u) => u.backend_id.as_ref(),
            Self::Course(c) => c.backend_id.as_ref(),
            Self::Teacher(t) => t.backend_id.as_ref(),
        }
    }

    /// Attach a store-assigned key (used by in-memory test hosts).
    pub fn set_backend_id(&mut self, id: BackendId) {
        match self {
            Self::User(u) => u.backend_id = Some(id),
            Self::Course(c) => c.backend_id = Some(id),
            Self::Teacher(t) => t.backend_id = Some(id),
        }
    }

    /// Borrow the course payload, if this is a course record.
    #[must_use]
    pub const fn as_course(&self) -> Option<&CourseRecord> {
        match self {
            Self::Course(c) => Some(c),
            _ => None,
        }
    }

    /// Borrow the user payload, if this is a user record.
    #[must_use]
    pub const fn as_user(&self) -> Option<&UserRecord> {
        match self {
            Self::User(u) => Some(u),
            _ => None,
        }
    }

    /// Borrow the teacher payload, if this is a teacher record.
    #[must_use]
    pub const fn as_teacher(&self) -> Option<&TeacherRecord> {
        match self {
            Self::Teacher(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn sample_course() -> CourseRecord {
        CourseRecord {
            backend_id: None,
            course_name: "Physics 1".to_string(),
            coordinators: "A. Chaiyasit, B. Somsri".to_string(),
            year_level: 4,
            room: "401".to_string(),
            semester: Semester::First,
            academic_year: "2025".to_string(),
            due_date: Some(date(2025, 5, 30)),
            status_academic: StatusField::unset(),
            status_homeroom: StatusField::unset(),
            status_director: StatusField::unset(),
            scanned: StringFlag::default(),
            pdf_url: String::new(),
        }
    }

    #[test]
    fn test_record_tag_round_trip() {
        let record = Record::Teacher(TeacherRecord {
            backend_id: Some(BackendId::new("t-1")),
            full_name: "C. Wattana".to_string(),
        });

        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["type"], "teacher");
        assert_eq!(json["__backendId"], "t-1");

        let back: Record = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, record);
        assert_eq!(back.entity_type(), EntityType::Teacher);
    }

    #[test]
    fn test_new_record_omits_backend_id() {
        let record = Record::Course(sample_course());
        let json = serde_json::to_value(&record).expect("serialize");
        assert!(json.get("__backendId").is_none());
        assert!(record.backend_id().is_none());
    }

    #[test]
    fn test_user_record_wire_shape() {
        let json = serde_json::json!({
            "type": "user",
            "__backendId": "u-9",
            "email": "admin@school.ac.th",
            "password": "secret",
            "full_name": "Admin",
            "position": "admin",
            "active": "TRUE",
        });

        let record: Record = serde_json::from_value(json).expect("deserialize");
        let user = record.as_user().expect("user record");
        assert!(user.position.is_admin());
        assert!(user.active.is_true());
    }

    #[test]
    fn test_string_flag_variants() {
        for (raw, expected) in [
            ("\"true\"", true),
            ("\"TRUE\"", true),
            ("\"1\"", true),
            ("true", true),
            ("\"false\"", false),
            ("\"anything\"", false),
            ("false", false),
        ] {
            let flag: StringFlag = serde_json::from_str(raw).expect("deserialize");
            assert_eq!(flag.is_true(), expected, "raw: {raw}");
        }
    }

    #[test]
    fn test_semester_wire_values() {
        let summer: Semester = serde_json::from_str("\"summer\"").expect("deserialize");
        assert_eq!(summer, Semester::Summer);

        let second: Semester = serde_json::from_str("2").expect("deserialize");
        assert_eq!(second, Semester::Second);

        assert_eq!(
            serde_json::to_string(&Semester::First).expect("serialize"),
            "\"1\""
        );
    }

    #[test]
    fn test_overdue_requires_director_date() {
        let mut course = sample_course();
        assert!(!course.is_overdue());

        // Signed after the deadline: overdue.
        course.status_director = StatusField::done_on(date(2025, 6, 2));
        assert!(course.is_overdue());

        // Signed on the deadline: not overdue.
        course.status_director = StatusField::done_on(date(2025, 5, 30));
        assert!(!course.is_overdue());

        // No due date: never overdue, whatever the director date.
        course.due_date = None;
        course.status_director = StatusField::done_on(date(2030, 1, 1));
        assert!(!course.is_overdue());
    }

    #[test]
    fn test_fully_signed() {
        let mut course = sample_course();
        assert!(!course.is_fully_signed());

        course.status_academic = StatusField::done_on(date(2025, 5, 1));
        course.status_homeroom = StatusField::done_on(date(2025, 5, 2));
        assert!(!course.is_fully_signed());

        course.status_director = StatusField::done_on(date(2025, 5, 3));
        assert!(course.is_fully_signed());
    }
}

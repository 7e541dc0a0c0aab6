//! Normalized result envelope shared by both transports.

use serde::{Deserialize, Serialize};
use syllabus_core::Record;

/// The `{isOk, data|record, error}` shape every store response resolves
/// to, whatever transport carried it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Whether the store accepted the operation.
    pub is_ok: bool,
    /// Full record set (fetch-all responses).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Record>>,
    /// The affected record (mutation responses; carries the assigned
    /// backend id after a create).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<Record>,
    /// Store-side failure description when `is_ok` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Successful fetch-all envelope.
    #[must_use]
    pub fn ok_data(data: Vec<Record>) -> Self {
        Self {
            is_ok: true,
            data: Some(data),
            ..Self::default()
        }
    }

    /// Successful mutation envelope carrying the affected record.
    #[must_use]
    pub fn ok_record(record: Record) -> Self {
        Self {
            is_ok: true,
            record: Some(record),
            ..Self::default()
        }
    }

    /// Successful mutation envelope with no record payload.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            is_ok: true,
            ..Self::default()
        }
    }

    /// Store-side rejection envelope.
    #[must_use]
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            is_ok: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

//! Backend-assigned record identifier.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned key uniquely identifying a record for update/delete.
///
/// The remote store mints this identifier when a record is first created;
/// a freshly built record has no `BackendId` until the create round-trip
/// completes. It is treated as opaque text - the dashboard never parses
/// or generates one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendId(String);

impl BackendId {
    /// Wrap an identifier received from the store.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The underlying identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BackendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BackendId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for BackendId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

//! Transport capability behind the store client.
//!
//! The original system grew two near-duplicate data-access shims, one per
//! transport encoding. Here transport is a single trait with two concrete
//! implementations - [`HttpTransport`](super::http::HttpTransport) and
//! [`BridgeTransport`](super::bridge::BridgeTransport) - selected once at
//! startup; call sites never branch on the transport again.

use async_trait::async_trait;
use syllabus_core::EntityType;

use super::envelope::Envelope;

/// Mutating operation names understood by the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
}

impl Action {
    /// Wire name sent in the `action` field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A transport-level failure: the request never produced a store envelope.
///
/// Application-level rejections (`isOk: false`) are NOT transport errors;
/// they arrive inside a well-formed [`Envelope`].
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network failure or invalid request.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success HTTP status.
    #[error("store returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        /// Truncated response body for diagnostics.
        body: String,
    },

    /// The response body was not a valid envelope.
    #[error("malformed store response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The embedded host bridge reported a failure.
    #[error("bridge call failed: {0}")]
    Bridge(String),
}

/// Carrier for the four logical store operations.
///
/// Implementations must convert every failure into `Err(TransportError)`;
/// a transport failure must never escape as a panic.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Retrieve the entire record set, all entity types mixed.
    async fn get_all(&self) -> Result<Envelope, TransportError>;

    /// Issue a mutation. `payload` is the full record JSON for create and
    /// update, and `{__backendId}` only for delete.
    async fn mutate(
        &self,
        action: Action,
        entity: EntityType,
        payload: serde_json::Value,
    ) -> Result<Envelope, TransportError>;
}

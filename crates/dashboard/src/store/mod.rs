//! Client for the remote spreadsheet-backed store.
//!
//! Four uniform operations over a pluggable [`Transport`]; the store
//! client itself holds no state and performs no caching. Callers receive
//! a `Result` for every operation: transport failures and store-side
//! rejections (`isOk: false`) both surface as [`StoreError`], never as a
//! panic.

mod bridge;
mod envelope;
mod http;
mod transport;

pub use bridge::{BridgeHost, BridgeTransport};
pub use envelope::Envelope;
pub use http::HttpTransport;
pub use transport::{Action, Transport, TransportError};

use std::sync::Arc;

use syllabus_core::Record;
use tracing::instrument;

/// Errors surfaced by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a store envelope.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The store processed the request and rejected it (`isOk: false`).
    #[error("store rejected operation: {0}")]
    Rejected(String),

    /// Update and delete require a backend-assigned identifier.
    #[error("record has no backend id; it has not been created yet")]
    MissingBackendId,

    /// A record payload could not be serialized for the wire.
    #[error("could not encode record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Delete payloads carry only the backend id, nothing else.
#[derive(serde::Serialize)]
struct DeleteKey<'a> {
    #[serde(rename = "__backendId")]
    backend_id: &'a syllabus_core::BackendId,
}

/// The data-access client for the remote store.
///
/// Cheaply cloneable; the transport is chosen once at startup.
#[derive(Clone)]
pub struct SyllabusStore {
    transport: Arc<dyn Transport>,
}

impl SyllabusStore {
    /// Create a store client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Unwrap an envelope, turning `isOk: false` into [`StoreError::Rejected`].
    fn accept(envelope: Envelope) -> Result<Envelope, StoreError> {
        if envelope.is_ok {
            Ok(envelope)
        } else {
            Err(StoreError::Rejected(
                envelope.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }

    /// Retrieve every record regardless of type.
    ///
    /// Callers filter client-side by entity type.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or store rejection.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        let envelope = Self::accept(self.transport.get_all().await?)?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Create a record server-side.
    ///
    /// Returns the created record carrying its newly assigned backend id;
    /// falls back to echoing the input if the store omits the record from
    /// its response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or store rejection.
    #[instrument(skip(self, record), fields(entity = %record.entity_type()))]
    pub async fn create(&self, record: &Record) -> Result<Record, StoreError> {
        let payload = serde_json::to_value(record)?;
        let envelope = Self::accept(
            self.transport
                .mutate(Action::Create, record.entity_type(), payload)
                .await?,
        )?;
        Ok(envelope.record.unwrap_or_else(|| record.clone()))
    }

    /// Replace a record wholesale.
    ///
    /// Full-record semantics: the caller must merge changed fields into
    /// the complete record before calling; there is no partial patch.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no backend id, on transport
    /// failure, or on store rejection.
    #[instrument(skip(self, record), fields(entity = %record.entity_type()))]
    pub async fn update(&self, record: &Record) -> Result<(), StoreError> {
        if record.backend_id().is_none() {
            return Err(StoreError::MissingBackendId);
        }
        let payload = serde_json::to_value(record)?;
        Self::accept(
            self.transport
                .mutate(Action::Update, record.entity_type(), payload)
                .await?,
        )?;
        Ok(())
    }

    /// Delete a record, keyed by its backend id.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has no backend id, on transport
    /// failure, or on store rejection.
    #[instrument(skip(self, record), fields(entity = %record.entity_type()))]
    pub async fn delete(&self, record: &Record) -> Result<(), StoreError> {
        let Some(backend_id) = record.backend_id() else {
            return Err(StoreError::MissingBackendId);
        };
        let payload = serde_json::to_value(DeleteKey { backend_id })?;
        Self::accept(
            self.transport
                .mutate(Action::Delete, record.entity_type(), payload)
                .await?,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use syllabus_core::{EntityType, TeacherRecord};

    /// Transport that always fails below the envelope layer.
    struct FailingTransport;

    #[async_trait]
    impl Transport for FailingTransport {
        async fn get_all(&self) -> Result<Envelope, TransportError> {
            Err(TransportError::Bridge("host went away".to_string()))
        }

        async fn mutate(
            &self,
            _action: Action,
            _entity: EntityType,
            _payload: serde_json::Value,
        ) -> Result<Envelope, TransportError> {
            Err(TransportError::Bridge("host went away".to_string()))
        }
    }

    /// Transport that returns application-level rejections.
    struct RejectingTransport;

    #[async_trait]
    impl Transport for RejectingTransport {
        async fn get_all(&self) -> Result<Envelope, TransportError> {
            Ok(Envelope::rejected("sheet is locked"))
        }

        async fn mutate(
            &self,
            _action: Action,
            _entity: EntityType,
            _payload: serde_json::Value,
        ) -> Result<Envelope, TransportError> {
            Ok(Envelope::rejected("sheet is locked"))
        }
    }

    fn teacher(id: Option<&str>) -> Record {
        Record::Teacher(TeacherRecord {
            backend_id: id.map(Into::into),
            full_name: "K. Somchai".to_string(),
        })
    }

    #[tokio::test]
    async fn test_transport_failure_becomes_err() {
        let store = SyllabusStore::new(Arc::new(FailingTransport));

        assert!(matches!(
            store.fetch_all().await,
            Err(StoreError::Transport(_))
        ));
        assert!(matches!(
            store.create(&teacher(None)).await,
            Err(StoreError::Transport(_))
        ));
        assert!(matches!(
            store.update(&teacher(Some("t-1"))).await,
            Err(StoreError::Transport(_))
        ));
        assert!(matches!(
            store.delete(&teacher(Some("t-1"))).await,
            Err(StoreError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_rejection_becomes_err() {
        let store = SyllabusStore::new(Arc::new(RejectingTransport));

        match store.fetch_all().await {
            Err(StoreError::Rejected(msg)) => assert_eq!(msg, "sheet is locked"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_delete_require_backend_id() {
        let store = SyllabusStore::new(Arc::new(RejectingTransport));

        assert!(matches!(
            store.update(&teacher(None)).await,
            Err(StoreError::MissingBackendId)
        ));
        assert!(matches!(
            store.delete(&teacher(None)).await,
            Err(StoreError::MissingBackendId)
        ));
    }
}

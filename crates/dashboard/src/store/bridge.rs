//! Embedded host-bridge transport.
//!
//! When the dashboard is embedded in a host shell, the store is reachable
//! through four named remote procedures instead of HTTP. The host's
//! success/failure callback pair maps onto `Result`: success resolves to
//! the same [`Envelope`] shape the HTTP transport decodes, failure becomes
//! [`TransportError::Bridge`].

use std::sync::Arc;

use async_trait::async_trait;
use syllabus_core::EntityType;

use super::envelope::Envelope;
use super::transport::{Action, Transport, TransportError};

/// The four remote procedures an embedding host must provide.
///
/// Implementations must never panic on failure; every error is reported
/// through the returned `Result`.
#[async_trait]
pub trait BridgeHost: Send + Sync {
    /// `getAll` - the entire record set.
    async fn get_all(&self) -> Result<Envelope, TransportError>;

    /// `createItem` - insert a record, assigning its backend id.
    async fn create_item(
        &self,
        entity: EntityType,
        payload: serde_json::Value,
    ) -> Result<Envelope, TransportError>;

    /// `updateItem` - full-record replace keyed by backend id.
    async fn update_item(
        &self,
        entity: EntityType,
        payload: serde_json::Value,
    ) -> Result<Envelope, TransportError>;

    /// `deleteItem` - remove the record keyed by backend id.
    async fn delete_item(
        &self,
        entity: EntityType,
        payload: serde_json::Value,
    ) -> Result<Envelope, TransportError>;
}

/// Transport that dispatches through an embedded [`BridgeHost`].
pub struct BridgeTransport {
    host: Arc<dyn BridgeHost>,
}

impl BridgeTransport {
    /// Wrap the host bridge registered at startup.
    #[must_use]
    pub fn new(host: Arc<dyn BridgeHost>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl Transport for BridgeTransport {
    async fn get_all(&self) -> Result<Envelope, TransportError> {
        self.host.get_all().await
    }

    async fn mutate(
        &self,
        action: Action,
        entity: EntityType,
        payload: serde_json::Value,
    ) -> Result<Envelope, TransportError> {
        match action {
            Action::Create => self.host.create_item(entity, payload).await,
            Action::Update => self.host.update_item(entity, payload).await,
            Action::Delete => self.host.delete_item(entity, payload).await,
        }
    }
}

//! HTTP transport for the remote spreadsheet-backed store.
//!
//! Wire contract:
//! - `GET <endpoint>?action=getAll` - full record set
//! - `POST <endpoint>` with a form-encoded body
//!   `action=create|update|delete & entity=<type> & payload=<JSON>`
//!
//! Both directions speak the [`Envelope`] shape. Non-2xx statuses and
//! network failures become [`TransportError`]; nothing panics on the wire.

use async_trait::async_trait;
use syllabus_core::EntityType;
use tracing::instrument;
use url::Url;

use super::envelope::Envelope;
use super::transport::{Action, Transport, TransportError};

/// How much response body to keep in error diagnostics.
const ERROR_BODY_LIMIT: usize = 500;

/// Transport that reaches the store over plain HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Create a transport for the store at `endpoint`.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Decode a response into an envelope, converting non-success
    /// statuses into errors first.
    async fn read_envelope(response: reqwest::Response) -> Result<Envelope, TransportError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status,
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Envelope, TransportError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("action", "getAll")])
            .send()
            .await?;

        Self::read_envelope(response).await
    }

    #[instrument(skip(self, payload), fields(action = action.as_str(), entity = %entity))]
    async fn mutate(
        &self,
        action: Action,
        entity: EntityType,
        payload: serde_json::Value,
    ) -> Result<Envelope, TransportError> {
        let form = [
            ("action", action.as_str().to_string()),
            ("entity", entity.as_str().to_string()),
            ("payload", payload.to_string()),
        ];

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&form)
            .send()
            .await?;

        Self::read_envelope(response).await
    }
}

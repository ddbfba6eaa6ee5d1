// Event endpoints (/api/events).
//
// `GET /api/events` lists event *type names*, not full event payloads;
// the richer [`Event`](crate::models::Event) model covers payloads
// carried elsewhere (e.g. inside websocket-style integrations built on
// top of this crate).

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::{HomeAssistantClient, require_non_empty};
use crate::error::Error;

impl HomeAssistantClient {
    /// Names of all event types with active listeners.
    ///
    /// `GET /api/events`
    pub async fn get_event_types(&self) -> Result<Vec<String>, Error> {
        debug!("listing event types");
        self.get("events").await
    }

    /// Fire a custom event, optionally with a JSON data payload.
    ///
    /// `POST /api/events/{event_type}`
    ///
    /// A `None` payload is sent as an empty JSON object. Fails with
    /// [`Error::InvalidArgument`] on an empty event type, before any
    /// network call is made.
    pub async fn fire_event(&self, event_type: &str, event_data: Option<Value>) -> Result<(), Error> {
        require_non_empty(event_type, "event type")?;
        debug!(event_type, "firing event");
        self.post(&format!("events/{event_type}"), event_data).await
    }

    /// [`get_event_types`](Self::get_event_types) on a background task.
    /// Dropping the handle detaches from the result without aborting the
    /// request.
    pub fn spawn_get_event_types(&self) -> JoinHandle<Result<Vec<String>, Error>> {
        let client = self.clone();
        tokio::spawn(async move { client.get_event_types().await })
    }

    /// [`fire_event`](Self::fire_event) on a background task.
    pub fn spawn_fire_event(
        &self,
        event_type: &str,
        event_data: Option<Value>,
    ) -> JoinHandle<Result<(), Error>> {
        let client = self.clone();
        let event_type = event_type.to_owned();
        tokio::spawn(async move { client.fire_event(&event_type, event_data).await })
    }
}

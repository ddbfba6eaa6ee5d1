// Entity state endpoints (/api/states).

use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::{HomeAssistantClient, require_non_empty};
use crate::error::Error;
use crate::models::EntityState;

impl HomeAssistantClient {
    /// States of all entities.
    ///
    /// `GET /api/states`
    pub async fn get_states(&self) -> Result<Vec<EntityState>, Error> {
        debug!("fetching all entity states");
        self.get("states").await
    }

    /// State of one entity by its dotted id (e.g. `light.living_room`).
    ///
    /// `GET /api/states/{entity_id}`
    ///
    /// Fails with [`Error::InvalidArgument`] on an empty id, before any
    /// network call is made.
    pub async fn get_state(&self, entity_id: &str) -> Result<EntityState, Error> {
        require_non_empty(entity_id, "entity ID")?;
        debug!(entity_id, "fetching entity state");
        self.get(&format!("states/{entity_id}")).await
    }

    /// [`get_states`](Self::get_states) on a background task. Dropping
    /// the handle detaches from the result without aborting the request.
    pub fn spawn_get_states(&self) -> JoinHandle<Result<Vec<EntityState>, Error>> {
        let client = self.clone();
        tokio::spawn(async move { client.get_states().await })
    }

    /// [`get_state`](Self::get_state) on a background task.
    pub fn spawn_get_state(&self, entity_id: &str) -> JoinHandle<Result<EntityState, Error>> {
        let client = self.clone();
        let entity_id = entity_id.to_owned();
        tokio::spawn(async move { client.get_state(&entity_id).await })
    }
}

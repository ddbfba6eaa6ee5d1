// System-level endpoints: API status, configuration, error log.

use serde_json::{Map, Value};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::HomeAssistantClient;
use crate::error::Error;
use crate::models::ApiStatus;

impl HomeAssistantClient {
    /// Check that the API is up and authentication works.
    ///
    /// `GET /api/`
    pub async fn get_api_status(&self) -> Result<ApiStatus, Error> {
        debug!("checking API status");
        self.get("").await
    }

    /// Current system configuration.
    ///
    /// `GET /api/config`
    pub async fn get_config(&self) -> Result<Map<String, Value>, Error> {
        debug!("fetching configuration");
        self.get("config").await
    }

    /// Error log entries.
    ///
    /// `GET /api/error_log`
    pub async fn get_error_log(&self) -> Result<Vec<Map<String, Value>>, Error> {
        debug!("fetching error log");
        self.get("error_log").await
    }

    /// [`get_api_status`](Self::get_api_status) on a background task.
    /// Dropping the handle detaches from the result without aborting the
    /// request.
    pub fn spawn_get_api_status(&self) -> JoinHandle<Result<ApiStatus, Error>> {
        let client = self.clone();
        tokio::spawn(async move { client.get_api_status().await })
    }

    /// [`get_config`](Self::get_config) on a background task.
    pub fn spawn_get_config(&self) -> JoinHandle<Result<Map<String, Value>, Error>> {
        let client = self.clone();
        tokio::spawn(async move { client.get_config().await })
    }

    /// [`get_error_log`](Self::get_error_log) on a background task.
    pub fn spawn_get_error_log(&self) -> JoinHandle<Result<Vec<Map<String, Value>>, Error>> {
        let client = self.clone();
        tokio::spawn(async move { client.get_error_log().await })
    }
}

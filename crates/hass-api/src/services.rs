// Service endpoints (/api/services).

use std::collections::HashMap;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::{HomeAssistantClient, require_non_empty};
use crate::error::Error;
use crate::models::Service;

impl HomeAssistantClient {
    /// All available services, grouped by domain.
    ///
    /// `GET /api/services`
    pub async fn get_services(&self) -> Result<HashMap<String, HashMap<String, Service>>, Error> {
        debug!("listing services");
        self.get("services").await
    }

    /// Services available in one domain (e.g. `light`).
    ///
    /// `GET /api/services/{domain}`
    ///
    /// Fails with [`Error::InvalidArgument`] on an empty domain, before
    /// any network call is made.
    pub async fn get_domain_services(
        &self,
        domain: &str,
    ) -> Result<HashMap<String, Service>, Error> {
        require_non_empty(domain, "domain")?;
        debug!(domain, "listing domain services");
        self.get(&format!("services/{domain}")).await
    }

    /// Call a service (e.g. `light.turn_on`), optionally with service
    /// data. A `None` payload is sent as an empty JSON object.
    ///
    /// `POST /api/services/{domain}/{service}`
    ///
    /// Fails with [`Error::InvalidArgument`] if domain or service is
    /// empty, before any network call is made.
    pub async fn call_service(
        &self,
        domain: &str,
        service: &str,
        service_data: Option<Value>,
    ) -> Result<(), Error> {
        require_non_empty(domain, "domain")?;
        require_non_empty(service, "service")?;
        debug!(domain, service, "calling service");
        self.post(&format!("services/{domain}/{service}"), service_data)
            .await
    }

    /// [`get_services`](Self::get_services) on a background task.
    /// Dropping the handle detaches from the result without aborting the
    /// request.
    pub fn spawn_get_services(
        &self,
    ) -> JoinHandle<Result<HashMap<String, HashMap<String, Service>>, Error>> {
        let client = self.clone();
        tokio::spawn(async move { client.get_services().await })
    }

    /// [`get_domain_services`](Self::get_domain_services) on a background
    /// task.
    pub fn spawn_get_domain_services(
        &self,
        domain: &str,
    ) -> JoinHandle<Result<HashMap<String, Service>, Error>> {
        let client = self.clone();
        let domain = domain.to_owned();
        tokio::spawn(async move { client.get_domain_services(&domain).await })
    }

    /// [`call_service`](Self::call_service) on a background task.
    pub fn spawn_call_service(
        &self,
        domain: &str,
        service: &str,
        service_data: Option<Value>,
    ) -> JoinHandle<Result<(), Error>> {
        let client = self.clone();
        let domain = domain.to_owned();
        let service = service.to_owned();
        tokio::spawn(async move { client.call_service(&domain, &service, service_data).await })
    }
}

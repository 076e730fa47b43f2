use crate::{ClientResult, Shipment, http};

use std::time::Duration;

use log::debug;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use ship_config::ApiConfig;
use ship_session::Credential;

/// HTTP client for the logistics shipment API
pub struct ShipmentClient {
    url: String,
    client: ReqwestClient,
}

#[derive(Debug, Deserialize)]
struct ShipmentListResponse {
    #[serde(default)]
    shipment_requests: Option<Vec<Shipment>>,
}

impl ShipmentClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `url` - Full listing URL (e.g., "http://127.0.0.1:8080/shipment_request/")
    /// * `timeout` - Per-request timeout
    pub fn new(url: &str, timeout: Duration) -> ClientResult<Self> {
        Ok(Self {
            url: url.to_string(),
            client: http::build_client(timeout)?,
        })
    }

    pub fn from_config(api: &ApiConfig) -> ClientResult<Self> {
        Self::new(api.shipments_url()?.as_str(), Duration::from_secs(api.timeout_secs))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch every shipment request. The bearer credential is sent when given.
    pub async fn list_shipments(&self, credential: Option<&Credential>) -> ClientResult<Vec<Shipment>> {
        let mut req = self.client.get(&self.url);
        if let Some(credential) = credential {
            req = req.bearer_auth(credential.expose());
        }

        let body = http::read_json(req.send().await?).await?;
        let listing: ShipmentListResponse = serde_json::from_value(body)?;
        let shipments = listing.shipment_requests.unwrap_or_default();

        debug!("Fetched {} shipment requests", shipments.len());
        Ok(shipments)
    }
}

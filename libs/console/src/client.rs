//! HTTP client for the gateway API.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use vane_model::{AppliedRoute, HealthStatus, Route, RouteDraft, RouteId};

use crate::error::GatewayError;

/// Acknowledgement body returned by mutating gateway endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayMessage {
    pub message: String,

    /// Present when the gateway accepted the request but wants the
    /// operator to know something went sideways (e.g. a reload that
    /// fell back to a cached config).
    #[serde(default)]
    pub warning: Option<String>,
}

/// Structured error body the gateway attaches to rejections.
#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    error: String,
}

/// Client for the gateway's configuration API.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayClient {
    /// Create a new client for the given gateway base URL.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the full desired-state route listing.
    pub async fn list_routes(&self) -> Result<Vec<Route>, GatewayError> {
        self.get("/routes").await
    }

    /// Fetch a single route.
    pub async fn get_route(&self, id: RouteId) -> Result<Route, GatewayError> {
        self.get(&format!("/routes/{id}")).await
    }

    /// Create a route; the gateway assigns the id and echoes the record.
    pub async fn create_route(&self, draft: &RouteDraft) -> Result<Route, GatewayError> {
        self.post("/routes", draft).await
    }

    /// Replace a route's editable fields.
    pub async fn update_route(
        &self,
        id: RouteId,
        draft: &RouteDraft,
    ) -> Result<Route, GatewayError> {
        let response = self
            .client
            .put(self.url(&format!("/routes/{id}")))
            .json(draft)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a route.
    pub async fn delete_route(&self, id: RouteId) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.url(&format!("/routes/{id}")))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(self.error_from(response).await)
        }
    }

    /// Flip a route's enabled flag; echoes the updated record.
    pub async fn toggle_route(&self, id: RouteId) -> Result<Route, GatewayError> {
        self.post_empty(&format!("/routes/{id}/toggle")).await
    }

    /// Fetch the snapshot of what the proxy is actually enforcing.
    pub async fn fetch_applied(&self) -> Result<Vec<AppliedRoute>, GatewayError> {
        self.get("/applied-state").await
    }

    /// Fetch per-route health reports.
    pub async fn fetch_health(&self) -> Result<Vec<HealthStatus>, GatewayError> {
        self.get("/health").await
    }

    /// Trigger a proxy reload.
    pub async fn reload(&self) -> Result<GatewayMessage, GatewayError> {
        debug!("requesting proxy reload");
        self.post_empty("/reload").await
    }

    /// Export the gateway's config document (opaque to this client).
    pub async fn export_config(&self) -> Result<serde_json::Value, GatewayError> {
        self.get("/export").await
    }

    /// Import a batch of route drafts.
    pub async fn import_routes(
        &self,
        drafts: &[RouteDraft],
    ) -> Result<GatewayMessage, GatewayError> {
        self.post("/import", &drafts).await
    }

    /// Make a GET request.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.client.get(self.url(path)).send().await?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Make a POST request with no body.
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        let response = self.client.post(self.url(path)).send().await?;

        self.handle_response(response).await
    }

    /// Handle a successful or error response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        if response.status().is_success() {
            response.json().await.map_err(GatewayError::Parse)
        } else {
            Err(self.error_from(response).await)
        }
    }

    /// Decode the gateway's error body, falling back to a generic
    /// message when there is none to parse.
    async fn error_from(&self, response: reqwest::Response) -> GatewayError {
        let status = response.status().as_u16();
        let message = match response.json::<GatewayErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => "request failed".to_string(),
        };

        GatewayError::Rejected { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building_trims_trailing_slash() {
        let client = GatewayClient::new("http://localhost:8473/").unwrap();
        assert_eq!(client.url("/routes"), "http://localhost:8473/routes");
    }

    #[test]
    fn test_gateway_message_deserialization() {
        let ack: GatewayMessage =
            serde_json::from_str(r#"{"message": "Proxy reloaded"}"#).unwrap();
        assert_eq!(ack.message, "Proxy reloaded");
        assert_eq!(ack.warning, None);

        let ack: GatewayMessage = serde_json::from_str(
            r#"{"message": "Proxy reloaded", "warning": "using cached config"}"#,
        )
        .unwrap();
        assert_eq!(ack.warning.as_deref(), Some("using cached config"));
    }
}

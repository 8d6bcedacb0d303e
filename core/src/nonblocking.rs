//! Async Fabric client.
//!
//! Same surface as [`crate::Fabric`], executed over a pooled
//! `reqwest::Client`. Operations take `&self`, so one handle can serve many
//! in-flight requests from concurrent tasks. Cancellation is whatever
//! dropping the future gives you in reqwest.

use serde_json::Value;
use tracing::{debug, instrument, warn, Span};

use crate::client::{attach_feedback_id, FabricClient};
use crate::config::ClientConfig;
use crate::error::FabricError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    AddFavoriteOptions, CreateBudgetOptions, DiscoverOptions, FeedbackOptions, Payload,
    RouteOptions,
};

/// Fabric API client (async, requires a Tokio runtime).
#[derive(Debug)]
pub struct FabricAsync {
    core: FabricClient,
    http: Option<reqwest::Client>,
}

impl FabricAsync {
    /// Create a client. No request is sent.
    pub fn new(config: ClientConfig) -> Result<Self, FabricError> {
        let core = FabricClient::new(&config)?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            core,
            http: Some(http),
        })
    }

    /// Create a client from `FABRIC_*` environment variables.
    pub fn from_env() -> Result<Self, FabricError> {
        Self::new(ClientConfig::from_env().ok_or(FabricError::MissingApiKey)?)
    }

    pub fn requests(&self) -> &FabricClient {
        &self.core
    }

    /// Release the connection pool. Idempotent.
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            debug!(base_url = %self.core.base_url(), "fabric async client closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    pub async fn discover(&self, category: &str, options: &DiscoverOptions) -> Result<Payload, FabricError> {
        self.execute(self.core.build_discover(category, options)).await
    }

    pub async fn route(
        &self,
        category: &str,
        input: &Value,
        options: &RouteOptions,
    ) -> Result<Payload, FabricError> {
        self.execute(self.core.build_route(category, input, options)?).await
    }

    pub async fn evaluate(&self, provider_id: &str) -> Result<Payload, FabricError> {
        self.execute(self.core.build_evaluate(provider_id)).await
    }

    pub async fn feedback(
        &self,
        transaction_id: &str,
        score: u8,
        options: &FeedbackOptions,
    ) -> Result<Payload, FabricError> {
        self.execute(self.core.build_feedback(transaction_id, score, options)?).await
    }

    pub async fn list_budgets(&self) -> Result<Payload, FabricError> {
        self.execute(self.core.build_list_budgets()).await
    }

    pub async fn create_budget(
        &self,
        limit_usd: f64,
        options: &CreateBudgetOptions,
    ) -> Result<Payload, FabricError> {
        self.execute(self.core.build_create_budget(limit_usd, options)?).await
    }

    pub async fn budget_status(&self, budget_id: &str) -> Result<Payload, FabricError> {
        self.execute(self.core.build_budget_status(budget_id)).await
    }

    pub async fn list_favorites(&self, agent_id: Option<&str>) -> Result<Payload, FabricError> {
        self.execute(self.core.build_list_favorites(agent_id)?).await
    }

    pub async fn add_favorite(
        &self,
        provider_id: &str,
        options: &AddFavoriteOptions,
    ) -> Result<Payload, FabricError> {
        self.execute(self.core.build_add_favorite(provider_id, options)?).await
    }

    pub async fn remove_favorite(&self, favorite_id: &str) -> Result<Payload, FabricError> {
        self.execute(self.core.build_remove_favorite(favorite_id)).await
    }

    pub async fn list_wallets(&self) -> Result<Payload, FabricError> {
        self.execute(self.core.build_list_wallets()).await
    }

    pub async fn create_wallet(&self, agent_id: Option<&str>) -> Result<Payload, FabricError> {
        self.execute(self.core.build_create_wallet(agent_id)?).await
    }

    pub async fn wallet_balance(&self, agent_id: Option<&str>) -> Result<Payload, FabricError> {
        self.execute(self.core.build_wallet_balance(agent_id)?).await
    }

    pub async fn chain_status(&self) -> Result<Payload, FabricError> {
        self.execute(self.core.build_chain_status()).await
    }

    pub async fn mcp_tools(&self) -> Result<Payload, FabricError> {
        self.execute(self.core.build_mcp_tools()).await
    }

    pub async fn mcp_execute(&self, tool: &str, arguments: &Value) -> Result<Payload, FabricError> {
        self.execute(self.core.build_mcp_execute(tool, arguments)?).await
    }

    /// Async counterpart of [`crate::Fabric::route_and_rate`]. Feedback
    /// failures are logged and dropped.
    pub async fn route_and_rate<F>(
        &self,
        category: &str,
        input: &Value,
        rate: F,
    ) -> Result<Payload, FabricError>
    where
        F: FnOnce(&Value) -> u8,
    {
        let mut result = self.route(category, input, &RouteOptions::default()).await?;
        let score = rate(result.get("result").unwrap_or(&Value::Null));

        let feedback = match self.core.build_rating(&result, score) {
            Ok(request) => self.execute(request).await,
            Err(err) => Err(err),
        };
        match feedback {
            Ok(feedback) => attach_feedback_id(&mut result, &feedback),
            Err(err) => warn!(error = %err, "feedback submission failed, returning route result"),
        }
        Ok(result)
    }

    #[instrument(
        name = "fabric_request",
        skip_all,
        fields(
            http.method = %request.method,
            http.url = %request.url,
            http.status_code = tracing::field::Empty,
        )
    )]
    async fn execute(&self, request: HttpRequest) -> Result<Payload, FabricError> {
        let http = self.http.as_ref().ok_or(FabricError::Closed)?;
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut req = http.request(to_reqwest(method), url.as_str());
        for (name, value) in &headers {
            req = req.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        Span::current().record("http.status_code", status);
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "response received");

        self.core.parse_response(HttpResponse { status, body })
    }
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

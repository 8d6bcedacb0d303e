//! Blocking Fabric client.
//!
//! Executes `FabricClient` requests over a pooled `ureq` agent. Each call
//! occupies the calling thread for the full round trip. No Tokio runtime
//! required.

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

/// Fabric API client (blocking).
///
/// The connection pool is released by `close` or when the handle is
/// dropped. Calls after `close` fail with `FabricError::Closed`.
pub struct Fabric {
    core: FabricClient,
    agent: Option<ureq::Agent>,
}

impl Fabric {
    /// Create a client. No request is sent.
    pub fn new(config: ClientConfig) -> Result<Self, FabricError> {
        let core = FabricClient::new(&config)?;
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .build()
            .new_agent();

        Ok(Self {
            core,
            agent: Some(agent),
        })
    }

    /// Create a client from `FABRIC_*` environment variables.
    pub fn from_env() -> Result<Self, FabricError> {
        Self::new(ClientConfig::from_env().ok_or(FabricError::MissingApiKey)?)
    }

    /// The request builder behind this handle.
    pub fn requests(&self) -> &FabricClient {
        &self.core
    }

    /// Release the connection pool. Idempotent.
    pub fn close(&mut self) {
        if self.agent.take().is_some() {
            debug!(base_url = %self.core.base_url(), "fabric client closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.agent.is_none()
    }

    pub fn discover(&self, category: &str, options: &DiscoverOptions) -> Result<Payload, FabricError> {
        self.execute(self.core.build_discover(category, options))
    }

    pub fn route(
        &self,
        category: &str,
        input: &Value,
        options: &RouteOptions,
    ) -> Result<Payload, FabricError> {
        self.execute(self.core.build_route(category, input, options)?)
    }

    pub fn evaluate(&self, provider_id: &str) -> Result<Payload, FabricError> {
        self.execute(self.core.build_evaluate(provider_id))
    }

    pub fn feedback(
        &self,
        transaction_id: &str,
        score: u8,
        options: &FeedbackOptions,
    ) -> Result<Payload, FabricError> {
        self.execute(self.core.build_feedback(transaction_id, score, options)?)
    }

    pub fn list_budgets(&self) -> Result<Payload, FabricError> {
        self.execute(self.core.build_list_budgets())
    }

    pub fn create_budget(
        &self,
        limit_usd: f64,
        options: &CreateBudgetOptions,
    ) -> Result<Payload, FabricError> {
        self.execute(self.core.build_create_budget(limit_usd, options)?)
    }

    pub fn budget_status(&self, budget_id: &str) -> Result<Payload, FabricError> {
        self.execute(self.core.build_budget_status(budget_id))
    }

    pub fn list_favorites(&self, agent_id: Option<&str>) -> Result<Payload, FabricError> {
        self.execute(self.core.build_list_favorites(agent_id)?)
    }

    pub fn add_favorite(
        &self,
        provider_id: &str,
        options: &AddFavoriteOptions,
    ) -> Result<Payload, FabricError> {
        self.execute(self.core.build_add_favorite(provider_id, options)?)
    }

    pub fn remove_favorite(&self, favorite_id: &str) -> Result<Payload, FabricError> {
        self.execute(self.core.build_remove_favorite(favorite_id))
    }

    pub fn list_wallets(&self) -> Result<Payload, FabricError> {
        self.execute(self.core.build_list_wallets())
    }

    pub fn create_wallet(&self, agent_id: Option<&str>) -> Result<Payload, FabricError> {
        self.execute(self.core.build_create_wallet(agent_id)?)
    }

    pub fn wallet_balance(&self, agent_id: Option<&str>) -> Result<Payload, FabricError> {
        self.execute(self.core.build_wallet_balance(agent_id)?)
    }

    pub fn chain_status(&self) -> Result<Payload, FabricError> {
        self.execute(self.core.build_chain_status())
    }

    pub fn mcp_tools(&self) -> Result<Payload, FabricError> {
        self.execute(self.core.build_mcp_tools())
    }

    pub fn mcp_execute(&self, tool: &str, arguments: &Value) -> Result<Payload, FabricError> {
        self.execute(self.core.build_mcp_execute(tool, arguments)?)
    }

    /// Route a request, score its result with `rate`, and submit that score
    /// as feedback.
    ///
    /// Feedback is best-effort: if it fails, the route result is returned
    /// without `feedbackId` and the failure is only logged.
    pub fn route_and_rate<F>(&self, category: &str, input: &Value, rate: F) -> Result<Payload, FabricError>
    where
        F: FnOnce(&Value) -> u8,
    {
        let mut result = self.route(category, input, &RouteOptions::default())?;
        let score = rate(result.get("result").unwrap_or(&Value::Null));

        let feedback = self
            .core
            .build_rating(&result, score)
            .and_then(|request| self.execute(request));
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
    fn execute(&self, request: HttpRequest) -> Result<Payload, FabricError> {
        let agent = self.agent.as_ref().ok_or(FabricError::Closed)?;
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut response = match method {
            HttpMethod::Get => with_headers(agent.get(url.as_str()), &headers).call(),
            HttpMethod::Delete => with_headers(agent.delete(url.as_str()), &headers).call(),
            HttpMethod::Post => {
                let req = with_headers(agent.post(url.as_str()), &headers);
                match body {
                    Some(body) => req.send(body.as_bytes()),
                    None => req.send_empty(),
                }
            }
        }?;

        let status = response.status().as_u16();
        Span::current().record("http.status_code", status);
        let body = response.body_mut().read_to_string()?;
        debug!(status, bytes = body.len(), "response received");

        self.core.parse_response(HttpResponse { status, body })
    }
}

impl std::fmt::Debug for Fabric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fabric")
            .field("core", &self.core)
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn with_headers<B>(mut req: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        req = req.header(name.as_str(), value.as_str());
    }
    req
}

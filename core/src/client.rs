//! Stateless request builder and response interpreter for the Fabric API.
//!
//! # Design
//! `FabricClient` holds only immutable configuration. Each operation has a
//! `build_*` method that produces an `HttpRequest`; every response goes
//! through the single `parse_response`. The blocking and async front ends
//! call these and do nothing but I/O in between.

use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::{ClientConfig, USER_AGENT};
use crate::error::FabricError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    AddFavoriteOptions, CreateBudgetOptions, DiscoverOptions, FeedbackOptions, Payload,
    PeriodType, RouteOptions, RoutePreferences,
};

/// Request builder for the Fabric API. Performs no I/O.
#[derive(Clone)]
pub struct FabricClient {
    base_url: Url,
    api_key: String,
    agent_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteBody<'a> {
    agent_id: &'a str,
    category: &'a str,
    input: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    preferences: Option<&'a RoutePreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    budget: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackBody<'a> {
    transaction_id: &'a str,
    score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBudgetBody<'a> {
    limit_usd: f64,
    period_type: PeriodType,
    hard_cap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    agent_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alert_threshold: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddFavoriteBody<'a> {
    agent_id: &'a str,
    provider_id: &'a str,
    priority: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AgentBody<'a> {
    agent_id: &'a str,
}

#[derive(Serialize)]
struct McpExecuteBody<'a> {
    tool: &'a str,
    arguments: &'a Value,
}

/// Pick the explicit agent id, else the configured default.
///
/// Empty strings count as absent.
pub fn resolve_agent_id(
    operation: &'static str,
    explicit: Option<&str>,
    default: Option<&str>,
) -> Result<String, FabricError> {
    explicit
        .filter(|id| !id.is_empty())
        .or_else(|| default.filter(|id| !id.is_empty()))
        .map(str::to_string)
        .ok_or(FabricError::MissingAgentId { operation })
}

/// Transaction id of a `route` response, if it carries one.
pub fn transaction_id(route_result: &Value) -> Option<&str> {
    route_result.get("transactionId").and_then(Value::as_str)
}

/// Copy the feedback record's `id` onto a route result as `feedbackId`.
///
/// Leaves the route result untouched when the feedback carries no id.
pub fn attach_feedback_id(route_result: &mut Value, feedback: &Value) {
    let Some(id) = feedback.get("id").filter(|id| !id.is_null()) else {
        return;
    };
    if let Some(obj) = route_result.as_object_mut() {
        obj.insert("feedbackId".to_string(), id.clone());
    }
}

impl FabricClient {
    /// Validate `config` and capture what requests need from it.
    pub fn new(config: &ClientConfig) -> Result<Self, FabricError> {
        if config.api_key.trim().is_empty() {
            return Err(FabricError::MissingApiKey);
        }
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))?;
        if base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase.into());
        }
        Ok(Self {
            base_url,
            api_key: config.api_key.clone(),
            agent_id: config.agent_id.clone().filter(|id| !id.is_empty()),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_agent_id(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }

    fn agent_id(&self, operation: &'static str, explicit: Option<&str>) -> Result<String, FabricError> {
        resolve_agent_id(operation, explicit, self.agent_id.as_deref())
    }

    fn url(&self, segments: &[&str], query: &[(&str, String)]) -> String {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url.into()
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("authorization".to_string(), format!("Bearer {}", self.api_key)),
            ("content-type".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), USER_AGENT.to_string()),
        ]
    }

    fn get(&self, segments: &[&str], query: &[(&str, String)]) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(segments, query),
            headers: self.headers(),
            body: None,
        }
    }

    fn delete(&self, segments: &[&str]) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.url(segments, &[]),
            headers: self.headers(),
            body: None,
        }
    }

    fn post<T: Serialize>(&self, segments: &[&str], body: &T) -> Result<HttpRequest, FabricError> {
        let body = serde_json::to_string(body).map_err(FabricError::Serialize)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url(segments, &[]),
            headers: self.headers(),
            body: Some(body),
        })
    }

    pub fn build_discover(&self, category: &str, options: &DiscoverOptions) -> HttpRequest {
        let mut query = vec![
            ("category", category.to_string()),
            ("limit", options.limit.to_string()),
        ];
        if let Some(min) = options.min_trust_score {
            query.push(("minTrustScore", min.to_string()));
        }
        if let Some(max) = options.max_price {
            query.push(("maxPrice", max.to_string()));
        }
        self.get(&["v1", "discover"], &query)
    }

    pub fn build_route(
        &self,
        category: &str,
        input: &Value,
        options: &RouteOptions,
    ) -> Result<HttpRequest, FabricError> {
        let agent_id = self.agent_id("route", options.agent_id.as_deref())?;
        self.post(
            &["v1", "route"],
            &RouteBody {
                agent_id: &agent_id,
                category,
                input,
                preferences: options
                    .preferences
                    .as_ref()
                    .filter(|p| **p != RoutePreferences::default()),
                budget: options.budget.as_deref().filter(|b| !b.is_empty()),
            },
        )
    }

    pub fn build_evaluate(&self, provider_id: &str) -> HttpRequest {
        self.get(&["v1", "evaluate", provider_id], &[])
    }

    pub fn build_feedback(
        &self,
        transaction_id: &str,
        score: u8,
        options: &FeedbackOptions,
    ) -> Result<HttpRequest, FabricError> {
        self.post(
            &["v1", "feedback"],
            &FeedbackBody {
                transaction_id,
                score,
                tags: (!options.tags.is_empty()).then_some(options.tags.as_slice()),
                comment: options.comment.as_deref().filter(|c| !c.is_empty()),
            },
        )
    }

    /// Feedback request rating the transaction of a `route` result.
    pub fn build_rating(&self, route_result: &Value, score: u8) -> Result<HttpRequest, FabricError> {
        let transaction_id = transaction_id(route_result).ok_or(FabricError::MissingField {
            field: "transactionId",
        })?;
        self.build_feedback(transaction_id, score, &FeedbackOptions::default())
    }

    pub fn build_list_budgets(&self) -> HttpRequest {
        self.get(&["v1", "budget"], &[])
    }

    pub fn build_create_budget(
        &self,
        limit_usd: f64,
        options: &CreateBudgetOptions,
    ) -> Result<HttpRequest, FabricError> {
        if !limit_usd.is_finite() {
            return Err(FabricError::NonFinite { field: "limitUsd" });
        }
        self.post(
            &["v1", "budget"],
            &CreateBudgetBody {
                limit_usd,
                period_type: options.period_type,
                hard_cap: options.hard_cap,
                agent_id: options.agent_id.as_deref().filter(|id| !id.is_empty()),
                alert_threshold: options.alert_threshold,
            },
        )
    }

    pub fn build_budget_status(&self, budget_id: &str) -> HttpRequest {
        self.get(&["v1", "budget", budget_id, "status"], &[])
    }

    pub fn build_list_favorites(&self, agent_id: Option<&str>) -> Result<HttpRequest, FabricError> {
        let agent_id = self.agent_id("list_favorites", agent_id)?;
        Ok(self.get(&["v1", "favorites", &agent_id], &[]))
    }

    pub fn build_add_favorite(
        &self,
        provider_id: &str,
        options: &AddFavoriteOptions,
    ) -> Result<HttpRequest, FabricError> {
        let agent_id = self.agent_id("add_favorite", options.agent_id.as_deref())?;
        self.post(
            &["v1", "favorites"],
            &AddFavoriteBody {
                agent_id: &agent_id,
                provider_id,
                priority: options.priority,
            },
        )
    }

    pub fn build_remove_favorite(&self, favorite_id: &str) -> HttpRequest {
        self.delete(&["v1", "favorites", favorite_id])
    }

    pub fn build_list_wallets(&self) -> HttpRequest {
        self.get(&["v1", "wallets"], &[])
    }

    pub fn build_create_wallet(&self, agent_id: Option<&str>) -> Result<HttpRequest, FabricError> {
        let agent_id = self.agent_id("create_wallet", agent_id)?;
        self.post(&["v1", "wallets"], &AgentBody { agent_id: &agent_id })
    }

    pub fn build_wallet_balance(&self, agent_id: Option<&str>) -> Result<HttpRequest, FabricError> {
        let agent_id = self.agent_id("wallet_balance", agent_id)?;
        Ok(self.get(&["v1", "wallets", &agent_id, "balance"], &[]))
    }

    pub fn build_chain_status(&self) -> HttpRequest {
        self.get(&["v1", "chain", "status"], &[])
    }

    pub fn build_mcp_tools(&self) -> HttpRequest {
        self.get(&["mcp", "tools"], &[])
    }

    pub fn build_mcp_execute(&self, tool: &str, arguments: &Value) -> Result<HttpRequest, FabricError> {
        self.post(&["mcp", "execute"], &McpExecuteBody { tool, arguments })
    }

    /// Interpret a response: the decoded body on 2xx, `FabricError::Api`
    /// otherwise.
    ///
    /// The body is decoded before the status is looked at, so a body that is
    /// not JSON is a `Decode` error whatever the status. An empty 2xx body
    /// decodes to `null`. Error bodies without an `error` object fall back to
    /// code `UNKNOWN` and message `HTTP {status}`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Payload, FabricError> {
        let status = response.status;
        let data: Value = if response.is_success() && response.body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&response.body).map_err(|source| FabricError::Decode { status, source })?
        };
        if !response.is_success() {
            return Err(api_error(&data, status));
        }
        Ok(data)
    }
}

fn api_error(data: &Value, status: u16) -> FabricError {
    let error = data.get("error");
    let code = error
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str)
        .unwrap_or("UNKNOWN");
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"));
    FabricError::Api {
        code: code.to_string(),
        message,
        status,
    }
}

impl std::fmt::Debug for FabricClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FabricClient")
            .field("base_url", &self.base_url.as_str())
            .field("agent_id", &self.agent_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> FabricClient {
        FabricClient::new(&ClientConfig::new("fab_test").with_base_url("https://x.test")).unwrap()
    }

    fn client_with_agent() -> FabricClient {
        FabricClient::new(
            &ClientConfig::new("fab_test")
                .with_base_url("https://x.test/")
                .with_agent_id("agent-default"),
        )
        .unwrap()
    }

    fn body(req: &HttpRequest) -> Value {
        serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn rejects_empty_api_key() {
        let err = FabricClient::new(&ClientConfig::new("")).unwrap_err();
        assert!(matches!(err, FabricError::MissingApiKey));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = FabricClient::new(&ClientConfig::new("k").with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, FabricError::InvalidBaseUrl(_)));
        let err = FabricClient::new(&ClientConfig::new("k").with_base_url("mailto:ops@x.test")).unwrap_err();
        assert!(matches!(err, FabricError::InvalidBaseUrl(_)));
    }

    #[test]
    fn every_request_carries_auth_content_type_and_user_agent() {
        let req = client().build_chain_status();
        assert_eq!(req.header("Authorization"), Some("Bearer fab_test"));
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert!(req.header("user-agent").unwrap().starts_with("fabric-sdk-rust/"));
    }

    #[test]
    fn evaluate_targets_provider_path() {
        let req = client().build_evaluate("p1");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "https://x.test/v1/evaluate/p1");
        assert!(req.body.is_none());
    }

    #[test]
    fn path_identifiers_are_encoded_as_one_segment() {
        let req = client().build_budget_status("a/b c");
        assert_eq!(req.url, "https://x.test/v1/budget/a%2Fb%20c/status");
    }

    #[test]
    fn base_url_path_prefix_is_kept() {
        let c = FabricClient::new(&ClientConfig::new("k").with_base_url("https://x.test/api/")).unwrap();
        assert_eq!(c.build_mcp_tools().url, "https://x.test/api/mcp/tools");
    }

    #[test]
    fn discover_omits_absent_filters() {
        let req = client().build_discover("translation", &DiscoverOptions::default());
        assert_eq!(req.url, "https://x.test/v1/discover?category=translation&limit=5");
        assert!(!req.url.contains("minTrustScore"));
        assert!(!req.url.contains("maxPrice"));
    }

    #[test]
    fn discover_sends_camel_case_filters() {
        let options = DiscoverOptions {
            limit: 3,
            min_trust_score: Some(0.8),
            max_price: Some(0.05),
        };
        let req = client().build_discover("image", &options);
        assert_eq!(
            req.url,
            "https://x.test/v1/discover?category=image&limit=3&minTrustScore=0.8&maxPrice=0.05"
        );
    }

    #[test]
    fn route_without_any_agent_id_fails_locally() {
        let err = client()
            .build_route("translation", &json!({}), &RouteOptions::default())
            .unwrap_err();
        assert!(matches!(err, FabricError::MissingAgentId { operation: "route" }));
    }

    #[test]
    fn route_falls_back_to_default_agent() {
        let req = client_with_agent()
            .build_route("translation", &json!({"text": "hola"}), &RouteOptions::default())
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "https://x.test/v1/route");
        assert_eq!(
            body(&req),
            json!({"agentId": "agent-default", "category": "translation", "input": {"text": "hola"}})
        );
    }

    #[test]
    fn route_explicit_agent_and_preferences() {
        let options = RouteOptions {
            agent_id: Some("agent-x".into()),
            preferences: Some(RoutePreferences {
                max_price: Some(0.1),
                ..Default::default()
            }),
            budget: Some("b-1".into()),
        };
        let req = client_with_agent()
            .build_route("translation", &json!({}), &options)
            .unwrap();
        let body = body(&req);
        assert_eq!(body["agentId"], "agent-x");
        assert_eq!(body["preferences"], json!({"maxPrice": 0.1}));
        assert_eq!(body["budget"], "b-1");
    }

    #[test]
    fn route_omits_empty_preferences() {
        let options = RouteOptions {
            preferences: Some(RoutePreferences::default()),
            budget: Some(String::new()),
            ..Default::default()
        };
        let req = client_with_agent()
            .build_route("translation", &json!({}), &options)
            .unwrap();
        assert_eq!(
            body(&req),
            json!({"agentId": "agent-default", "category": "translation", "input": {}})
        );
    }

    #[test]
    fn feedback_omits_empty_tags_and_comment() {
        let req = client()
            .build_feedback("tx-1", 4, &FeedbackOptions::default())
            .unwrap();
        assert_eq!(body(&req), json!({"transactionId": "tx-1", "score": 4}));

        let options = FeedbackOptions {
            tags: vec!["fast".into()],
            comment: Some("great".into()),
        };
        let req = client().build_feedback("tx-1", 5, &options).unwrap();
        assert_eq!(
            body(&req),
            json!({"transactionId": "tx-1", "score": 5, "tags": ["fast"], "comment": "great"})
        );
    }

    #[test]
    fn create_budget_omits_agent_when_absent() {
        let options = CreateBudgetOptions {
            period_type: PeriodType::Weekly,
            hard_cap: true,
            ..Default::default()
        };
        let req = client_with_agent().build_create_budget(100.0, &options).unwrap();
        assert_eq!(req.url, "https://x.test/v1/budget");
        assert_eq!(
            body(&req),
            json!({"limitUsd": 100.0, "periodType": "weekly", "hardCap": true})
        );
    }

    #[test]
    fn create_budget_defaults() {
        let req = client()
            .build_create_budget(25.5, &CreateBudgetOptions::default())
            .unwrap();
        assert_eq!(
            body(&req),
            json!({"limitUsd": 25.5, "periodType": "daily", "hardCap": false})
        );
    }

    #[test]
    fn create_budget_rejects_non_finite_limit() {
        for limit in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = client()
                .build_create_budget(limit, &CreateBudgetOptions::default())
                .unwrap_err();
            assert!(matches!(err, FabricError::NonFinite { field: "limitUsd" }));
        }
    }

    #[test]
    fn agent_scoped_builders_fail_without_agent() {
        let c = client();
        assert!(matches!(
            c.build_list_favorites(None),
            Err(FabricError::MissingAgentId { operation: "list_favorites" })
        ));
        assert!(matches!(
            c.build_add_favorite("p1", &AddFavoriteOptions::default()),
            Err(FabricError::MissingAgentId { operation: "add_favorite" })
        ));
        assert!(matches!(
            c.build_create_wallet(Some("")),
            Err(FabricError::MissingAgentId { operation: "create_wallet" })
        ));
        assert!(matches!(
            c.build_wallet_balance(None),
            Err(FabricError::MissingAgentId { operation: "wallet_balance" })
        ));
    }

    #[test]
    fn add_favorite_body() {
        let req = client_with_agent()
            .build_add_favorite("p1", &AddFavoriteOptions::default())
            .unwrap();
        assert_eq!(
            body(&req),
            json!({"agentId": "agent-default", "providerId": "p1", "priority": 0})
        );
    }

    #[test]
    fn remove_favorite_is_delete() {
        let req = client().build_remove_favorite("fav-9");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "https://x.test/v1/favorites/fav-9");
        assert!(req.body.is_none());
    }

    #[test]
    fn wallet_paths_use_resolved_agent() {
        let c = client_with_agent();
        assert_eq!(
            c.build_wallet_balance(None).unwrap().url,
            "https://x.test/v1/wallets/agent-default/balance"
        );
        assert_eq!(
            c.build_list_favorites(Some("agent-2")).unwrap().url,
            "https://x.test/v1/favorites/agent-2"
        );
        assert_eq!(body(&c.build_create_wallet(None).unwrap()), json!({"agentId": "agent-default"}));
    }

    #[test]
    fn mcp_execute_body() {
        let req = client()
            .build_mcp_execute("fabric_discover", &json!({"category": "image"}))
            .unwrap();
        assert_eq!(req.url, "https://x.test/mcp/execute");
        assert_eq!(
            body(&req),
            json!({"tool": "fabric_discover", "arguments": {"category": "image"}})
        );
    }

    #[test]
    fn resolve_prefers_explicit_then_default() {
        assert_eq!(resolve_agent_id("op", Some("a"), Some("b")).unwrap(), "a");
        assert_eq!(resolve_agent_id("op", None, Some("b")).unwrap(), "b");
        assert_eq!(resolve_agent_id("op", Some(""), Some("b")).unwrap(), "b");
        assert!(resolve_agent_id("op", None, None).is_err());
        assert!(resolve_agent_id("op", None, Some("")).is_err());
    }

    #[test]
    fn parse_success_returns_body_verbatim() {
        let body = json!({"providers": [], "count": 0, "nested": {"x": [1, 2]}});
        let parsed = client().parse_response(response(200, &body.to_string())).unwrap();
        assert_eq!(parsed, body);
    }

    #[test]
    fn parse_empty_success_body_is_null() {
        assert_eq!(client().parse_response(response(204, "")).unwrap(), Value::Null);
    }

    #[test]
    fn parse_success_with_bad_json_is_decode_error() {
        let err = client().parse_response(response(200, "not json")).unwrap_err();
        assert!(matches!(err, FabricError::Decode { status: 200, .. }));
    }

    #[test]
    fn parse_error_uses_remote_code_and_message() {
        let err = client()
            .parse_response(response(
                404,
                r#"{"error":{"code":"NOT_FOUND","message":"Provider not found"}}"#,
            ))
            .unwrap_err();
        match err {
            FabricError::Api { code, message, status } => {
                assert_eq!(code, "NOT_FOUND");
                assert_eq!(message, "Provider not found");
                assert_eq!(status, 404);
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        for body in ["{}", r#"{"error":{}}"#, r#"{"error":"slow down"}"#, "null"] {
            let err = client().parse_response(response(502, body)).unwrap_err();
            match err {
                FabricError::Api { code, message, status } => {
                    assert_eq!(code, "UNKNOWN", "body: {body}");
                    assert_eq!(message, "HTTP 502", "body: {body}");
                    assert_eq!(status, 502);
                }
                other => panic!("expected Api error, got {other:?}"),
            }
        }
    }

    #[test]
    fn parse_error_with_bad_json_is_decode_error() {
        for body in ["<html>Bad Gateway</html>", ""] {
            let err = client().parse_response(response(502, body)).unwrap_err();
            assert!(matches!(err, FabricError::Decode { status: 502, .. }), "body: {body}");
            assert!(!err.is_api_error());
            assert_eq!(err.status(), Some(502));
        }
    }

    #[test]
    fn parse_error_partial_fields() {
        let err = client()
            .parse_response(response(400, r#"{"error":{"code":"VALIDATION_ERROR"}}"#))
            .unwrap_err();
        assert_eq!(err.code(), Some("VALIDATION_ERROR"));
        assert_eq!(err.to_string(), "VALIDATION_ERROR (HTTP 400): HTTP 400");
    }

    #[test]
    fn build_rating_uses_route_transaction() {
        let route = json!({"transactionId": "tx-42", "result": {}});
        let req = client().build_rating(&route, 4).unwrap();
        assert_eq!(body(&req), json!({"transactionId": "tx-42", "score": 4}));

        let err = client().build_rating(&json!({"result": {}}), 4).unwrap_err();
        assert!(matches!(err, FabricError::MissingField { field: "transactionId" }));
    }

    #[test]
    fn attach_feedback_id_only_when_present() {
        let mut route = json!({"transactionId": "tx-1"});
        attach_feedback_id(&mut route, &json!({"message": "ok"}));
        assert!(route.get("feedbackId").is_none());
        attach_feedback_id(&mut route, &json!({"id": "fb-1"}));
        assert_eq!(route["feedbackId"], "fb-1");
    }
}

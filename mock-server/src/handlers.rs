use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::{new_address, new_id, Budget, Favorite, MockState, Provider, Store, Wallet};

const MAX_DISCOVER_LIMIT: usize = 50;
const MAX_WALLETS: usize = 10;
const CHAIN: &str = "base";

/// Error response in the Fabric wire shape: `{"error": {"code", "message"}}`.
#[derive(Debug)]
pub struct ApiFailure {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiFailure {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", format!("{what} not found"))
    }

    fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = json!({"error": {"code": self.code, "message": self.message}});
        (self.status, Json(body)).into_response()
    }
}

type Reply = Result<Json<Value>, ApiFailure>;
type Created = Result<(StatusCode, Json<Value>), ApiFailure>;

// --- discover ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverQuery {
    pub category: String,
    pub limit: Option<usize>,
    pub min_trust_score: Option<f64>,
    pub max_price: Option<f64>,
}

fn discover_payload(store: &Store, query: &DiscoverQuery) -> Value {
    let limit = query.limit.unwrap_or(5).clamp(1, MAX_DISCOVER_LIMIT);
    let providers: Vec<&Provider> = store
        .matching(&query.category, query.min_trust_score, query.max_price)
        .into_iter()
        .take(limit)
        .collect();
    json!({"providers": providers, "count": providers.len()})
}

pub async fn discover(State(state): State<MockState>, Query(query): Query<DiscoverQuery>) -> Reply {
    let store = state.store.read().await;
    Ok(Json(discover_payload(&store, &query)))
}

// --- route ---

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub max_price: Option<f64>,
    pub min_trust_score: Option<f64>,
    #[serde(default)]
    pub preferred_providers: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub agent_id: String,
    pub category: String,
    pub input: Value,
    pub preferences: Option<Preferences>,
    pub budget: Option<String>,
}

/// Picks a preferred provider if one matches, else the first match, and
/// echoes the input back as the result.
pub async fn route(State(state): State<MockState>, Json(req): Json<RouteRequest>) -> Reply {
    if req.agent_id.trim().is_empty() {
        return Err(ApiFailure::validation("agentId is required"));
    }
    let prefs = req.preferences.unwrap_or_default();
    let mut store = state.store.write().await;

    if let Some(budget_id) = req.budget.as_deref() {
        if !store.budgets.iter().any(|b| b.id == budget_id) {
            return Err(ApiFailure::not_found("Budget"));
        }
    }

    let candidates = store.matching(&req.category, prefs.min_trust_score, prefs.max_price);
    let preferred = candidates
        .iter()
        .find(|p| prefs.preferred_providers.contains(&p.id));
    let (provider, reason) = match (preferred, candidates.first()) {
        (Some(p), _) => ((*p).clone(), "preferred"),
        (None, Some(p)) => ((*p).clone(), "default"),
        (None, None) => {
            return Err(ApiFailure::new(
                StatusCode::NOT_FOUND,
                "NO_PROVIDERS",
                format!("No providers available for category '{}'", req.category),
            ))
        }
    };

    let transaction_id = new_id("tx");
    store.transactions.insert(transaction_id.clone());
    Ok(Json(json!({
        "transactionId": transaction_id,
        "provider": {"id": provider.id, "name": provider.name, "trustScore": provider.trust_score},
        "result": {"echo": req.input},
        "payment": {"total": provider.price, "chain": CHAIN, "mode": "mock"},
        "routing": {"selectionReason": reason},
    })))
}

// --- evaluate ---

fn evaluate_payload(store: &Store, provider_id: &str) -> Result<Value, ApiFailure> {
    let provider = store
        .provider(provider_id)
        .ok_or_else(|| ApiFailure::not_found("Provider"))?;
    Ok(json!({
        "provider": provider,
        "trust": {"score": provider.trust_score},
    }))
}

pub async fn evaluate(State(state): State<MockState>, Path(provider_id): Path<String>) -> Reply {
    let store = state.store.read().await;
    evaluate_payload(&store, &provider_id).map(Json)
}

// --- feedback ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    pub transaction_id: String,
    pub score: i64,
    #[serde(default)]
    pub tags: Vec<String>,
}

pub async fn feedback(State(state): State<MockState>, Json(req): Json<FeedbackRequest>) -> Created {
    if state.fail_feedback() {
        return Err(ApiFailure::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "SERVICE_UNAVAILABLE",
            "Feedback service unavailable",
        ));
    }
    if !(1..=5).contains(&req.score) {
        return Err(ApiFailure::validation("score must be an integer from 1 to 5"));
    }
    if !state.store.read().await.transactions.contains(&req.transaction_id) {
        return Err(ApiFailure::not_found("Transaction"));
    }
    let body = json!({
        "id": new_id("fb"),
        "transactionId": req.transaction_id,
        "score": req.score,
        "tags": req.tags,
    });
    Ok((StatusCode::CREATED, Json(body)))
}

// --- budget ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetRequest {
    pub agent_id: Option<String>,
    pub limit_usd: f64,
    #[serde(default = "default_period")]
    pub period_type: String,
    #[serde(default)]
    pub hard_cap: bool,
    pub alert_threshold: Option<f64>,
}

fn default_period() -> String {
    "daily".to_string()
}

pub async fn list_budgets(State(state): State<MockState>) -> Reply {
    let store = state.store.read().await;
    Ok(Json(json!({"budgets": store.budgets})))
}

pub async fn create_budget(State(state): State<MockState>, Json(req): Json<CreateBudgetRequest>) -> Created {
    if req.limit_usd.is_nan() || req.limit_usd <= 0.0 {
        return Err(ApiFailure::validation("limitUsd must be positive"));
    }
    if !["daily", "weekly", "monthly"].contains(&req.period_type.as_str()) {
        return Err(ApiFailure::validation("periodType must be daily, weekly or monthly"));
    }
    let budget = Budget {
        id: new_id("bud"),
        agent_id: req.agent_id,
        limit_usd: req.limit_usd,
        period_type: req.period_type,
        hard_cap: req.hard_cap,
        alert_threshold: req.alert_threshold,
    };
    let body = json!({"budget": budget});
    state.store.write().await.budgets.push(budget);
    Ok((StatusCode::CREATED, Json(body)))
}

/// Spend is not tracked; every budget reports zero spent.
pub async fn budget_status(State(state): State<MockState>, Path(budget_id): Path<String>) -> Reply {
    let store = state.store.read().await;
    let budget = store
        .budgets
        .iter()
        .find(|b| b.id == budget_id)
        .ok_or_else(|| ApiFailure::not_found("Budget"))?;
    Ok(Json(json!({
        "id": budget.id,
        "limitUsd": budget.limit_usd,
        "spentUsd": 0.0,
        "remaining": budget.limit_usd,
    })))
}

// --- favorites ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub agent_id: String,
    pub provider_id: String,
    #[serde(default)]
    pub priority: i32,
}

pub async fn list_favorites(State(state): State<MockState>, Path(agent_id): Path<String>) -> Reply {
    let store = state.store.read().await;
    let mut favorites: Vec<&Favorite> = store.favorites.iter().filter(|f| f.agent_id == agent_id).collect();
    favorites.sort_by_key(|f| std::cmp::Reverse(f.priority));
    let favorites: Vec<Value> = favorites
        .into_iter()
        .map(|f| {
            let mut value = json!(f);
            if let Some(p) = store.provider(&f.provider_id) {
                value["provider"] = json!({
                    "id": p.id,
                    "name": p.name,
                    "category": p.category,
                    "trustScore": p.trust_score,
                    "basePrice": p.price,
                });
            }
            value
        })
        .collect();
    Ok(Json(json!({"favorites": favorites})))
}

pub async fn add_favorite(State(state): State<MockState>, Json(req): Json<AddFavoriteRequest>) -> Created {
    let mut store = state.store.write().await;
    if store.provider(&req.provider_id).is_none() {
        return Err(ApiFailure::not_found("Provider"));
    }
    let favorite = Favorite {
        id: new_id("fav"),
        agent_id: req.agent_id,
        provider_id: req.provider_id,
        priority: req.priority,
    };
    let body = json!({"favorite": favorite});
    store.favorites.push(favorite);
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn remove_favorite(State(state): State<MockState>, Path(favorite_id): Path<String>) -> Reply {
    let mut store = state.store.write().await;
    let idx = store
        .favorites
        .iter()
        .position(|f| f.id == favorite_id)
        .ok_or_else(|| ApiFailure::not_found("Favorite"))?;
    store.favorites.remove(idx);
    Ok(Json(json!({"deleted": true})))
}

// --- wallets ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub agent_id: String,
}

pub async fn list_wallets(State(state): State<MockState>) -> Reply {
    let store = state.store.read().await;
    Ok(Json(json!({
        "wallets": store.wallets,
        "maxWallets": MAX_WALLETS,
        "used": store.wallets.len(),
    })))
}

pub async fn create_wallet(State(state): State<MockState>, Json(req): Json<CreateWalletRequest>) -> Created {
    let mut store = state.store.write().await;
    if store.wallet(&req.agent_id).is_some() {
        return Err(ApiFailure::new(
            StatusCode::CONFLICT,
            "WALLET_EXISTS",
            "Agent already has a wallet",
        ));
    }
    if store.wallets.len() >= MAX_WALLETS {
        return Err(ApiFailure::new(
            StatusCode::FORBIDDEN,
            "WALLET_LIMIT",
            "Wallet limit reached for this plan",
        ));
    }
    let wallet = Wallet {
        address: new_address(),
        agent_id: req.agent_id,
        chain: CHAIN.to_string(),
    };
    let body = json!({"wallet": wallet});
    store.wallets.push(wallet);
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn wallet_balance(State(state): State<MockState>, Path(agent_id): Path<String>) -> Reply {
    let store = state.store.read().await;
    let wallet = store
        .wallet(&agent_id)
        .ok_or_else(|| ApiFailure::not_found("Wallet"))?;
    Ok(Json(json!({
        "agentId": wallet.agent_id,
        "address": wallet.address,
        "chain": wallet.chain,
        "balances": {"usdc": 0.0, "eth": 0.0},
    })))
}

// --- chain ---

pub async fn chain_status(State(state): State<MockState>) -> Response {
    if state.chain_offline() {
        return (StatusCode::SERVICE_UNAVAILABLE, Json(json!({}))).into_response();
    }
    Json(json!({"chain": CHAIN, "chainId": 8453, "connected": true, "mode": "mock"})).into_response()
}

// --- mcp ---

pub async fn mcp_tools() -> Json<Value> {
    Json(json!({
        "tools": [
            {
                "name": "fabric_discover",
                "description": "Find providers in a category",
                "inputSchema": {"type": "object", "required": ["category"]},
            },
            {
                "name": "fabric_evaluate",
                "description": "Trust profile of a single provider",
                "inputSchema": {"type": "object", "required": ["providerId"]},
            },
        ],
        "version": "2024-11-05",
        "protocol": "mcp",
    }))
}

#[derive(Deserialize)]
pub struct McpExecuteRequest {
    pub tool: String,
    pub arguments: Value,
}

pub async fn mcp_execute(State(state): State<MockState>, Json(req): Json<McpExecuteRequest>) -> Reply {
    let store = state.store.read().await;
    match req.tool.as_str() {
        "fabric_discover" => {
            let query: DiscoverQuery = serde_json::from_value(req.arguments)
                .map_err(|e| ApiFailure::validation(format!("invalid arguments: {e}")))?;
            Ok(Json(discover_payload(&store, &query)))
        }
        "fabric_evaluate" => {
            let provider_id = req
                .arguments
                .get("providerId")
                .and_then(Value::as_str)
                .ok_or_else(|| ApiFailure::validation("providerId is required"))?;
            evaluate_payload(&store, provider_id).map(Json)
        }
        other => Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            "UNKNOWN_TOOL",
            format!("Unknown tool: {other}"),
        )),
    }
}

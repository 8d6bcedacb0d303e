//! Per-operation request options.
//!
//! # Design
//! Every optional argument is an explicit field. `None` (and empty tag
//! lists) are left out of the query string or JSON body entirely, never sent
//! as `null`. Responses stay `serde_json::Value` and are returned verbatim.

use serde::{Deserialize, Serialize};

/// Success payload of every operation.
pub type Payload = serde_json::Value;

/// Optional filters for `discover`.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverOptions {
    /// Maximum number of providers returned. Always sent.
    pub limit: u32,
    pub min_trust_score: Option<f64>,
    pub max_price: Option<f64>,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            limit: 5,
            min_trust_score: None,
            max_price: None,
        }
    }
}

/// Provider selection hints for `route`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_trust_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_providers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_latency_ms: Option<u64>,
}

/// Optional arguments for `route`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteOptions {
    /// Overrides the client's default agent.
    pub agent_id: Option<String>,
    pub preferences: Option<RoutePreferences>,
    /// Budget id to charge.
    pub budget: Option<String>,
}

/// Optional arguments for `feedback`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackOptions {
    pub tags: Vec<String>,
    pub comment: Option<String>,
}

/// Budget reset period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

/// Optional arguments for `create_budget`.
///
/// Unlike most agent-scoped calls, a budget without an agent id applies to
/// the whole account, so the client default is not substituted here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateBudgetOptions {
    pub agent_id: Option<String>,
    pub period_type: PeriodType,
    pub hard_cap: bool,
    /// Fraction of the limit (0..1) at which the server raises an alert.
    pub alert_threshold: Option<f64>,
}

/// Optional arguments for `add_favorite`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddFavoriteOptions {
    pub agent_id: Option<String>,
    pub priority: i32,
}

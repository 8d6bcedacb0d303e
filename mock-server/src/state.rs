//! In-memory Fabric state plus the request journal and failure switches
//! tests use to steer the server.

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub registry_id: String,
    pub name: String,
    pub category: String,
    pub trust_score: f64,
    pub price: f64,
    pub currency: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub agent_id: Option<String>,
    pub limit_usd: f64,
    pub period_type: String,
    pub hard_cap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: String,
    pub agent_id: String,
    pub provider_id: String,
    pub priority: i32,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub address: String,
    pub agent_id: String,
    pub chain: String,
}

/// Fixture data. Providers are listed best first within each category and
/// served in that order; nothing is scored or aggregated.
#[derive(Debug, Default)]
pub struct Store {
    pub providers: Vec<Provider>,
    pub transactions: HashSet<String>,
    pub budgets: Vec<Budget>,
    pub favorites: Vec<Favorite>,
    pub wallets: Vec<Wallet>,
}

impl Store {
    pub fn seeded() -> Self {
        let provider = |id: &str, name: &str, category: &str, trust: f64, price: f64| Provider {
            id: id.to_string(),
            registry_id: format!("reg_{id}"),
            name: name.to_string(),
            category: category.to_string(),
            trust_score: trust,
            price,
            currency: "USDC".to_string(),
        };
        Self {
            providers: vec![
                provider("deepl-translate", "DeepL Translate", "translation", 92.0, 0.02),
                provider("lingo-fast", "Lingo Fast", "translation", 78.0, 0.005),
                provider("babel-cheap", "Babel Cheap", "translation", 55.0, 0.001),
                provider("pixel-forge", "Pixel Forge", "image", 88.0, 0.04),
                provider("canvas-lite", "Canvas Lite", "image", 70.0, 0.01),
                provider("seek-web", "Seek Web", "search", 81.0, 0.003),
            ],
            ..Default::default()
        }
    }

    pub fn provider(&self, id: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    /// Providers in `category` passing the filters, in catalog order.
    pub fn matching(&self, category: &str, min_trust_score: Option<f64>, max_price: Option<f64>) -> Vec<&Provider> {
        self.providers
            .iter()
            .filter(|p| p.category == category)
            .filter(|p| min_trust_score.map_or(true, |min| p.trust_score >= min))
            .filter(|p| max_price.map_or(true, |max| p.price <= max))
            .collect()
    }

    pub fn wallet(&self, agent_id: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.agent_id == agent_id)
    }
}

/// One request as seen by the server, before auth is checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub user_agent: Option<String>,
}

/// Shared server state. Cheap to clone; clones share everything.
#[derive(Clone, Debug)]
pub struct MockState {
    pub(crate) store: Arc<RwLock<Store>>,
    journal: Arc<Mutex<Vec<RecordedRequest>>>,
    fail_feedback: Arc<AtomicBool>,
    chain_offline: Arc<AtomicBool>,
}

impl Default for MockState {
    fn default() -> Self {
        Self::new()
    }
}

impl MockState {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::seeded())),
            journal: Arc::new(Mutex::new(Vec::new())),
            fail_feedback: Arc::new(AtomicBool::new(false)),
            chain_offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.journal.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn clear_requests(&self) {
        self.journal.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    pub(crate) fn record(&self, request: RecordedRequest) {
        self.journal.lock().unwrap_or_else(|e| e.into_inner()).push(request);
    }

    /// Make `POST /v1/feedback` answer 503.
    pub fn set_fail_feedback(&self, on: bool) {
        self.fail_feedback.store(on, Ordering::SeqCst);
    }

    pub fn fail_feedback(&self) -> bool {
        self.fail_feedback.load(Ordering::SeqCst)
    }

    /// Make `GET /v1/chain/status` answer 503 with an empty JSON object.
    pub fn set_chain_offline(&self, on: bool) {
        self.chain_offline.store(on, Ordering::SeqCst);
    }

    pub fn chain_offline(&self) -> bool {
        self.chain_offline.load(Ordering::SeqCst)
    }
}

pub fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// Random 20-byte hex address.
pub fn new_address() -> String {
    let tail = Uuid::new_v4().simple().to_string();
    format!("0x{}{}", Uuid::new_v4().simple(), &tail[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_filters_in_catalog_order() {
        let store = Store::seeded();
        let all = store.matching("translation", None, None);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, "deepl-translate");

        let cheap = store.matching("translation", None, Some(0.01));
        assert!(cheap.iter().all(|p| p.price <= 0.01));
        assert_eq!(cheap.len(), 2);

        let trusted = store.matching("translation", Some(80.0), None);
        assert_eq!(trusted.len(), 1);

        assert!(store.matching("nonexistent", None, None).is_empty());
    }

    #[test]
    fn journal_records_and_clears() {
        let state = MockState::new();
        state.record(RecordedRequest {
            method: "GET".into(),
            path: "/v1/wallets".into(),
            query: None,
            authorization: Some("Bearer k".into()),
            content_type: None,
            user_agent: None,
        });
        assert_eq!(state.requests().len(), 1);
        state.clear_requests();
        assert!(state.requests().is_empty());
    }

    #[test]
    fn failure_switches_toggle() {
        let state = MockState::new();
        assert!(!state.fail_feedback());
        state.set_fail_feedback(true);
        assert!(state.clone().fail_feedback());
        state.set_chain_offline(true);
        assert!(state.chain_offline());
    }

    #[test]
    fn new_address_is_twenty_bytes() {
        let address = new_address();
        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 42);
    }
}

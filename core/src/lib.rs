//! Client library for the Fabric trust API.
//!
//! # Overview
//! Every operation maps one typed call to one REST endpoint: build the
//! request, attach bearer auth, dispatch, decode the JSON body, and turn
//! non-2xx responses into [`FabricError::Api`].
//!
//! # Design
//! - [`FabricClient`] builds [`HttpRequest`] values and interprets
//!   [`HttpResponse`] values without touching the network.
//! - [`Fabric`] (blocking, `ureq`) and [`FabricAsync`] (async, `reqwest`)
//!   execute those descriptors and expose the same method surface.
//! - Agent-scoped operations resolve the agent id before any I/O and fail
//!   with [`FabricError::MissingAgentId`] when neither the call nor the
//!   config supplies one.
//! - Closing a handle is final: later calls return [`FabricError::Closed`].
//!
//! ```no_run
//! use fabric_sdk::{ClientConfig, DiscoverOptions, Fabric};
//!
//! let fabric = Fabric::new(ClientConfig::new("fab_live_...").with_agent_id("agent-1"))?;
//! let providers = fabric.discover("translation", &DiscoverOptions::default())?;
//! println!("{}", providers["count"]);
//! # Ok::<(), fabric_sdk::FabricError>(())
//! ```

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod nonblocking;
pub mod types;

pub use blocking::Fabric;
pub use client::{resolve_agent_id, FabricClient};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, USER_AGENT};
pub use error::FabricError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use nonblocking::FabricAsync;
pub use types::{
    AddFavoriteOptions, CreateBudgetOptions, DiscoverOptions, FeedbackOptions, Payload,
    PeriodType, RouteOptions, RoutePreferences,
};

//! Operator console for a multi-region HTTP proxy service.
//!
//! # Architecture Overview
//!
//! ```text
//!   operator input                                   external services
//!   ──────────────                                   ─────────────────
//!   url/region/key ──▶ proxy::ProxyTestController ─┐
//!                                                   ├─▶ dispatch::HttpDispatcher ──▶ POST {proxy}/fetch
//!   page url + pw  ──▶ activation::Activation-    ─┘         │                      POST {api}/v2/activate
//!                      Controller                            ▼
//!                                                  Result<JSON, OperationError>
//!
//!   snapshots (status, result/redirect, error) ──▶ presentation (CLI)
//!
//!   Cross-cutting: config (TOML + validation), observability (tracing, metrics),
//!                  lifecycle (Idle / InFlight / Succeeded / Failed)
//! ```

// Core
pub mod dispatch;
pub mod lifecycle;

// Flows
pub mod activation;
pub mod proxy;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::ClientConfig;
pub use dispatch::{Dispatch, ErrorKind, HttpDispatcher, OperationError, RequestSpec};
pub use lifecycle::{LifecycleState, Outcome};

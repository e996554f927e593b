//! Proxy test flow.
//!
//! # Data Flow
//! ```text
//! ProxyQuery (url, region, api key as typed)
//!     → query.rs (validation gate, region parsing)
//!     → query.rs (RequestSpec: POST {base}/fetch?region=.., x-api-key)
//!     → Dispatch
//!     → artifact.rs (ProxyResult, optional HtmlArtifact from `result`)
//!     → controller.rs (ProxyTestSnapshot: status, result, error)
//! ```

pub mod artifact;
pub mod controller;
pub mod query;
pub mod region;

pub use artifact::{HtmlArtifact, ProxyResult};
pub use controller::{ProxyTestController, ProxyTestSnapshot};
pub use query::{ProxyQuery, ValidatedQuery};
pub use region::{Region, UnknownRegion};

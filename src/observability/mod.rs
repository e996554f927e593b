//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher and controllers produce:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (dispatch counters and latency histograms)
//!
//! Consumers:
//!     → Operator terminal (stderr)
//!     → Whatever recorder an embedding application installs
//! ```
//!
//! # Design Decisions
//! - Secrets (API keys, passwords, tokens) are never recorded as fields
//! - Every dispatch carries a request ID that appears in its log events

pub mod logging;
pub mod metrics;

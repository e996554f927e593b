//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Controller (validated input)
//!     → request.rs (RequestSpec: method, absolute URL, headers, body)
//!     → client.rs (HttpDispatcher: send with timeouts, add x-request-id)
//!     → client.rs (interpret: 2xx JSON | non-2xx detail | parse failure)
//!     → Result<serde_json::Value, OperationError> back to the controller
//! ```
//!
//! # Design Decisions
//! - The dispatcher performs no business validation
//! - No retries at this layer
//! - `Dispatch` is the seam controllers are generic over, so tests can
//!   count calls without a network

pub mod client;
pub mod error;
pub mod request;

pub use client::{Dispatch, HttpDispatcher, X_REQUEST_ID};
pub use error::{DispatchResult, ErrorKind, OperationError};
pub use request::{Method, RequestSpec};

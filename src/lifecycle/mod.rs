//! Controller lifecycle.
//!
//! # State Transitions
//! ```text
//! Idle      → InFlight:  trigger accepted, input valid
//! InFlight  → Succeeded: dispatcher returned a payload
//! InFlight  → Failed:    dispatcher returned an OperationError
//! trigger   → Failed:    proxy test input invalid (no dispatch)
//! trigger   → Idle:      activation input invalid (no dispatch)
//! any       → InFlight:  next human-initiated trigger (not while InFlight)
//! ```
//!
//! # Design Decisions
//! - A trigger while InFlight is rejected, never queued or cancelled
//! - The in-flight check and the move to InFlight happen under one lock, so two
//!   concurrent triggers cannot both start a dispatch

pub mod state;

pub use state::{LifecycleState, Outcome};

//! Account activation flow.
//!
//! # Data Flow
//! ```text
//! page location (Locator) ─┐
//!                          ├→ controller.rs (token check, then password.rs policy + match)
//! PasswordForm ────────────┘
//!     → ActivationRequest → RequestSpec: POST {api_base}/v2/activate
//!     → Dispatch
//!     → ActivationSnapshot (status, error, redirect)
//! ```
//!
//! # Design Decisions
//! - The token is never typed by the user; it comes only from the locator
//! - Password values never appear in logs, `Debug` output or error messages

pub mod controller;
pub mod locator;
pub mod password;

pub use controller::{ActivationController, ActivationRequest, ActivationSnapshot, Redirect};
pub use locator::{Locator, PageLocator, TOKEN_PARAM};
pub use password::{PasswordForm, PasswordPolicy};

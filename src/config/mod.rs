//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → command-line overrides (re-validated)
//!     → ClientConfig (validated, immutable)
//!     → read by the dispatcher and both controllers at construction
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so no file is required
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_overrides, load_config, ConfigError};
pub use schema::{ActivationConfig, ClientConfig, EndpointConfig, ObservabilityConfig, TimeoutConfig};

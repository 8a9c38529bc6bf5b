//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file)
//!     → command line overrides (port, base path, host, log level)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc with the request dispatcher
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::DownloadConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::PayloadFill;
pub use schema::ServerConfig;
pub use schema::StaticFilesConfig;
pub use schema::TimeoutConfig;

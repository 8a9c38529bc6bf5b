//! Speed test server library.
//!
//! Serves static assets from a base directory and a small set of network
//! diagnostic endpoints: `/download`, `/ip`, `/ping` and `/upload`.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod payload;
pub mod routing;
pub mod static_files;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;

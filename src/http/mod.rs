//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, connect info, timeout layer)
//!     → dispatch: routing::Router::classify
//!     → handlers.rs (download stream, static file)
//!       or response.rs (ip echo, empty 200, not found)
//!     → Send to client
//! ```

pub mod handlers;
pub mod response;
pub mod server;

pub use response::ServeError;
pub use server::{AppState, HttpServer};

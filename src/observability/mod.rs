//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup, shutdown and error paths:
//!     → logging.rs (structured log events)
//!
//! Request dispatch and download tasks:
//!     → metrics.rs (counters, only when an exporter is installed)
//!
//! Consumers:
//!     → stdout (tracing-subscriber fmt layer)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - No per-request access log; diagnostic traffic would drown real events
//! - Metrics are cheap (atomic increments) and no-ops without a recorder

pub mod logging;
pub mod metrics;

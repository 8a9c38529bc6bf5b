//! Static asset serving.
//!
//! # Data Flow
//! ```text
//! request path
//!     → resolver.rs target_for (decode, normalize, join base path)
//!     → content_type.rs (extension table)
//!     → resolver.rs load (exists? read whole file)
//!     → StaticFile or ServeError::FileNotFound
//! ```

pub mod content_type;
pub mod resolver;

pub use content_type::content_type_for;
pub use resolver::{StaticFile, StaticResolver, StaticTarget, INDEX_FILE};

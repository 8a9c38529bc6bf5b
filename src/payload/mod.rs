//! Synthetic download payloads.
//!
//! # Data Flow
//! ```text
//! query string
//!     → params.rs (parse-or-default: size, chunkSize)
//!     → streamer.rs ChunkPlan (floor(size / chunkSize) chunks)
//!     → PayloadStreamer writes one shared chunk buffer to a ChunkSink
//!     → ChannelSink → response body → client
//! ```

pub mod params;
pub mod streamer;

pub use params::{parse_or, DownloadParams, DEFAULT_CHUNK_SIZE, DEFAULT_SIZE};
pub use streamer::{ChannelSink, ChunkPlan, ChunkSink, PayloadStreamer, StreamAborted};

//! Download query parameters.
//!
//! Parameters never fail a request: anything missing or unparsable
//! resolves to the documented default.

use std::str::FromStr;

/// Default payload size (8 MiB).
pub const DEFAULT_SIZE: u64 = 8 * 1024 * 1024;

/// Default chunk size (64 KiB).
pub const DEFAULT_CHUNK_SIZE: u64 = 64 * 1024;

/// Parse `key` from a URL query string, or return `default`.
///
/// The first occurrence of `key` wins. Absent keys, empty values and values
/// that do not parse as `T` all yield `default`.
pub fn parse_or<T: FromStr>(query: Option<&str>, key: &str, default: T) -> T {
    let Some(query) = query else {
        return default;
    };

    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(default)
}

/// Resolved download parameters. `chunk_size` is always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadParams {
    pub size: u64,
    pub chunk_size: u64,
}

impl DownloadParams {
    /// Resolve `size` and `chunkSize` from a query string.
    ///
    /// A `chunkSize` of zero, or one above `max_chunk_size`, is treated like
    /// an unparsable value.
    pub fn from_query(query: Option<&str>, max_chunk_size: u64) -> Self {
        let size = parse_or(query, "size", DEFAULT_SIZE);
        let chunk_size = match parse_or(query, "chunkSize", DEFAULT_CHUNK_SIZE) {
            0 => DEFAULT_CHUNK_SIZE,
            n if n > max_chunk_size => DEFAULT_CHUNK_SIZE,
            n => n,
        };

        Self { size, chunk_size }
    }
}

impl Default for DownloadParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

//! Extension to MIME type table.

use std::path::Path;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Infer the `Content-Type` of a file from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("css") => "text/css",
        Some("html") => "text/html",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        _ => OCTET_STREAM,
    }
}

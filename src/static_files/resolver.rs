//! Request path to file resolution.
//!
//! # Responsibilities
//! - Percent-decode and normalize the request path
//! - Join it onto the base directory, never escaping it
//! - Check existence, read the whole file, attach the content type
//!
//! # Design Decisions
//! - `..` segments are rejected outright rather than resolved
//! - Directories are served through their `index.html`, never listed
//! - The file handle lives only for the duration of `fs::read`

use std::io;
use std::path::{Component, Path, PathBuf};

use axum::body::Bytes;
use percent_encoding::percent_decode_str;
use tokio::fs;

use crate::http::response::ServeError;
use crate::static_files::content_type::content_type_for;

/// File served for `/` and for directory requests.
pub const INDEX_FILE: &str = "index.html";

/// A request path mapped onto the filesystem. Nothing has been read yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticTarget {
    /// Path as requested, used in not-found messages.
    pub request_path: String,
    /// Candidate file under the base directory.
    pub file_path: PathBuf,
    pub content_type: &'static str,
}

/// A file read into memory.
#[derive(Debug, Clone)]
pub struct StaticFile {
    pub contents: Bytes,
    pub content_type: &'static str,
}

/// Resolves request paths against a base directory.
#[derive(Debug, Clone)]
pub struct StaticResolver {
    base_path: PathBuf,
}

impl StaticResolver {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Map a request path to a candidate file.
    ///
    /// Returns `None` when the path cannot be represented under the base
    /// directory (parent segments, invalid UTF-8 after decoding).
    pub fn target_for(&self, request_path: &str) -> Option<StaticTarget> {
        let relative = normalize(request_path)?;
        let content_type = content_type_for(&relative);

        Some(StaticTarget {
            request_path: request_path.to_string(),
            file_path: self.base_path.join(relative),
            content_type,
        })
    }

    /// Read the file behind `target`.
    pub async fn load(&self, target: &StaticTarget) -> Result<StaticFile, ServeError> {
        let not_found = || ServeError::FileNotFound(target.request_path.clone());

        let mut path = target.file_path.clone();
        let mut content_type = target.content_type;

        let metadata = fs::metadata(&path).await.map_err(|_| not_found())?;
        if metadata.is_dir() {
            path.push(INDEX_FILE);
            content_type = content_type_for(&path);
            match fs::metadata(&path).await {
                Ok(m) if m.is_file() => {}
                _ => return Err(not_found()),
            }
        } else if !metadata.is_file() {
            return Err(not_found());
        }

        let contents = fs::read(&path).await.map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => not_found(),
            _ => ServeError::Read {
                path: path.clone(),
                source,
            },
        })?;

        Ok(StaticFile {
            contents: Bytes::from(contents),
            content_type,
        })
    }

    /// `target_for` followed by `load`.
    pub async fn resolve(&self, request_path: &str) -> Result<StaticFile, ServeError> {
        let target = self
            .target_for(request_path)
            .ok_or_else(|| ServeError::FileNotFound(request_path.to_string()))?;
        self.load(&target).await
    }
}

/// Decode and normalize a request path into a relative filesystem path.
fn normalize(request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(request_path).decode_utf8().ok()?;

    let mut normalized = PathBuf::new();
    for component in Path::new(decoded.as_ref()).components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Normal(segment) => normalized.push(segment),
            Component::ParentDir | Component::Prefix(_) => return None,
        }
    }

    Some(normalized)
}

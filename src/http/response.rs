//! Response construction and error mapping.
//!
//! # Responsibilities
//! - Build the fixed diagnostic responses (empty 200, IP text)
//! - Map serving errors to HTTP status codes
//!
//! # Design Decisions
//! - Fixed responses carry no headers beyond what hyper adds for framing
//! - Not-found bodies always name the requested path
//! - Read failures are logged here and reported as a bare 500

use std::io;
use std::net::IpAddr;
use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::static_files::StaticFile;

/// Errors that end a request with a non-200 status.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("File Not Found: {0}")]
    FileNotFound(String),

    #[error("Not Found: {0}")]
    NoRoute(String),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::FileNotFound(_) | ServeError::NoRoute(_) => StatusCode::NOT_FOUND,
            ServeError::Read { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ServeError::Read { .. } => {
                tracing::warn!(error = %self, "Static file read failed");
                (status, "Internal Server Error").into_response()
            }
            _ => (status, self.to_string()).into_response(),
        }
    }
}

/// 200 with an empty body.
pub fn empty() -> Response {
    Response::new(Body::empty())
}

/// 200 with the client address as plain text.
///
/// IPv4-mapped IPv6 addresses are reported in dotted-quad form.
pub fn ip_echo(ip: IpAddr) -> Response {
    Response::new(Body::from(ip.to_canonical().to_string()))
}

/// Response extension marking a static file, the only compressible body.
#[derive(Debug, Clone, Copy)]
pub struct StaticAsset;

impl IntoResponse for StaticFile {
    fn into_response(self) -> Response {
        let mut response = ([(header::CONTENT_TYPE, self.content_type)], self.contents).into_response();
        response.extensions_mut().insert(StaticAsset);
        response
    }
}

//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled diagnostic rules
//! - Classify each request into exactly one `Route`
//! - Fall back to static files for GET, not-found for everything else
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) prefix scan over a handful of rules
//! - Explicit NotFound rather than silent default
//! - Classification is pure: no filesystem access happens here

use axum::http::{Method, Uri};

use crate::config::ServerConfig;
use crate::payload::DownloadParams;
use crate::routing::matcher::{AndMatcher, Matcher, RequestHead};
use crate::static_files::{StaticResolver, StaticTarget, INDEX_FILE};

/// The diagnostic endpoints, in match order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint {
    Download,
    IpEcho,
    Ping,
    Upload,
}

#[derive(Debug)]
struct Rule {
    matcher: AndMatcher,
    endpoint: Endpoint,
}

/// What a request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Download(DownloadParams),
    IpEcho,
    Ping,
    Upload,
    StaticFile(StaticTarget),
    NotFound(String),
}

impl Route {
    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Download(_) => "download",
            Route::IpEcho => "ip",
            Route::Ping => "ping",
            Route::Upload => "upload",
            Route::StaticFile(_) => "static",
            Route::NotFound(_) => "not_found",
        }
    }
}

/// Request classifier.
#[derive(Debug)]
pub struct Router {
    rules: Vec<Rule>,
    resolver: StaticResolver,
    max_chunk_size: u64,
}

impl Router {
    pub fn new(resolver: StaticResolver, max_chunk_size: u64) -> Self {
        let rules = vec![
            Rule {
                matcher: AndMatcher::method_and_prefix(Method::GET, "/download"),
                endpoint: Endpoint::Download,
            },
            Rule {
                matcher: AndMatcher::method_and_prefix(Method::GET, "/ip"),
                endpoint: Endpoint::IpEcho,
            },
            Rule {
                matcher: AndMatcher::method_and_prefix(Method::GET, "/ping"),
                endpoint: Endpoint::Ping,
            },
            Rule {
                matcher: AndMatcher::method_and_prefix(Method::POST, "/upload"),
                endpoint: Endpoint::Upload,
            },
        ];

        Self {
            rules,
            resolver,
            max_chunk_size,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            StaticResolver::new(config.static_files.base_path.clone()),
            config.download.max_chunk_size,
        )
    }

    pub fn resolver(&self) -> &StaticResolver {
        &self.resolver
    }

    /// Classify a request by method and URI.
    pub fn classify(&self, method: &Method, uri: &Uri) -> Route {
        let path = uri.path();
        let head = RequestHead { method, path };

        if let Some(rule) = self.rules.iter().find(|r| r.matcher.matches(&head)) {
            return match rule.endpoint {
                Endpoint::Download => {
                    Route::Download(DownloadParams::from_query(uri.query(), self.max_chunk_size))
                }
                Endpoint::IpEcho => Route::IpEcho,
                Endpoint::Ping => Route::Ping,
                Endpoint::Upload => Route::Upload,
            };
        }

        if method != Method::GET {
            return Route::NotFound(path.to_string());
        }

        let index = format!("/{}", INDEX_FILE);
        let static_path = if path == "/" { index.as_str() } else { path };

        match self.resolver.target_for(static_path) {
            Some(target) => Route::StaticFile(target),
            None => Route::NotFound(path.to_string()),
        }
    }
}

//! Handlers that do more than return a fixed response.

use std::convert::Infallible;

use axum::{
    body::{Body, Bytes},
    response::{IntoResponse, Response},
};
use futures_util::stream;
use tokio::sync::mpsc;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::payload::{ChannelSink, ChunkPlan, DownloadParams};
use crate::static_files::StaticTarget;

/// Stream a synthetic payload.
///
/// The payload is produced by a spawned task feeding a bounded channel; the
/// response body drains it. No Content-Length is announced, so hyper uses
/// chunked transfer encoding. Dropping the body (client gone) closes the
/// channel and ends the task at its next write.
pub fn download(state: &AppState, params: DownloadParams) -> Response {
    let plan = ChunkPlan::new(params);
    let streamer = state.streamer;
    let (tx, rx) = mpsc::channel::<Bytes>(state.channel_depth);

    tokio::spawn(async move {
        let mut sink = ChannelSink::new(tx);
        match streamer.stream(plan, &mut sink).await {
            Ok(written) => metrics::record_download(written, true),
            Err(e) => {
                tracing::debug!(error = %e, planned = plan.total_bytes(), "Download ended early");
                metrics::record_download(e.written, false);
            }
        }
    });

    let chunks = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (Ok::<_, Infallible>(chunk), rx))
    });

    Response::new(Body::from_stream(chunks))
}

/// Read and return a static file, or the matching error response.
pub async fn static_file(state: &AppState, target: StaticTarget) -> Response {
    match state.router.resolver().load(&target).await {
        Ok(file) => file.into_response(),
        Err(e) => e.into_response(),
    }
}

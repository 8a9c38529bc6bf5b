//! End-to-end tests for the synthetic download endpoint.

use std::time::{Duration, Instant};

use reqwest::header::CONTENT_LENGTH;
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

mod common;

const DEFAULT_TOTAL: usize = 8 * 1024 * 1024;

async fn download_len(server: &common::TestServer, path: &str) -> usize {
    let res = common::client().get(server.url(path)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "{}", path);
    res.bytes().await.unwrap().len()
}

#[tokio::test]
async fn test_exact_multiples() {
    let server = common::start_server().await;

    assert_eq!(download_len(&server, "/download?size=65536&chunkSize=1024").await, 65536);
    assert_eq!(download_len(&server, "/download?size=1&chunkSize=1").await, 1);
    assert_eq!(download_len(&server, "/download?size=0&chunkSize=512").await, 0);
}

#[tokio::test]
async fn test_remainder_is_truncated() {
    let server = common::start_server().await;

    assert_eq!(download_len(&server, "/download?size=10000&chunkSize=3000").await, 9000);
    assert_eq!(download_len(&server, "/download?size=999&chunkSize=1000").await, 0);
    assert_eq!(download_len(&server, "/download?chunkSize=3000000&size=10000000").await, 9_000_000);
}

#[tokio::test]
async fn test_defaults() {
    let server = common::start_server().await;

    assert_eq!(download_len(&server, "/download").await, DEFAULT_TOTAL);
    assert_eq!(download_len(&server, "/download?chunkSize=0").await, DEFAULT_TOTAL);
    assert_eq!(download_len(&server, "/download?size=lots&chunkSize=big").await, DEFAULT_TOTAL);
    assert_eq!(download_len(&server, "/download?size=-1").await, DEFAULT_TOTAL);
}

#[tokio::test]
async fn test_prefix_match() {
    let server = common::start_server().await;

    assert_eq!(download_len(&server, "/downloadfoo").await, DEFAULT_TOTAL);
    assert_eq!(download_len(&server, "/download/extra?size=2048&chunkSize=1024").await, 2048);
}

#[tokio::test]
async fn test_no_content_length() {
    let server = common::start_server().await;

    let res = common::client()
        .get(server.url("/download?size=4096&chunkSize=1024"))
        .send()
        .await
        .unwrap();
    assert!(res.headers().get(CONTENT_LENGTH).is_none());
    assert_eq!(res.bytes().await.unwrap().len(), 4096);
}

#[tokio::test]
async fn test_random_fill() {
    let server = common::start_server_with(|config| {
        config.download.fill = speedtest_server::config::PayloadFill::Random;
    })
    .await;

    let res = common::client()
        .get(server.url("/download?size=8192&chunkSize=4096"))
        .send()
        .await
        .unwrap();
    let body = res.bytes().await.unwrap();
    assert_eq!(body.len(), 8192);
    // every chunk repeats the same buffer
    assert_eq!(body[..4096], body[4096..]);
    assert!(body.iter().any(|b| *b != 0));
}

#[tokio::test]
async fn test_concurrent_downloads() {
    let server = common::start_server().await;
    let client = common::client();

    let requests = (1..=4).map(|i| {
        let client = client.clone();
        let url = server.url(&format!("/download?size={}&chunkSize=4096", i * 100_000));
        async move { client.get(url).send().await.unwrap().bytes().await.unwrap().len() }
    });

    let lengths = futures_util::future::join_all(requests).await;
    let expected: Vec<usize> = (1..=4).map(|i| (i * 100_000 / 4096) * 4096).collect();
    assert_eq!(lengths, expected);
}

#[tokio::test]
async fn test_client_disconnect_does_not_stop_server() {
    let server = common::start_server().await;

    {
        let mut stream = TcpStream::connect(server.addr).await.unwrap();
        let request = format!(
            "GET /download?size=1073741824&chunkSize=65536 HTTP/1.1\r\nHost: {}\r\n\r\n",
            server.addr
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut buf = vec![0u8; 64 * 1024];
        let n = stream.read(&mut buf).await.unwrap();
        assert!(n > 0);
    }

    tokio::time::sleep(Duration::from_millis(50)).await;

    let res = common::client().get(server.url("/ping")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_slow_reader_outlives_request_timeout() {
    let server = common::start_server_with(|c| c.timeouts.request_secs = 1).await;

    let mut res = common::client()
        .get(server.url("/download?size=1048576&chunkSize=65536"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let started = Instant::now();
    let mut received = 0;
    while let Some(chunk) = res.chunk().await.unwrap() {
        received += chunk.len();
        if started.elapsed() < Duration::from_millis(1500) {
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
    }

    assert!(started.elapsed() > Duration::from_secs(1));
    assert_eq!(received, 1_048_576);
}

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use seo_analyzer::analyzer::{Analyzer, FetchOptions};
use seo_analyzer::config::UserAgentConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The canonical page that passes every check when served over HTTPS
pub const CANONICAL_HTML: &str = r#"<html><head><title>Test</title><meta name="description" content="desc"></head><body><h1>H</h1><img src="a.jpg" alt="x"></body></html>"#;

pub fn test_user_agent() -> UserAgentConfig {
    UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0".to_string(),
        contact_url: "https://example.com/bot".to_string(),
    }
}

/// Fetch limits shortened so failure paths run quickly
pub fn fast_options() -> FetchOptions {
    FetchOptions {
        timeout: Duration::from_millis(300),
        max_body_bytes: 4 * 1024,
        ..FetchOptions::default()
    }
}

pub fn test_analyzer() -> Analyzer {
    Analyzer::with_options(&test_user_agent(), fast_options()).expect("Failed to build analyzer")
}

pub fn html_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

/// Mounts `template` for `GET route` on the mock server
pub async fn mount_get(server: &MockServer, route: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(server)
        .await;
}

/// Returns a localhost URL whose port refuses connections
pub async fn refused_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

async fn bind_local() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind raw listener");
    let port = listener.local_addr().expect("No local address").port();
    (listener, format!("http://127.0.0.1:{}/", port))
}

/// Reads until the blank line that ends the request head
async fn read_request_head(stream: &mut TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}

/// Serves one HTML response with `Transfer-Encoding: chunked` and no
/// `Content-Length`, so the size cap can only trip while reading
pub async fn chunked_html_url(chunk_size: usize, chunks: usize) -> String {
    let (listener, url) = bind_local().await;

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };
        read_request_head(&mut stream).await;

        let head = concat!(
            "HTTP/1.1 200 OK\r\n",
            "content-type: text/html\r\n",
            "transfer-encoding: chunked\r\n\r\n",
        );
        if stream.write_all(head.as_bytes()).await.is_err() {
            return;
        }
        let chunk = "x".repeat(chunk_size);
        for _ in 0..chunks {
            let frame = format!("{:x}\r\n{}\r\n", chunk_size, chunk);
            // The client hangs up once it has seen enough
            if stream.write_all(frame.as_bytes()).await.is_err() {
                return;
            }
        }
        let _ = stream.write_all(b"0\r\n\r\n").await;
    });

    url
}

/// Accepts one connection, reads the request, then resets the socket
pub async fn reset_after_request_url() -> String {
    let (listener, url) = bind_local().await;

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };
        read_request_head(&mut stream).await;
        // Zero linger turns the close into an RST
        let _ = stream.set_linger(Some(Duration::ZERO));
        drop(stream);
    });

    url
}

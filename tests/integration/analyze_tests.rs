//! Pipeline tests against mock target sites

use std::time::Duration;

use seo_analyzer::{AnalysisError, FetchError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::{
    chunked_html_url, html_response, mount_get, refused_url, reset_after_request_url,
    test_analyzer, CANONICAL_HTML,
};

#[tokio::test]
async fn test_canonical_page_over_http() {
    let mock_server = MockServer::start().await;
    mount_get(&mock_server, "/", html_response(CANONICAL_HTML)).await;

    let url = format!("{}/", mock_server.uri());
    let response = test_analyzer().analyze_url(&url).await.unwrap();

    // Mock servers are plain HTTP, so only the HTTPS check fails
    assert_eq!(response.url, url);
    assert_eq!(response.seo_score, 80);
    assert_eq!(response.issues, vec!["Page does not use HTTPS"]);
    assert_eq!(response.passed_checks.len(), 4);
    assert_eq!(
        response.checks,
        [response.passed_checks.clone(), response.issues.clone()].concat()
    );
}

#[tokio::test]
async fn test_sends_identifying_user_agent() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0 (+https://example.com/bot)"))
        .respond_with(html_response(CANONICAL_HTML))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = test_analyzer()
        .analyze_url(&format!("{}/", mock_server.uri()))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_plain_text_is_accepted() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/notes.txt",
        ResponseTemplate::new(200).set_body_raw("just text".as_bytes().to_vec(), "text/plain"),
    )
    .await;

    let response = test_analyzer()
        .analyze_url(&format!("{}/notes.txt", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(response.seo_score, 20);
}

#[tokio::test]
async fn test_internal_links_counted_from_fetched_page() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();
    let html = format!(
        r#"<html><body>
            <a href="/a">a</a>
            <a href="{}/b">b</a>
            <a href="https://elsewhere.example/c">c</a>
        </body></html>"#,
        base
    );
    mount_get(&mock_server, "/", html_response(&html)).await;

    let request = seo_analyzer::AnalysisRequest::new(&format!("{}/", base)).unwrap();
    let analysis = test_analyzer().analyze_request(&request).await.unwrap();
    assert_eq!(analysis.signals.total_internal_links, 2);
}

#[tokio::test]
async fn test_empty_body_is_empty_content() {
    let mock_server = MockServer::start().await;
    mount_get(&mock_server, "/", html_response("  \n\t ")).await;

    let url = format!("{}/", mock_server.uri());
    let error = test_analyzer().analyze_url(&url).await.unwrap_err();
    assert!(matches!(
        error,
        AnalysisError::Fetch(FetchError::EmptyContent { .. })
    ));

    let classified = test_analyzer().respond_to_url(&url).await.unwrap_err();
    assert_eq!(classified.status_code, 422);
}

#[tokio::test]
async fn test_slow_response_is_timeout() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/",
        html_response(CANONICAL_HTML).set_delay(Duration::from_secs(2)),
    )
    .await;

    let url = format!("{}/", mock_server.uri());
    let error = test_analyzer().analyze_url(&url).await.unwrap_err();
    assert!(matches!(
        error,
        AnalysisError::Fetch(FetchError::Timeout { .. })
    ));

    let classified = test_analyzer().respond_to_url(&url).await.unwrap_err();
    assert_eq!(classified.status_code, 408);
    assert_eq!(classified.category, "Request Timeout");
}

#[tokio::test]
async fn test_oversized_body_is_too_large() {
    let mock_server = MockServer::start().await;
    let html = format!("<html><body>{}</body></html>", "x".repeat(8 * 1024));
    mount_get(&mock_server, "/", html_response(&html)).await;

    let classified = test_analyzer()
        .respond_to_url(&format!("{}/", mock_server.uri()))
        .await
        .unwrap_err();
    assert_eq!(classified.status_code, 413);
    assert_eq!(classified.category, "Payload Too Large");
}

#[tokio::test]
async fn test_chunked_body_over_limit_is_too_large() {
    // 10 KiB streamed without Content-Length against the 4 KiB cap
    let url = chunked_html_url(1024, 10).await;

    let error = test_analyzer().analyze_url(&url).await.unwrap_err();
    assert!(matches!(
        error,
        AnalysisError::Fetch(FetchError::ContentTooLarge { limit: 4096, .. })
    ));

    let url = chunked_html_url(1024, 10).await;
    let classified = test_analyzer().respond_to_url(&url).await.unwrap_err();
    assert_eq!(classified.status_code, 413);
    assert_eq!(classified.category, "Payload Too Large");
}

#[tokio::test]
async fn test_chunked_body_within_limit_is_read() {
    let url = chunked_html_url(512, 4).await;

    let request = seo_analyzer::AnalysisRequest::new(&url).unwrap();
    let analysis = test_analyzer().analyze_request(&request).await.unwrap();
    assert_eq!(analysis.signals.title, None);
    assert_eq!(analysis.result.score, 20);
}

#[tokio::test]
async fn test_unsupported_content_type() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/data.json",
        ResponseTemplate::new(200).set_body_raw(br#"{"a":1}"#.to_vec(), "application/json"),
    )
    .await;

    let url = format!("{}/data.json", mock_server.uri());
    let error = test_analyzer().analyze_url(&url).await.unwrap_err();
    assert!(matches!(
        error,
        AnalysisError::Fetch(FetchError::UnsupportedContentType { .. })
    ));

    let classified = test_analyzer().respond_to_url(&url).await.unwrap_err();
    assert_eq!(classified.status_code, 500);
}

#[tokio::test]
async fn test_target_not_found_is_bad_request() {
    let mock_server = MockServer::start().await;
    mount_get(&mock_server, "/missing", ResponseTemplate::new(404)).await;

    let classified = test_analyzer()
        .respond_to_url(&format!("{}/missing", mock_server.uri()))
        .await
        .unwrap_err();
    assert_eq!(classified.status_code, 400);
    assert_eq!(classified.category, "Bad Request");
    assert_eq!(classified.message, "Target server returned error: 404");
}

#[tokio::test]
async fn test_target_server_error_is_bad_gateway() {
    let mock_server = MockServer::start().await;
    mount_get(&mock_server, "/", ResponseTemplate::new(503)).await;

    let classified = test_analyzer()
        .respond_to_url(&format!("{}/", mock_server.uri()))
        .await
        .unwrap_err();
    assert_eq!(classified.status_code, 502);
    assert_eq!(classified.message, "Target server returned error: 503");
}

#[tokio::test]
async fn test_redirects_within_limit_are_followed() {
    let mock_server = MockServer::start().await;
    mount_get(
        &mock_server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", "/new"),
    )
    .await;
    mount_get(&mock_server, "/new", html_response(CANONICAL_HTML)).await;

    let url = format!("{}/old", mock_server.uri());
    let response = test_analyzer().analyze_url(&url).await.unwrap();
    assert_eq!(response.url, url);
    assert_eq!(response.seo_score, 80);
}

#[tokio::test]
async fn test_redirect_chain_over_limit_fails() {
    let mock_server = MockServer::start().await;
    for hop in 0..7 {
        mount_get(
            &mock_server,
            &format!("/hop{}", hop),
            ResponseTemplate::new(302)
                .insert_header("location", format!("/hop{}", hop + 1).as_str()),
        )
        .await;
    }

    let error = test_analyzer()
        .analyze_url(&format!("{}/hop0", mock_server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        AnalysisError::Fetch(FetchError::TooManyRedirects { .. })
    ));
}

#[tokio::test]
async fn test_refused_connection_is_access_forbidden() {
    let url = refused_url().await;

    let error = test_analyzer().analyze_url(&url).await.unwrap_err();
    assert!(matches!(
        error,
        AnalysisError::Fetch(FetchError::ConnectionRefused { .. })
    ));

    let classified = test_analyzer().respond_to_url(&url).await.unwrap_err();
    assert_eq!(classified.status_code, 403);
    assert_eq!(classified.category, "Access Forbidden");
}

#[tokio::test]
async fn test_reset_connection_is_access_forbidden() {
    let url = reset_after_request_url().await;

    let error = test_analyzer().analyze_url(&url).await.unwrap_err();
    assert!(matches!(
        error,
        AnalysisError::Fetch(FetchError::ConnectionRefused { .. })
    ));

    let url = reset_after_request_url().await;
    let classified = test_analyzer().respond_to_url(&url).await.unwrap_err();
    assert_eq!(classified.status_code, 403);
}

#[tokio::test]
async fn test_unresolvable_host_is_dns_failure() {
    let classified = test_analyzer()
        .respond_to_url("http://no-such-host.invalid/")
        .await
        .unwrap_err();
    assert_eq!(classified.status_code, 502);
    assert_eq!(classified.message, "Unable to resolve the domain name");
}

#[tokio::test]
async fn test_invalid_input_never_fetches() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html_response(CANONICAL_HTML))
        .expect(0)
        .mount(&mock_server)
        .await;

    let ftp = mock_server.uri().replacen("http", "ftp", 1);
    let classified = test_analyzer().respond_to_url(&ftp).await.unwrap_err();
    assert_eq!(classified.status_code, 400);
    assert_eq!(classified.category, "Invalid Request");
}

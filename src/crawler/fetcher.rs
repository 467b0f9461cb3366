//! HTTP fetching: one URL in, one HTML body or one typed error out
//!
//! There is no retry logic here. A failed fetch is logged by the worker and
//! the URL is simply not extracted; transient-failure recovery belongs to
//! whoever operates the crawl, not the engine.

use crate::config::CrawlerConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A fetch failure, classified for logging
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("expected HTML from {url}, got '{content_type}'")]
    NotHtml { url: String, content_type: String },
}

/// Builds the shared HTTP client from crawler configuration
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page and returns its HTML body
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_request_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return Err(FetchError::NotHtml {
            url: url.to_string(),
            content_type,
        });
    }

    response.text().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn classify_request_error(url: &Url, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> CrawlerConfig {
        CrawlerConfig {
            request_timeout_secs: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&test_config()).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>hi</body></html>", "text/html"),
            )
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
        let body = fetch_page(&client, &url).await.unwrap();
        assert!(body.contains("hi"));
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let url = Url::parse(&format!("{}/missing", server.uri())).unwrap();
        let err = fetch_page(&client, &url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_non_html_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;

        let client = build_http_client(&test_config()).unwrap();
        let url = Url::parse(&format!("{}/api", server.uri())).unwrap();
        let err = fetch_page(&client, &url).await.unwrap_err();
        assert!(matches!(err, FetchError::NotHtml { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let client = build_http_client(&test_config()).unwrap();
        // nothing listens on this port
        let url = Url::parse("http://127.0.0.1:1/page").unwrap();
        let err = fetch_page(&client, &url).await.unwrap_err();
        assert!(matches!(err, FetchError::Network { .. } | FetchError::Timeout { .. }));
    }
}

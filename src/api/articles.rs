use std::time::Duration;

use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::model::{Article, ArticleId};

/// Upper bound on any response body.
pub const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Article has no id")]
    MissingId,
}

impl ApiError {
    /// Short text for the status line.
    pub fn summary(&self) -> String {
        match self {
            ApiError::Network(e) if e.is_timeout() => "request timed out".to_string(),
            ApiError::Network(e) if e.is_connect() => "server unreachable".to_string(),
            ApiError::HttpStatus(status) => StatusCode::from_u16(*status)
                .ok()
                .and_then(|s| s.canonical_reason().map(|r| format!("{status} {r}")))
                .unwrap_or_else(|| format!("HTTP {status}")),
            other => other.to_string(),
        }
    }
}

/// Build the shared HTTP client.
///
/// `timeout_secs == 0` leaves requests without a deadline.
pub(crate) fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .pool_max_idle_per_host(2)
        .pool_idle_timeout(Duration::from_secs(30))
        .tcp_keepalive(Duration::from_secs(60));
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    builder.build()
}

/// Client for the `articles` resource under a base URL.
#[derive(Debug, Clone)]
pub struct ArticleClient {
    http: reqwest::Client,
    collection_url: Url,
}

impl ArticleClient {
    /// Create a client rooted at `base` (e.g. `http://localhost:3000/api/`).
    ///
    /// A missing trailing slash is added so `articles` joins under the last
    /// path segment instead of replacing it.
    pub fn new(http: reqwest::Client, base: &str) -> Result<Self, ApiError> {
        let mut normalized = base.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let base_url =
            Url::parse(&normalized).map_err(|e| ApiError::InvalidBaseUrl(format!("{base}: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{base}: scheme must be http or https"
            )));
        }

        let collection_url = base_url
            .join("articles")
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{base}: {e}")))?;

        Ok(Self {
            http,
            collection_url,
        })
    }

    /// Build from configuration values.
    pub fn from_settings(base: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        Self::new(build_http_client(timeout_secs)?, base)
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    fn item_url(&self, id: ArticleId) -> Url {
        let mut url = self.collection_url.clone();
        // Cannot fail: http(s) URLs always have a path to extend
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }

    /// `GET {base}articles`
    pub async fn list(&self) -> Result<Vec<Article>, ApiError> {
        tracing::debug!(url = %self.collection_url, "Fetching article collection");
        let response = self.http.get(self.collection_url.clone()).send().await?;
        let articles: Vec<Article> = decode(response).await?;
        tracing::info!(count = articles.len(), "Article collection loaded");
        Ok(articles)
    }

    /// `POST {base}articles`; returns the stored article with its new id.
    pub async fn create(&self, article: &Article) -> Result<Article, ApiError> {
        let body = serde_json::to_vec(article)?;
        tracing::debug!(title = %article.title, "Creating article");
        let response = self
            .http
            .post(self.collection_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let created: Article = decode(response).await?;
        if created.id.is_none() {
            return Err(ApiError::MissingId);
        }
        tracing::info!(id = ?created.id, title = %created.title, "Article created");
        Ok(created)
    }

    /// `PUT {base}articles/{id}`; returns the server's copy.
    pub async fn update(&self, id: ArticleId, article: &Article) -> Result<Article, ApiError> {
        let body = serde_json::to_vec(article)?;
        tracing::debug!(id, title = %article.title, "Updating article");
        let response = self
            .http
            .put(self.item_url(id))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        let mut updated: Article = decode(response).await?;
        // Keep the record addressable even if the server omits the id
        updated.id.get_or_insert(id);
        tracing::info!(id, "Article updated");
        Ok(updated)
    }

    /// `DELETE {base}articles/{id}`; the response body is ignored.
    pub async fn delete(&self, id: ArticleId) -> Result<(), ApiError> {
        tracing::debug!(id, "Deleting article");
        let response = self.http.delete(self.item_url(id)).send().await?;
        check_status(&response)?;
        tracing::info!(id, "Article deleted");
        Ok(())
    }
}

fn check_status(response: &reqwest::Response) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        tracing::warn!(status = status.as_u16(), url = %response.url(), "API request failed");
        Err(ApiError::HttpStatus(status.as_u16()))
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    check_status(&response)?;
    let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, ApiError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(ApiError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ArticleClient {
        ArticleClient::new(reqwest::Client::new(), &format!("{}/api", server.uri())).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client =
            ArticleClient::new(reqwest::Client::new(), "http://localhost:3000/api").unwrap();
        assert_eq!(
            client.collection_url().as_str(),
            "http://localhost:3000/api/articles"
        );
        assert_eq!(
            client.item_url(7).as_str(),
            "http://localhost:3000/api/articles/7"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = ArticleClient::new(reqwest::Client::new(), "not a url");
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl(_))));

        let result = ArticleClient::new(reqwest::Client::new(), "ftp://example.com/api/");
        assert!(matches!(result, Err(ApiError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_status_summary() {
        assert_eq!(ApiError::HttpStatus(404).summary(), "404 Not Found");
        assert_eq!(ApiError::MissingId.summary(), "Article has no id");
    }

    #[tokio::test]
    async fn test_list_parses_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/articles"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 4, "title": "Alpha Centauri", "extract": "An alien diplomat", "edited": "1972-01-29T18:00:40Z"},
                {"id": 25, "title": "Daleks", "extract": "Evil little pepperpots of death", "edited": "1963-12-21T17:00:00Z"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let articles = client_for(&server).list().await.unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[1].title, "Daleks");
        assert_eq!(
            articles[0].edited,
            Utc.with_ymd_and_hms(1972, 1, 29, 18, 0, 40).unwrap()
        );
    }

    #[tokio::test]
    async fn test_list_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client_for(&server).list().await;
        assert!(matches!(result, Err(ApiError::HttpStatus(500))));
    }

    #[tokio::test]
    async fn test_list_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server).list().await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_response_size_limit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("x".repeat(MAX_RESPONSE_SIZE + 1)),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).list().await;
        assert!(matches!(result, Err(ApiError::ResponseTooLarge(_))));
    }

    #[tokio::test]
    async fn test_create_posts_without_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/articles"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({"title": "321", "extract": "contact"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"id": 101, "title": "321", "extract": "contact", "edited": "2024-05-01T10:00:00Z"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let draft = Article::draft("321", "contact");
        let created = client_for(&server).create(&draft).await.unwrap();
        assert_eq!(created.id, Some(101));

        let requests = server.received_requests().await.unwrap();
        let sent: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert!(sent.get("id").is_none());
    }

    #[tokio::test]
    async fn test_create_without_server_id_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!(
                {"title": "321", "extract": "contact", "edited": "2024-05-01T10:00:00Z"}
            )))
            .mount(&server)
            .await;

        let result = client_for(&server).create(&Article::draft("321", "contact")).await;
        assert!(matches!(result, Err(ApiError::MissingId)));
    }

    #[tokio::test]
    async fn test_update_puts_to_item_url() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/articles/4"))
            .and(body_partial_json(json!({"id": 4, "title": "Alpha Centauri"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"id": 4, "title": "Alpha Centauri", "extract": "Hermaphrodite hexapod", "edited": "2024-05-01T10:00:00Z"}
            )))
            .expect(1)
            .mount(&server)
            .await;

        let mut article = Article::draft("Alpha Centauri", "Hermaphrodite hexapod");
        article.id = Some(4);
        let updated = client_for(&server).update(4, &article).await.unwrap();
        assert_eq!(updated.extract, "Hermaphrodite hexapod");
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/articles/4"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server).delete(4).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client_for(&server).delete(4).await;
        assert!(matches!(result, Err(ApiError::HttpStatus(404))));
    }
}

use std::time::Duration;

use serde::Deserialize;

use super::{PaperSource, SourceFuture};
use crate::FetchError;
use crate::model::{Paper, PaperId, PaperResponse};

/// Default backend location (the development server port).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Paper source backed by the Readable Research HTTP API.
///
/// Issues `GET {base_url}/api/papers/{paper_id}` with no body, headers or
/// query parameters.
pub struct HttpPaperSource {
    client: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpPaperSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            timeout: None,
        }
    }

    /// Apply a per-request timeout. `None` (the default) waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn paper_url(&self, paper_id: &PaperId) -> String {
        format!(
            "{}/api/papers/{}",
            self.base_url,
            urlencoding::encode(paper_id.as_str())
        )
    }

    pub fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url)
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let req = self.client.get(url);
        match self.timeout {
            Some(t) => req.timeout(t),
            None => req,
        }
    }
}

impl PaperSource for HttpPaperSource {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_paper<'a>(&'a self, paper_id: &'a PaperId) -> SourceFuture<'a, Paper> {
        Box::pin(async move {
            let url = self.paper_url(paper_id);
            tracing::debug!(%url, "fetching paper");
            let resp = self.get(&url).send().await?;
            decode_paper_response(resp).await
        })
    }

    fn health<'a>(&'a self) -> SourceFuture<'a, bool> {
        Box::pin(async move {
            let resp = self.get(&self.health_url()).send().await?;
            decode_health_response(resp).await
        })
    }
}

/// Turn an HTTP response into a paper, mapping non-2xx statuses to
/// [`FetchError::Http`] with the status line's reason phrase.
pub async fn decode_paper_response(resp: reqwest::Response) -> Result<Paper, FetchError> {
    check_status(&resp)?;
    let body = resp.text().await?;
    parse_paper_body(&body)
}

/// Parse a `{ "paper": ... }` body.
pub fn parse_paper_body(body: &str) -> Result<Paper, FetchError> {
    let envelope: PaperResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
    if let Some(code) = envelope.code
        && code != 200
    {
        tracing::debug!(code, "envelope code differs from HTTP status");
    }
    envelope.into_paper()
}

#[derive(Deserialize)]
struct HealthBody {
    status: String,
}

async fn decode_health_response(resp: reqwest::Response) -> Result<bool, FetchError> {
    check_status(&resp)?;
    let body = resp.text().await?;
    let health: HealthBody = serde_json::from_str(&body)
        .map_err(|e| FetchError::MalformedResponse(e.to_string()))?;
    Ok(health.status.eq_ignore_ascii_case("healthy"))
}

fn check_status(resp: &reqwest::Response) -> Result<(), FetchError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }
    let reason = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    Err(FetchError::Http {
        status: status.as_u16(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        let http_resp = http::Response::builder()
            .status(status)
            .body(body)
            .unwrap();
        reqwest::Response::from(http_resp)
    }

    const BODY: &str = r#"{"paper": {"paper_id":"1706.03762","title":"Attention Is All You Need","authors":["A","B"],"abstract":"...","publication_year":2017,"keywords":["transformers"],"citations_count":50000,"pdf_url":"http://x/p.pdf","sections":[{"title":"Intro","paragraphs":[{"paragraphNum":1,"content":"..."}]}]}}"#;

    #[test]
    fn urls_are_built_from_base() {
        let source = HttpPaperSource::new("http://localhost:8001/");
        let id = PaperId::new("1706.03762").unwrap();
        assert_eq!(source.base_url(), "http://localhost:8001");
        assert_eq!(
            source.paper_url(&id),
            "http://localhost:8001/api/papers/1706.03762"
        );
        assert_eq!(source.health_url(), "http://localhost:8001/api/health");
    }

    #[test]
    fn paper_id_is_percent_encoded() {
        let source = HttpPaperSource::new("http://h");
        let id = PaperId::new("hep-th/9901001").unwrap();
        assert_eq!(source.paper_url(&id), "http://h/api/papers/hep-th%2F9901001");
    }

    #[tokio::test]
    async fn ok_response_decodes_paper() {
        let paper = decode_paper_response(response(200, BODY)).await.unwrap();
        assert_eq!(paper.title, "Attention Is All You Need");
        assert_eq!(paper.first_section_title(), Some("Intro"));
    }

    #[tokio::test]
    async fn not_found_uses_reason_phrase() {
        let err = decode_paper_response(response(404, r#"{"detail":"nope"}"#))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Http {
                status: 404,
                reason: "Not Found".into()
            }
        );
        assert!(err.user_message().contains("Not Found"));
    }

    #[tokio::test]
    async fn server_error_is_http_failure() {
        let err = decode_paper_response(response(500, "")).await.unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 500, .. }));
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let err = decode_paper_response(response(200, "<html>"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn body_without_paper_is_malformed() {
        let err = decode_paper_response(response(200, r#"{"status":"success","code":200}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn health_reports_status_field() {
        assert!(
            decode_health_response(response(200, r#"{"status":"healthy"}"#))
                .await
                .unwrap()
        );
        assert!(
            !decode_health_response(response(200, r#"{"status":"degraded"}"#))
                .await
                .unwrap()
        );
        assert!(decode_health_response(response(503, "")).await.is_err());
    }
}

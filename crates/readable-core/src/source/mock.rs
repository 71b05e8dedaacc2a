//! In-memory paper source for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{PaperSource, SourceFuture};
use crate::FetchError;
use crate::model::{Paper, PaperId};

/// A hand-rolled [`PaperSource`] with canned responses.
///
/// Supports:
/// - per-id responses, with a fallback for unknown ids,
/// - optional latency, globally or per id,
/// - call counting via [`call_count()`](MockPaperSource::call_count).
pub struct MockPaperSource {
    responses: HashMap<String, Result<Paper, FetchError>>,
    fallback: Result<Paper, FetchError>,
    delay: Option<Duration>,
    delays: HashMap<String, Duration>,
    healthy: bool,
    call_count: AtomicUsize,
    requested: Mutex<Vec<PaperId>>,
}

impl MockPaperSource {
    /// A source that answers 404 for every id until papers are added.
    pub fn new() -> Self {
        Self::with_fallback(Err(FetchError::Http {
            status: 404,
            reason: "Not Found".to_string(),
        }))
    }

    pub fn with_fallback(fallback: Result<Paper, FetchError>) -> Self {
        Self {
            responses: HashMap::new(),
            fallback,
            delay: None,
            delays: HashMap::new(),
            healthy: true,
            call_count: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Serve `paper` under its own `paper_id`.
    pub fn with_paper(mut self, paper: Paper) -> Self {
        self.responses.insert(paper.paper_id.clone(), Ok(paper));
        self
    }

    pub fn with_response(mut self, paper_id: &str, response: Result<Paper, FetchError>) -> Self {
        self.responses.insert(paper_id.to_string(), response);
        self
    }

    /// Simulated latency for every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Simulated latency for one id, overriding the global delay.
    pub fn with_delay_for(mut self, paper_id: &str, delay: Duration) -> Self {
        self.delays.insert(paper_id.to_string(), delay);
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    /// How many times `fetch_paper()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Ids requested so far, in call order.
    pub fn requested_ids(&self) -> Vec<PaperId> {
        self.requested
            .lock()
            .map(|ids| ids.clone())
            .unwrap_or_default()
    }
}

impl Default for MockPaperSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PaperSource for MockPaperSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch_paper<'a>(&'a self, paper_id: &'a PaperId) -> SourceFuture<'a, Paper> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut ids) = self.requested.lock() {
            ids.push(paper_id.clone());
        }
        let response = self
            .responses
            .get(paper_id.as_str())
            .unwrap_or(&self.fallback)
            .clone();
        let delay = self.delays.get(paper_id.as_str()).copied().or(self.delay);

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            response
        })
    }

    fn health<'a>(&'a self) -> SourceFuture<'a, bool> {
        let healthy = self.healthy;
        Box::pin(async move { Ok(healthy) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str) -> Paper {
        Paper {
            paper_id: id.to_string(),
            title: format!("Paper {id}"),
            authors: vec![],
            abstract_text: String::new(),
            publication_year: 2020,
            keywords: vec![],
            citations_count: 0,
            pdf_url: String::new(),
            sections: None,
        }
    }

    #[tokio::test]
    async fn serves_registered_papers_and_counts_calls() {
        let source = MockPaperSource::new().with_paper(paper("a"));
        let a = PaperId::new("a").unwrap();
        let b = PaperId::new("b").unwrap();

        assert_eq!(source.fetch_paper(&a).await.unwrap().title, "Paper a");
        assert!(matches!(
            source.fetch_paper(&b).await,
            Err(FetchError::Http { status: 404, .. })
        ));
        assert_eq!(source.call_count(), 2);
        assert_eq!(source.requested_ids(), vec![a, b]);
    }
}

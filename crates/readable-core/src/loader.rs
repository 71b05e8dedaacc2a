//! Runs viewer fetches in the background, one at a time.
//!
//! [`PaperLoader::load`] cancels whatever request is still in flight before
//! starting the next one, and every outcome carries the ticket it was issued
//! for so [`ViewerState::on_loaded`](crate::ViewerState::on_loaded) can drop
//! anything that slipped through.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::FetchError;
use crate::model::{Paper, PaperId};
use crate::source::PaperSource;
use crate::viewer::RequestTicket;

/// Result of one fetch, tagged with the request it answers.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub ticket: RequestTicket,
    pub paper_id: PaperId,
    pub result: Result<Paper, FetchError>,
}

pub struct PaperLoader {
    source: Arc<dyn PaperSource>,
    tx: mpsc::UnboundedSender<LoadOutcome>,
    inflight: Option<CancellationToken>,
}

impl PaperLoader {
    pub fn new(source: Arc<dyn PaperSource>, tx: mpsc::UnboundedSender<LoadOutcome>) -> Self {
        Self {
            source,
            tx,
            inflight: None,
        }
    }

    /// Start fetching `paper_id`, abandoning the previous request.
    pub fn load(&mut self, ticket: RequestTicket, paper_id: PaperId) {
        self.cancel();

        let token = CancellationToken::new();
        self.inflight = Some(token.clone());

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => None,
                result = source.fetch_paper(&paper_id) => Some(result),
            };
            match result {
                Some(result) if !token.is_cancelled() => {
                    let _ = tx.send(LoadOutcome {
                        ticket,
                        paper_id,
                        result,
                    });
                }
                _ => {
                    tracing::debug!(%paper_id, ticket = ticket.value(), "fetch cancelled");
                }
            }
        });
    }

    /// Abort the in-flight request, if any. Its outcome will not be sent.
    pub fn cancel(&mut self) {
        if let Some(token) = self.inflight.take() {
            token.cancel();
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }
}

impl Drop for PaperLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}

use std::sync::Arc;

use tokio::sync::mpsc;

use readable_core::{PaperLoader, PaperSource};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Serve backend commands until the command channel closes.
///
/// Owns the [`PaperLoader`], so at most one paper fetch is in flight at a
/// time; a new `Fetch` cancels the previous one.
pub async fn run_backend(
    source: Arc<dyn PaperSource>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
) {
    let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
    let mut loader = PaperLoader::new(Arc::clone(&source), outcome_tx);
    tracing::debug!(source = loader.source_name(), "backend started");

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => match cmd {
                Some(BackendCommand::Fetch { ticket, paper_id }) => loader.load(ticket, paper_id),
                Some(BackendCommand::Cancel) => loader.cancel(),
                Some(BackendCommand::CheckHealth) => {
                    let source = Arc::clone(&source);
                    let tx = event_tx.clone();
                    tokio::spawn(async move {
                        let health = source.health().await.map_err(|e| e.to_string());
                        let _ = tx.send(BackendEvent::Health(health));
                    });
                }
                None => break,
            },
            Some(outcome) = outcome_rx.recv() => {
                if event_tx.send(BackendEvent::Loaded(outcome)).is_err() {
                    break;
                }
            }
        }
    }

    loader.cancel();
    tracing::debug!("backend stopped");
}

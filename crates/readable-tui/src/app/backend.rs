use super::App;
use crate::tui_event::BackendEvent;

impl App {
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Loaded(outcome) => {
                let ok = outcome.result.is_ok();
                if self.viewer.on_loaded(outcome.ticket, outcome.result) && ok {
                    self.scroll = 0;
                    self.pending_scroll = None;
                }
            }
            BackendEvent::Health(result) => {
                match &result {
                    Ok(true) => tracing::info!("paper backend is healthy"),
                    Ok(false) => {
                        tracing::warn!("paper backend reports unhealthy");
                        self.set_status("Paper backend reports unhealthy");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "paper backend unreachable");
                        self.set_status("Paper backend unreachable");
                    }
                }
                self.backend_health = Some(result);
            }
        }
    }
}

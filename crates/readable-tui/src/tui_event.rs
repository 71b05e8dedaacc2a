use readable_core::{LoadOutcome, PaperId, RequestTicket};

/// Commands sent from the TUI to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    /// Load a paper, abandoning any load still in flight.
    Fetch {
        ticket: RequestTicket,
        paper_id: PaperId,
    },
    /// Drop the in-flight load without starting another.
    Cancel,
    /// Probe the backend's health endpoint.
    CheckHealth,
}

/// Events flowing from the backend task to the TUI.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    /// A fetch finished (successfully or not).
    Loaded(LoadOutcome),
    /// Result of a health probe: `Ok(healthy)` or the failure message.
    Health(Result<bool, String>),
}

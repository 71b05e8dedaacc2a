//! The paper viewer as an explicit state machine.
//!
//! [`ViewerState`] never performs I/O itself. Each event handler updates the
//! state and returns an [`Effect`] for the host to carry out: start a fetch,
//! go back to the landing view, or scroll a section into view. Fetches are
//! tagged with a [`RequestTicket`]; outcomes carrying an older ticket are
//! dropped so a slow response can never overwrite a newer selection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FetchError;
use crate::model::{Paper, PaperId};

/// Navigation entry that always precedes the paper's own sections.
pub const ABSTRACT_ENTRY: &str = "Abstract";

/// Identifies one fetch issued by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Mutually exclusive viewer phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    NoSelection,
    Loading {
        ticket: RequestTicket,
        paper_id: PaperId,
    },
    Ready(Paper),
    Error(String),
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::NoSelection => "no-selection",
            Phase::Loading { .. } => "loading",
            Phase::Ready(_) => "ready",
            Phase::Error(_) => "error",
        }
    }
}

/// Work the host must do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// No paper selected: leave the viewer for the landing view.
    Redirect,
    /// Start loading `paper_id`, abandoning any fetch still in flight.
    Fetch {
        ticket: RequestTicket,
        paper_id: PaperId,
    },
    /// Bring the named section (or the abstract) into view.
    ScrollTo { title: String },
}

/// Color scheme of the reading view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
    Stars,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 3] = [ColorScheme::Light, ColorScheme::Dark, ColorScheme::Stars];

    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Stars,
            Self::Stars => Self::Light,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Stars => "stars",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "stars" => Ok(Self::Stars),
            other => Err(format!(
                "unknown color scheme \"{other}\" (expected light, dark or stars)"
            )),
        }
    }
}

/// State of one viewer instance.
#[derive(Debug, Clone)]
pub struct ViewerState {
    phase: Phase,
    selected: Option<PaperId>,
    active_section: Option<String>,
    color_scheme: ColorScheme,
    next_ticket: u64,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(ColorScheme::default())
    }
}

impl ViewerState {
    pub fn new(color_scheme: ColorScheme) -> Self {
        Self {
            phase: Phase::NoSelection,
            selected: None,
            active_section: None,
            color_scheme,
            next_ticket: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selected(&self) -> Option<&PaperId> {
        self.selected.as_ref()
    }

    pub fn paper(&self) -> Option<&Paper> {
        match &self.phase {
            Phase::Ready(paper) => Some(paper),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// Ticket of the fetch currently awaited, if any.
    pub fn pending_ticket(&self) -> Option<RequestTicket> {
        match &self.phase {
            Phase::Loading { ticket, .. } => Some(*ticket),
            _ => None,
        }
    }

    /// The highlighted navigation entry. Falls back to "Abstract" when the
    /// paper has no sections or none has been picked yet.
    pub fn active_section(&self) -> &str {
        self.active_section.as_deref().unwrap_or(ABSTRACT_ENTRY)
    }

    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    /// Side-panel targets: "Abstract" followed by every section title.
    /// Empty unless a paper is loaded.
    pub fn nav_entries(&self) -> Vec<&str> {
        match self.paper() {
            Some(paper) => std::iter::once(ABSTRACT_ENTRY)
                .chain(paper.sections().iter().map(|s| s.title.as_str()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// React to the selected id being set (on mount or on any change,
    /// including a repeat of the current id).
    pub fn on_selection(&mut self, paper_id: Option<PaperId>) -> Effect {
        self.selected = paper_id.clone();
        self.active_section = None;
        match paper_id {
            None => {
                tracing::debug!("no paper selected, redirecting");
                self.phase = Phase::NoSelection;
                Effect::Redirect
            }
            Some(paper_id) => {
                self.next_ticket += 1;
                let ticket = RequestTicket(self.next_ticket);
                tracing::info!(%paper_id, ticket = ticket.0, "loading paper");
                self.phase = Phase::Loading {
                    ticket,
                    paper_id: paper_id.clone(),
                };
                Effect::Fetch { ticket, paper_id }
            }
        }
    }

    /// Re-run the fetch for the current selection after a failure (or to
    /// refresh a loaded paper). Does nothing while a fetch is pending.
    pub fn retry(&mut self) -> Option<Effect> {
        if self.is_loading() {
            return None;
        }
        let selected = self.selected.clone()?;
        Some(self.on_selection(Some(selected)))
    }

    /// Apply the outcome of a fetch. Returns `false` when the outcome is
    /// stale and was discarded.
    pub fn on_loaded(&mut self, ticket: RequestTicket, result: Result<Paper, FetchError>) -> bool {
        if self.pending_ticket() != Some(ticket) {
            tracing::debug!(ticket = ticket.0, "discarding stale fetch outcome");
            return false;
        }
        match result {
            Ok(paper) => {
                tracing::info!(
                    paper_id = %paper.paper_id,
                    sections = paper.sections().len(),
                    "paper loaded"
                );
                self.active_section = paper.first_section_title().map(str::to_string);
                self.phase = Phase::Ready(paper);
            }
            Err(err) => {
                tracing::warn!(error = %err, "paper fetch failed");
                self.phase = Phase::Error(err.user_message());
            }
        }
        true
    }

    /// Jump to a navigation entry. Repeating the active entry only re-scrolls.
    pub fn select_section(&mut self, title: &str) -> Option<Effect> {
        let paper = self.paper()?;
        if title != ABSTRACT_ENTRY && paper.section(title).is_none() {
            return None;
        }
        self.active_section = Some(title.to_string());
        Some(Effect::ScrollTo {
            title: title.to_string(),
        })
    }

    pub fn next_section(&mut self) -> Option<Effect> {
        self.step_section(1)
    }

    pub fn prev_section(&mut self) -> Option<Effect> {
        self.step_section(-1)
    }

    fn step_section(&mut self, delta: isize) -> Option<Effect> {
        let entries = self.nav_entries();
        let current = entries
            .iter()
            .position(|e| *e == self.active_section())
            .unwrap_or(0);
        let target = current
            .saturating_add_signed(delta)
            .min(entries.len().checked_sub(1)?);
        let title = entries[target].to_string();
        self.select_section(&title)
    }

    /// Switch the color scheme. Purely cosmetic.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.color_scheme = scheme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, Section};

    fn section(title: &str) -> Section {
        Section {
            title: title.to_string(),
            paragraphs: vec![Paragraph {
                paragraph_num: 1,
                content: format!("{title} body"),
            }],
        }
    }

    fn paper(sections: &[&str]) -> Paper {
        Paper {
            paper_id: "1706.03762".into(),
            title: "Attention Is All You Need".into(),
            authors: vec!["A".into(), "B".into()],
            abstract_text: "...".into(),
            publication_year: 2017,
            keywords: vec!["transformers".into()],
            citations_count: 50_000,
            pdf_url: "http://x/p.pdf".into(),
            sections: if sections.is_empty() {
                None
            } else {
                Some(sections.iter().map(|t| section(t)).collect())
            },
        }
    }

    fn id(s: &str) -> PaperId {
        PaperId::new(s).unwrap()
    }

    fn fetch_ticket(effect: Effect) -> RequestTicket {
        match effect {
            Effect::Fetch { ticket, .. } => ticket,
            other => panic!("expected Fetch, got {other:?}"),
        }
    }

    fn ready(sections: &[&str]) -> ViewerState {
        let mut viewer = ViewerState::default();
        let ticket = fetch_ticket(viewer.on_selection(Some(id("1706.03762"))));
        assert!(viewer.on_loaded(ticket, Ok(paper(sections))));
        viewer
    }

    #[test]
    fn starts_without_selection_in_light_scheme() {
        let viewer = ViewerState::default();
        assert_eq!(viewer.phase(), &Phase::NoSelection);
        assert_eq!(viewer.color_scheme(), ColorScheme::Light);
        assert_eq!(viewer.active_section(), ABSTRACT_ENTRY);
        assert!(viewer.nav_entries().is_empty());
    }

    #[test]
    fn absent_selection_redirects_without_fetch() {
        let mut viewer = ViewerState::default();
        assert_eq!(viewer.on_selection(None), Effect::Redirect);
        assert_eq!(viewer.phase(), &Phase::NoSelection);
        assert_eq!(viewer.pending_ticket(), None);
    }

    #[test]
    fn selection_enters_loading_with_fresh_ticket() {
        let mut viewer = ViewerState::default();
        let first = fetch_ticket(viewer.on_selection(Some(id("a"))));
        assert!(viewer.is_loading());
        let second = fetch_ticket(viewer.on_selection(Some(id("a"))));
        assert_ne!(first, second);
        assert_eq!(viewer.pending_ticket(), Some(second));
    }

    #[test]
    fn success_activates_first_section() {
        let viewer = ready(&["Intro", "Method", "Results"]);
        assert_eq!(viewer.phase().label(), "ready");
        assert_eq!(viewer.active_section(), "Intro");
        assert_eq!(
            viewer.nav_entries(),
            vec!["Abstract", "Intro", "Method", "Results"]
        );
    }

    #[test]
    fn zero_sections_only_lists_abstract() {
        let viewer = ready(&[]);
        assert_eq!(viewer.active_section(), ABSTRACT_ENTRY);
        assert_eq!(viewer.nav_entries(), vec!["Abstract"]);
    }

    #[test]
    fn http_failure_stores_message() {
        let mut viewer = ViewerState::default();
        let ticket = fetch_ticket(viewer.on_selection(Some(id("missing"))));
        let err = FetchError::Http {
            status: 404,
            reason: "Not Found".into(),
        };
        assert!(viewer.on_loaded(ticket, Err(err)));
        assert_eq!(viewer.phase().label(), "error");
        assert!(viewer.error_message().unwrap().contains("Not Found"));
        assert!(viewer.paper().is_none());
        assert!(viewer.nav_entries().is_empty());
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut viewer = ViewerState::default();
        let old = fetch_ticket(viewer.on_selection(Some(id("old"))));
        let new = fetch_ticket(viewer.on_selection(Some(id("new"))));

        assert!(!viewer.on_loaded(old, Ok(paper(&["Stale"]))));
        assert!(viewer.is_loading());

        assert!(viewer.on_loaded(new, Ok(paper(&["Fresh"]))));
        assert_eq!(viewer.active_section(), "Fresh");

        // A late duplicate for the current ticket no longer applies either.
        assert!(!viewer.on_loaded(new, Ok(paper(&["Again"]))));
        assert_eq!(viewer.active_section(), "Fresh");
    }

    #[test]
    fn reselect_after_error_refetches() {
        let mut viewer = ViewerState::default();
        let t1 = fetch_ticket(viewer.on_selection(Some(id("a"))));
        viewer.on_loaded(t1, Err(FetchError::Network("connection refused".into())));
        let t2 = fetch_ticket(viewer.on_selection(Some(id("a"))));
        assert_ne!(t1, t2);
        assert!(viewer.error_message().is_none());
    }

    #[test]
    fn retry_reissues_current_selection() {
        let mut viewer = ViewerState::default();
        assert_eq!(viewer.retry(), None);

        let t1 = fetch_ticket(viewer.on_selection(Some(id("a"))));
        assert_eq!(viewer.retry(), None, "no retry while loading");
        viewer.on_loaded(t1, Err(FetchError::Network(String::new())));
        match viewer.retry() {
            Some(Effect::Fetch { paper_id, .. }) => assert_eq!(paper_id, id("a")),
            other => panic!("expected Fetch, got {other:?}"),
        }
    }

    #[test]
    fn select_section_is_idempotent() {
        let mut viewer = ready(&["Intro", "Method"]);
        let effect = viewer.select_section("Method");
        assert_eq!(
            effect,
            Some(Effect::ScrollTo {
                title: "Method".into()
            })
        );
        let again = viewer.select_section("Method");
        assert_eq!(again, effect);
        assert_eq!(viewer.active_section(), "Method");
    }

    #[test]
    fn select_abstract_and_unknown() {
        let mut viewer = ready(&["Intro"]);
        assert!(viewer.select_section(ABSTRACT_ENTRY).is_some());
        assert_eq!(viewer.active_section(), ABSTRACT_ENTRY);
        assert_eq!(viewer.select_section("Nope"), None);
        assert_eq!(viewer.active_section(), ABSTRACT_ENTRY);
    }

    #[test]
    fn select_section_requires_loaded_paper() {
        let mut viewer = ViewerState::default();
        viewer.on_selection(Some(id("a")));
        assert_eq!(viewer.select_section(ABSTRACT_ENTRY), None);
        assert_eq!(viewer.next_section(), None);
    }

    #[test]
    fn stepping_clamps_at_ends() {
        let mut viewer = ready(&["Intro", "Method"]);
        assert_eq!(viewer.active_section(), "Intro");
        viewer.next_section();
        assert_eq!(viewer.active_section(), "Method");
        viewer.next_section();
        assert_eq!(viewer.active_section(), "Method");
        viewer.prev_section();
        viewer.prev_section();
        viewer.prev_section();
        assert_eq!(viewer.active_section(), ABSTRACT_ENTRY);
    }

    #[test]
    fn color_scheme_does_not_touch_content() {
        let mut viewer = ready(&["Intro", "Method"]);
        viewer.select_section("Method");
        let before = viewer.phase().clone();
        for scheme in ColorScheme::ALL {
            viewer.set_color_scheme(scheme);
            assert_eq!(viewer.color_scheme(), scheme);
            assert_eq!(viewer.active_section(), "Method");
            assert_eq!(viewer.phase(), &before);
        }
    }

    #[test]
    fn new_selection_clears_active_section() {
        let mut viewer = ready(&["Intro"]);
        let ticket = fetch_ticket(viewer.on_selection(Some(id("other"))));
        assert_eq!(viewer.active_section(), ABSTRACT_ENTRY);
        viewer.on_loaded(ticket, Ok(paper(&[])));
        assert_eq!(viewer.active_section(), ABSTRACT_ENTRY);
    }

    #[test]
    fn color_scheme_parses_and_cycles() {
        assert_eq!("Dark".parse::<ColorScheme>().unwrap(), ColorScheme::Dark);
        assert_eq!(" stars ".parse::<ColorScheme>().unwrap(), ColorScheme::Stars);
        assert!("neon".parse::<ColorScheme>().is_err());
        let mut s = ColorScheme::Light;
        for _ in 0..3 {
            s = s.next();
        }
        assert_eq!(s, ColorScheme::Light);
    }
}

//! End-to-end tests for the viewer: selection handle → state machine →
//! loader → mock paper source → view model.
//!
//! No HTTP requests are made; [`MockPaperSource`] stands in for the backend.

use std::sync::Arc;
use std::time::Duration;

use readable_core::source::mock::MockPaperSource;
use readable_core::source::http::parse_paper_body;
use readable_core::{
    ColorScheme, Effect, FetchError, LoadOutcome, PaperId, PaperLoader, SelectionProvider,
    ViewModel, ViewerState,
};
use tokio::sync::mpsc;

const ATTENTION_BODY: &str = r#"{"paper": {"paper_id":"1706.03762","title":"Attention Is All You Need","authors":["A","B"],"abstract":"...","publication_year":2017,"keywords":["transformers"],"citations_count":50000,"pdf_url":"http://x/p.pdf","sections":[{"title":"Intro","paragraphs":[{"paragraphNum":1,"content":"..."}]}]}}"#;

struct Harness {
    provider: SelectionProvider,
    viewer: ViewerState,
    loader: PaperLoader,
    outcomes: mpsc::UnboundedReceiver<LoadOutcome>,
    source: Arc<MockPaperSource>,
}

impl Harness {
    fn new(source: MockPaperSource) -> Self {
        let source = Arc::new(source);
        let (tx, outcomes) = mpsc::unbounded_channel();
        Self {
            provider: SelectionProvider::new(),
            viewer: ViewerState::default(),
            loader: PaperLoader::new(source.clone(), tx),
            outcomes,
            source,
        }
    }

    /// Write the selection and let the viewer react, returning the effect.
    fn select(&mut self, raw: &str) -> Effect {
        let handle = self.provider.handle();
        handle.set(PaperId::new(raw));
        let effect = self.viewer.on_selection(handle.get());
        if let Effect::Fetch { ticket, paper_id } = &effect {
            self.loader.load(*ticket, paper_id.clone());
        }
        effect
    }

    async fn settle(&mut self) {
        let outcome = tokio::time::timeout(Duration::from_secs(5), self.outcomes.recv())
            .await
            .expect("fetch should finish")
            .expect("loader channel open");
        self.viewer.on_loaded(outcome.ticket, outcome.result);
    }
}

fn attention() -> readable_core::Paper {
    parse_paper_body(ATTENTION_BODY).unwrap()
}

#[tokio::test]
async fn sample_paper_renders_end_to_end() {
    let mut h = Harness::new(MockPaperSource::new().with_paper(attention()));

    assert!(matches!(h.select("1706.03762"), Effect::Fetch { .. }));
    assert_eq!(ViewModel::from_state(&h.viewer), ViewModel::Skeleton);
    h.settle().await;

    assert_eq!(h.viewer.phase().label(), "ready");
    let ViewModel::Paper(view) = ViewModel::from_state(&h.viewer) else {
        panic!("expected paper view");
    };
    assert_eq!(view.title, "Attention Is All You Need");
    assert_eq!(view.citations, "50,000");
    assert_eq!(view.nav_titles(), vec!["Abstract", "Intro"]);
    assert_eq!(h.viewer.active_section(), "Intro");
    assert_eq!(h.source.call_count(), 1);
}

#[tokio::test]
async fn empty_selection_redirects_without_fetch() {
    let mut h = Harness::new(MockPaperSource::new().with_paper(attention()));
    assert_eq!(h.select("   "), Effect::Redirect);
    assert_eq!(ViewModel::from_state(&h.viewer), ViewModel::Redirect);
    tokio::task::yield_now().await;
    assert_eq!(h.source.call_count(), 0);
    assert!(h.outcomes.try_recv().is_err());
}

#[tokio::test]
async fn not_found_shows_alert_only() {
    let mut h = Harness::new(MockPaperSource::new());
    h.select("0000.00000");
    h.settle().await;

    match ViewModel::from_state(&h.viewer) {
        ViewModel::Alert { message } => assert!(message.contains("Not Found")),
        other => panic!("expected alert, got {other:?}"),
    }
    assert!(h.viewer.paper().is_none());
}

#[tokio::test]
async fn network_failure_shows_alert() {
    let source = MockPaperSource::with_fallback(Err(FetchError::Network(
        "connection refused".into(),
    )));
    let mut h = Harness::new(source);
    h.select("1706.03762");
    h.settle().await;
    assert_eq!(
        h.viewer.error_message(),
        Some("Failed to fetch paper data: connection refused")
    );
}

#[tokio::test]
async fn reselecting_same_paper_fetches_again() {
    let mut h = Harness::new(MockPaperSource::new().with_paper(attention()));
    h.select("1706.03762");
    h.settle().await;
    h.select("1706.03762");
    assert!(h.viewer.is_loading());
    h.settle().await;
    assert_eq!(h.source.call_count(), 2);
    assert_eq!(h.viewer.phase().label(), "ready");
}

#[tokio::test]
async fn superseded_fetch_never_lands() {
    let mut slow = attention();
    slow.paper_id = "slow".into();
    slow.title = "Slow Paper".into();
    let source = MockPaperSource::new()
        .with_paper(slow)
        .with_paper(attention())
        .with_delay_for("slow", Duration::from_millis(200));
    let mut h = Harness::new(source);

    h.select("slow");
    h.select("1706.03762");
    h.settle().await;
    assert_eq!(h.viewer.paper().unwrap().title, "Attention Is All You Need");

    // The cancelled request must not deliver anything afterwards.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(h.outcomes.try_recv().is_err());
    assert_eq!(h.viewer.paper().unwrap().title, "Attention Is All You Need");
    assert_eq!(h.source.call_count(), 2);
}

#[tokio::test]
async fn theme_change_does_not_refetch() {
    let mut h = Harness::new(MockPaperSource::new().with_paper(attention()));
    h.select("1706.03762");
    h.settle().await;
    let before = ViewModel::from_state(&h.viewer);

    h.viewer.set_color_scheme(ColorScheme::Stars);
    h.viewer.set_color_scheme(ColorScheme::Dark);

    assert_eq!(ViewModel::from_state(&h.viewer), before);
    assert_eq!(h.viewer.active_section(), "Intro");
    assert_eq!(h.source.call_count(), 1);
}

#[tokio::test]
async fn health_defaults_to_mock_setting() {
    use readable_core::PaperSource;
    assert!(MockPaperSource::new().health().await.unwrap());
    assert!(!MockPaperSource::new().unhealthy().health().await.unwrap());
}

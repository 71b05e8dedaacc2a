//! What the viewer shows, independent of any rendering toolkit.
//!
//! Front ends build a [`ViewModel`] from the [`ViewerState`] every frame and
//! draw it however they like. The ordering of the paper view is fixed:
//! title, byline, keywords, abstract, then the sections as stored.

use crate::format::{byline, group_thousands};
use crate::model::Paper;
use crate::viewer::{ABSTRACT_ENTRY, Phase, ViewerState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModel {
    /// Nothing selected; the host should show the landing view.
    Redirect,
    /// Fetch in flight; draw a placeholder.
    Skeleton,
    /// Fetch failed; draw the message in an alert box.
    Alert { message: String },
    Paper(PaperView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperView {
    pub title: String,
    pub byline: String,
    pub keywords: Vec<String>,
    pub abstract_text: String,
    pub sections: Vec<SectionView>,
    pub nav: Vec<NavEntry>,
    pub pdf_url: String,
    /// Citation count with thousands grouping, e.g. `"50,000"`.
    pub citations: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub title: String,
    pub paragraphs: Vec<String>,
}

/// One side-panel target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub title: String,
    pub active: bool,
}

impl ViewModel {
    pub fn from_state(state: &ViewerState) -> Self {
        match state.phase() {
            Phase::NoSelection => ViewModel::Redirect,
            Phase::Loading { .. } => ViewModel::Skeleton,
            Phase::Error(message) => ViewModel::Alert {
                message: message.clone(),
            },
            Phase::Ready(paper) => {
                ViewModel::Paper(PaperView::from_paper(paper, state.active_section()))
            }
        }
    }
}

impl PaperView {
    pub fn from_paper(paper: &Paper, active_section: &str) -> Self {
        let nav = std::iter::once(ABSTRACT_ENTRY)
            .chain(paper.sections().iter().map(|s| s.title.as_str()))
            .map(|title| NavEntry {
                title: title.to_string(),
                active: title == active_section,
            })
            .collect();
        let sections = paper
            .sections()
            .iter()
            .map(|s| SectionView {
                title: s.title.clone(),
                paragraphs: s.paragraphs.iter().map(|p| p.content.clone()).collect(),
            })
            .collect();

        Self {
            title: paper.title.clone(),
            byline: byline(&paper.authors, paper.publication_year),
            keywords: paper.keywords.clone(),
            abstract_text: paper.abstract_text.clone(),
            sections,
            nav,
            pdf_url: paper.pdf_url.clone(),
            citations: group_thousands(paper.citations_count),
        }
    }

    pub fn nav_titles(&self) -> Vec<&str> {
        self.nav.iter().map(|e| e.title.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PaperId, Paragraph, Section};
    use crate::{Effect, FetchError};

    fn paper(sections: Vec<Section>) -> Paper {
        Paper {
            paper_id: "1706.03762".into(),
            title: "Attention Is All You Need".into(),
            authors: vec!["A".into(), "B".into()],
            abstract_text: "We propose the Transformer.".into(),
            publication_year: 2017,
            keywords: vec!["transformers".into(), "attention".into()],
            citations_count: 50_000,
            pdf_url: "http://x/p.pdf".into(),
            sections: Some(sections),
        }
    }

    fn loaded(p: Paper) -> ViewerState {
        let mut state = ViewerState::default();
        let Effect::Fetch { ticket, .. } = state.on_selection(PaperId::new("1706.03762")) else {
            panic!("expected fetch");
        };
        state.on_loaded(ticket, Ok(p));
        state
    }

    #[test]
    fn phases_map_to_views() {
        let mut state = ViewerState::default();
        assert_eq!(ViewModel::from_state(&state), ViewModel::Redirect);

        let Effect::Fetch { ticket, .. } = state.on_selection(PaperId::new("x")) else {
            panic!("expected fetch");
        };
        assert_eq!(ViewModel::from_state(&state), ViewModel::Skeleton);

        state.on_loaded(
            ticket,
            Err(FetchError::Http {
                status: 404,
                reason: "Not Found".into(),
            }),
        );
        match ViewModel::from_state(&state) {
            ViewModel::Alert { message } => assert!(message.contains("Not Found")),
            other => panic!("expected alert, got {other:?}"),
        }
    }

    #[test]
    fn paper_view_preserves_order_and_formats() {
        let sections = vec![
            Section {
                title: "Intro".into(),
                paragraphs: vec![
                    Paragraph {
                        paragraph_num: 2,
                        content: "one".into(),
                    },
                    Paragraph {
                        paragraph_num: 1,
                        content: "two".into(),
                    },
                ],
            },
            Section {
                title: "Model".into(),
                paragraphs: vec![],
            },
        ];
        let state = loaded(paper(sections));
        let ViewModel::Paper(view) = ViewModel::from_state(&state) else {
            panic!("expected paper view");
        };
        assert_eq!(view.title, "Attention Is All You Need");
        assert_eq!(view.byline, "A, B \u{2022} 2017");
        assert_eq!(view.citations, "50,000");
        assert_eq!(view.keywords, vec!["transformers", "attention"]);
        assert_eq!(view.sections[0].paragraphs, vec!["one", "two"]);
        assert_eq!(view.nav_titles(), vec!["Abstract", "Intro", "Model"]);
        let active: Vec<_> = view.nav.iter().filter(|e| e.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].title, "Intro");
    }

    #[test]
    fn sectionless_paper_has_only_abstract() {
        let mut p = paper(vec![]);
        p.sections = None;
        let state = loaded(p);
        let ViewModel::Paper(view) = ViewModel::from_state(&state) else {
            panic!("expected paper view");
        };
        assert!(view.sections.is_empty());
        assert_eq!(view.nav_titles(), vec!["Abstract"]);
        assert!(view.nav[0].active);
    }
}

mod backend;
mod update;
mod util;


use ratatui::layout::Rect;
use tokio::sync::{mpsc, watch};

use readable_core::config_file::Settings;
use readable_core::{Effect, PaperId, SelectionHandle, ViewModel, ViewerState};

use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Which screen is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Viewer,
}

/// Input mode for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a paper id on the landing screen.
    PaperId,
}

/// How many ticks a status message stays in the footer.
const STATUS_TICKS: usize = 30;

/// Central application state.
pub struct App {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub paper_input: String,

    selection: SelectionHandle,
    selection_rx: watch::Receiver<Option<PaperId>>,
    pub viewer: ViewerState,
    pub theme: Theme,
    pub sample_paper_id: PaperId,

    pub tick: usize,
    pub should_quit: bool,
    pub show_help: bool,

    // Reading pane geometry, refreshed on every render.
    pub scroll: u16,
    pub max_scroll: u16,
    pub viewport_height: u16,
    /// Line offset of each navigation entry in the rendered paper.
    pub anchors: Vec<(String, u16)>,
    /// Section to scroll to on the next render, once anchors are known.
    pub pending_scroll: Option<String>,
    /// Clickable side-panel rows.
    pub nav_hitboxes: Vec<(Rect, String)>,

    /// Transient footer message and the tick it expires at.
    pub status: Option<(String, usize)>,
    /// Last health probe result, if one has come back.
    pub backend_health: Option<Result<bool, String>>,

    backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(selection: SelectionHandle, settings: &Settings) -> Self {
        let selection_rx = selection.subscribe();
        Self {
            screen: Screen::Landing,
            input_mode: InputMode::Normal,
            paper_input: String::new(),
            selection,
            selection_rx,
            viewer: ViewerState::new(settings.color_scheme),
            theme: Theme::for_scheme(settings.color_scheme),
            sample_paper_id: settings.sample_paper_id.clone(),
            tick: 0,
            should_quit: false,
            show_help: false,
            scroll: 0,
            max_scroll: 0,
            viewport_height: 0,
            anchors: Vec::new(),
            pending_scroll: None,
            nav_hitboxes: Vec::new(),
            status: None,
            backend_health: None,
            backend_cmd_tx: None,
        }
    }

    pub fn with_backend(mut self, tx: mpsc::UnboundedSender<BackendCommand>) -> Self {
        self.backend_cmd_tx = Some(tx);
        self
    }

    /// Read the selection once at startup. An empty selection keeps the
    /// landing screen.
    pub fn mount(&mut self) {
        self.selection_rx.borrow_and_update();
        let current = self.selection.get();
        self.on_selection_changed(current);
    }

    /// Pick up selection writes since the last call. Every write counts,
    /// including one that repeats the current id.
    pub fn poll_selection(&mut self) {
        if matches!(self.selection_rx.has_changed(), Ok(true)) {
            let current = self.selection_rx.borrow_and_update().clone();
            self.on_selection_changed(current);
        }
    }

    fn on_selection_changed(&mut self, paper_id: Option<PaperId>) {
        let effect = self.viewer.on_selection(paper_id);
        self.apply_effect(effect);
    }

    fn select(&mut self, paper_id: Option<PaperId>) {
        self.selection.set(paper_id);
        self.poll_selection();
    }

    pub(crate) fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Redirect => {
                self.send(BackendCommand::Cancel);
                self.screen = Screen::Landing;
            }
            Effect::Fetch { ticket, paper_id } => {
                self.screen = Screen::Viewer;
                self.reset_scroll();
                self.send(BackendCommand::Fetch { ticket, paper_id });
            }
            Effect::ScrollTo { title } => {
                self.pending_scroll = Some(title);
            }
        }
    }

    fn reset_scroll(&mut self) {
        self.scroll = 0;
        self.max_scroll = 0;
        self.anchors.clear();
        self.nav_hitboxes.clear();
        self.pending_scroll = None;
    }

    fn send(&self, cmd: BackendCommand) {
        if let Some(tx) = &self.backend_cmd_tx {
            let _ = tx.send(cmd);
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some((message.into(), self.tick + STATUS_TICKS));
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status.as_ref().map(|(m, _)| m.as_str())
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();
        f.render_widget(
            ratatui::widgets::Block::default().style(self.theme.base_style()),
            area,
        );

        match self.screen {
            Screen::Landing => crate::view::landing::render(f, self),
            Screen::Viewer => {
                let model = ViewModel::from_state(&self.viewer);
                crate::view::viewer::render(f, self, &model);
            }
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }
    }
}

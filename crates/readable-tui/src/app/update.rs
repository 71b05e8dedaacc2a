use readable_core::PaperId;

use super::{App, InputMode, Screen};
use crate::action::Action;
use crate::theme::Theme;

impl App {
    /// Process an action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        // Help overlay intercepts everything except its own toggle and quit.
        if self.show_help {
            match action {
                Action::ToggleHelp | Action::NavigateBack => self.show_help = false,
                Action::Quit => self.should_quit = true,
                Action::Tick => self.on_tick(),
                _ => {}
            }
            return self.should_quit;
        }

        if self.input_mode == InputMode::PaperId {
            self.update_text_input(action);
            return self.should_quit;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Tick => self.on_tick(),
            Action::Resize(_, _) => {}
            Action::ToggleHelp => self.show_help = true,
            Action::CycleTheme => self.set_theme(self.viewer.color_scheme().next()),
            Action::SetTheme(scheme) => self.set_theme(scheme),
            _ => match self.screen {
                Screen::Landing => self.update_landing(action),
                Screen::Viewer => self.update_viewer(action),
            },
        }

        self.should_quit
    }

    fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
        if let Some((_, expires)) = &self.status
            && self.tick >= *expires
        {
            self.status = None;
        }
    }

    fn set_theme(&mut self, scheme: readable_core::ColorScheme) {
        self.viewer.set_color_scheme(scheme);
        self.theme = Theme::for_scheme(scheme);
    }

    fn update_landing(&mut self, action: Action) {
        match action {
            Action::Confirm => {
                let sample = self.sample_paper_id.clone();
                self.select(Some(sample));
            }
            Action::StartInput | Action::OpenPdf => {
                self.input_mode = InputMode::PaperId;
                self.paper_input.clear();
            }
            _ => {}
        }
    }

    fn update_text_input(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Tick => self.on_tick(),
            Action::TextInput(c) => self.paper_input.push(c),
            Action::TextBackspace => {
                self.paper_input.pop();
            }
            Action::TextCancel => {
                self.input_mode = InputMode::Normal;
                self.paper_input.clear();
            }
            Action::TextConfirm => {
                self.input_mode = InputMode::Normal;
                let raw = std::mem::take(&mut self.paper_input);
                match PaperId::new(&raw) {
                    Some(paper_id) => self.select(Some(paper_id)),
                    // Blank input leaves the current selection alone.
                    None => self.set_status("Enter a paper id"),
                }
            }
            _ => {}
        }
    }

    fn update_viewer(&mut self, action: Action) {
        match action {
            Action::ScrollDown => self.scroll_by(1),
            Action::ScrollUp => self.scroll_by(-1),
            Action::PageDown => self.scroll_by(self.page_size()),
            Action::PageUp => self.scroll_by(-self.page_size()),
            Action::GoTop => self.scroll = 0,
            Action::GoBottom => self.scroll = self.max_scroll,
            Action::NextSection => {
                if let Some(effect) = self.viewer.next_section() {
                    self.apply_effect(effect);
                }
            }
            Action::PrevSection => {
                if let Some(effect) = self.viewer.prev_section() {
                    self.apply_effect(effect);
                }
            }
            Action::Confirm => {
                let active = self.viewer.active_section().to_string();
                if let Some(effect) = self.viewer.select_section(&active) {
                    self.apply_effect(effect);
                }
            }
            Action::ClickAt(x, y) => self.click_nav(x, y),
            Action::OpenPdf => {
                let Some(url) = self.pdf_url() else { return };
                match super::util::open_url(&url) {
                    Ok(()) => self.set_status("Opened PDF"),
                    Err(message) => {
                        tracing::warn!(%url, %message, "could not open PDF");
                        self.set_status(message);
                    }
                }
            }
            Action::CopyPdfUrl => {
                let Some(url) = self.pdf_url() else { return };
                super::util::osc52_copy(&url);
                self.set_status("Copied PDF link");
            }
            Action::Retry => {
                if let Some(effect) = self.viewer.retry() {
                    self.apply_effect(effect);
                }
            }
            Action::NavigateBack => {
                self.send(crate::tui_event::BackendCommand::Cancel);
                self.screen = Screen::Landing;
            }
            _ => {}
        }
    }

    fn click_nav(&mut self, x: u16, y: u16) {
        let hit = self
            .nav_hitboxes
            .iter()
            .find(|(rect, _)| {
                x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
            })
            .map(|(_, title)| title.clone());
        if let Some(title) = hit
            && let Some(effect) = self.viewer.select_section(&title)
        {
            self.apply_effect(effect);
        }
    }

    fn pdf_url(&self) -> Option<String> {
        self.viewer.paper().map(|p| p.pdf_url.clone())
    }

    fn page_size(&self) -> i32 {
        i32::from(self.viewport_height.saturating_sub(2).max(1))
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll));
        self.scroll = next as u16;
    }
}

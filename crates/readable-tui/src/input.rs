use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use readable_core::ColorScheme;

use crate::action::Action;
use crate::app::InputMode;

/// Map a crossterm terminal event to a TUI action, respecting input mode.
pub fn map_event(event: &Event, input_mode: &InputMode) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            // Ctrl+C always quits regardless of mode
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Action::Quit;
            }

            match input_mode {
                InputMode::Normal => map_key_normal(key),
                InputMode::PaperId => map_key_text_input(key),
            }
        }
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(w, h) => Action::Resize(*w, *h),
        _ => Action::None,
    }
}

fn map_mouse(mouse: &MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollDown => Action::ScrollDown,
        MouseEventKind::ScrollUp => Action::ScrollUp,
        MouseEventKind::Down(MouseButton::Left) => Action::ClickAt(mouse.column, mouse.row),
        _ => Action::None,
    }
}

fn map_key_normal(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
        KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageDown,
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::PageUp,
        KeyCode::PageDown | KeyCode::Char(' ') => Action::PageDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::Char('g') | KeyCode::Home => Action::GoTop,
        KeyCode::Char('G') | KeyCode::End => Action::GoBottom,
        KeyCode::Char('n') | KeyCode::Char('l') | KeyCode::Tab | KeyCode::Right => {
            Action::NextSection
        }
        KeyCode::Char('p') | KeyCode::Char('h') | KeyCode::BackTab | KeyCode::Left => {
            Action::PrevSection
        }
        KeyCode::Enter => Action::Confirm,
        KeyCode::Esc => Action::NavigateBack,
        KeyCode::Char('t') => Action::CycleTheme,
        KeyCode::Char('1') => Action::SetTheme(ColorScheme::Light),
        KeyCode::Char('2') => Action::SetTheme(ColorScheme::Dark),
        KeyCode::Char('3') => Action::SetTheme(ColorScheme::Stars),
        KeyCode::Char('o') => Action::OpenPdf,
        KeyCode::Char('y') => Action::CopyPdfUrl,
        KeyCode::Char('r') => Action::Retry,
        KeyCode::Char('/') | KeyCode::Char(':') => Action::StartInput,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

fn map_key_text_input(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::TextCancel,
        KeyCode::Enter => Action::TextConfirm,
        KeyCode::Backspace => Action::TextBackspace,
        KeyCode::Char(c) => Action::TextInput(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        let evt = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&evt, &InputMode::Normal), Action::Quit);
        assert_eq!(map_event(&evt, &InputMode::PaperId), Action::Quit);
    }

    #[test]
    fn theme_keys() {
        assert_eq!(
            map_event(&press(KeyCode::Char('3')), &InputMode::Normal),
            Action::SetTheme(ColorScheme::Stars)
        );
        assert_eq!(
            map_event(&press(KeyCode::Char('t')), &InputMode::Normal),
            Action::CycleTheme
        );
    }

    #[test]
    fn text_mode_captures_letters() {
        assert_eq!(
            map_event(&press(KeyCode::Char('q')), &InputMode::PaperId),
            Action::TextInput('q')
        );
        assert_eq!(
            map_event(&press(KeyCode::Enter), &InputMode::PaperId),
            Action::TextConfirm
        );
    }
}

use readable_core::ColorScheme;

/// Everything the user (or the clock) can ask the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Resize(u16, u16),

    // Scrolling the reading pane
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    GoTop,
    GoBottom,

    // Section navigation
    NextSection,
    PrevSection,
    ClickAt(u16, u16),

    /// Enter: view the sample paper on the landing screen.
    Confirm,
    /// Esc: back to the landing screen.
    NavigateBack,

    CycleTheme,
    SetTheme(ColorScheme),

    OpenPdf,
    CopyPdfUrl,
    Retry,
    ToggleHelp,

    // Paper id entry on the landing screen
    StartInput,
    TextInput(char),
    TextBackspace,
    TextCancel,
    TextConfirm,

    None,
}

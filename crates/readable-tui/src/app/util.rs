use std::io::Write;

/// Copy text to the system clipboard via the OSC 52 terminal escape.
pub(super) fn osc52_copy(text: &str) {
    use base64::Engine;
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    let _ = std::io::stdout().write_all(format!("\x1b]52;c;{encoded}\x07").as_bytes());
    let _ = std::io::stdout().flush();
}

/// Open a URL in a new browser window/tab with the system opener.
pub(super) fn open_url(url: &str) -> Result<(), String> {
    if url.trim().is_empty() {
        return Err("No PDF link for this paper".to_string());
    }
    open::that_detached(url).map_err(|e| format!("Failed to open PDF: {e}"))
}

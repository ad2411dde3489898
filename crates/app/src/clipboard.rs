//! System clipboard access

use arboard::Clipboard;

/// Read clipboard text, keeping the failure reason for the caller to log
pub fn read_text() -> Result<String, String> {
    let mut clipboard = Clipboard::new().map_err(|e| format!("clipboard unavailable: {}", e))?;
    clipboard
        .get_text()
        .map_err(|e| format!("clipboard has no text: {}", e))
}

//! Keyboard commands read from stdin while `watch` is running.

/// What a line typed during `watch` asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchInput {
    /// `r`: clear the feed cache and refresh now.
    Reload,
    /// `q`: stop watching.
    Quit,
    /// An empty line.
    Blank,
    /// Anything else, trimmed.
    Unknown(String),
    /// stdin reached EOF or failed. Stop reading it and keep refreshing.
    Closed,
}

/// Interprets one `next_line` result from stdin.
///
/// A read error is logged and treated like EOF, so a broken stdin never
/// ends the refresh loop.
#[must_use]
pub fn watch_input(line: std::io::Result<Option<String>>) -> WatchInput {
    match line {
        Ok(Some(line)) => match line.trim() {
            "r" => WatchInput::Reload,
            "q" => WatchInput::Quit,
            "" => WatchInput::Blank,
            other => WatchInput::Unknown(other.to_string()),
        },
        Ok(None) => WatchInput::Closed,
        Err(e) => {
            log::error!("Failed to read stdin: {e}");
            WatchInput::Closed
        }
    }
}

//! Formatting utilities for CLI output.

use crate::services::mpris::PlaybackState;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Dim text
    pub const DIM: &'static str = "\x1b[2m";

    /// Red color
    pub const RED: &'static str = "\x1b[31m";
    /// Green color
    pub const GREEN: &'static str = "\x1b[32m";
    /// Yellow color
    pub const YELLOW: &'static str = "\x1b[33m";
    /// Cyan color
    pub const CYAN: &'static str = "\x1b[36m";
}

/// Formats section headers with styling
pub fn format_header(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::CYAN, text, Colors::RESET)
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// One line of `watch` output: a `+`/`-` marker, event kind, and player ID
pub fn format_event(appeared: bool, kind: &str, player_id: &str) -> String {
    let (marker, color) = if appeared {
        ("+", Colors::GREEN)
    } else {
        ("-", Colors::RED)
    };
    format!(
        "{color}{marker}{reset} {dim}{kind:<6}{reset} {player_id}",
        reset = Colors::RESET,
        dim = Colors::DIM,
    )
}

/// One line of `status` output
pub fn format_player_status(
    index: usize,
    identity: &str,
    player_id: &str,
    state: Option<PlaybackState>,
) -> String {
    let state = match state {
        Some(PlaybackState::Playing) => format!("{}▶ Playing{}", Colors::GREEN, Colors::RESET),
        Some(PlaybackState::Paused) => format!("{}⏸ Paused{}", Colors::YELLOW, Colors::RESET),
        Some(PlaybackState::Stopped) => "⏹ Stopped".to_string(),
        None => format!("{}? Unknown{}", Colors::DIM, Colors::RESET),
    };
    format!("{index:2}. {identity:<24} {player_id:<28} {state}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_lines_carry_marker_and_id() {
        let appeared = format_event(true, "player", "spotify");
        assert!(appeared.contains('+'));
        assert!(appeared.ends_with("spotify"));

        let vanished = format_event(false, "name", "mpv");
        assert!(vanished.contains('-'));
        assert!(vanished.ends_with("mpv"));
    }

    #[test]
    fn status_line_includes_state() {
        let line = format_player_status(1, "Spotify", "spotify", Some(PlaybackState::Paused));
        assert!(line.starts_with(" 1. Spotify"));
        assert!(line.contains("Paused"));
    }
}

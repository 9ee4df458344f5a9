//! Engine configuration.

use crate::input::Key;
use crate::terminal::{Capabilities, TtyOptions};
use std::time::Duration;

/// Environment variable that turns mouse reporting off (`0`) or on (`1`).
pub const MOUSE_ENV: &str = "GRIDLOOM_MOUSE";

/// Configuration for the engine loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long one iteration waits for input before rendering anyway.
    pub input_poll_timeout: Duration,
    /// Enable mouse reports.
    pub enable_mouse: bool,
    /// Use the alternate screen.
    pub alternate_screen: bool,
    /// Key that ends [`Engine::run`](super::Engine::run).
    pub quit_key: Key,
    /// Resolve a dangling partial sequence (a lone `ESC`) at the end of
    /// each read instead of waiting for more bytes.
    pub flush_partial_input: bool,
    /// Terminal type for the capability table; `None` means unknown.
    pub terminal_type: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            input_poll_timeout: Duration::from_millis(10),
            enable_mouse: true,
            alternate_screen: true,
            quit_key: Key::ctrl('c'),
            flush_partial_input: true,
            terminal_type: None,
        }
    }
}

impl EngineConfig {
    /// Defaults, with `TERM` and `GRIDLOOM_MOUSE` applied.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            terminal_type: var("TERM"),
            ..Self::default()
        };
        match var(MOUSE_ENV).as_deref().map(str::trim) {
            Some("0") => config.enable_mouse = false,
            Some("1") => config.enable_mouse = true,
            _ => {}
        }
        config
    }

    /// Capability table for [`terminal_type`](Self::terminal_type).
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_terminal(self.terminal_type.as_deref())
    }

    /// Terminal setup derived from this config.
    pub const fn tty_options(&self) -> TtyOptions {
        TtyOptions {
            alternate_screen: self.alternate_screen,
            mouse: self.enable_mouse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.input_poll_timeout, Duration::from_millis(10));
        assert_eq!(config.quit_key, Key::ctrl('c'));
        assert!(config.flush_partial_input);
        assert_eq!(config.capabilities().name(), "dumb");
    }

    #[test]
    fn test_from_vars() {
        let config = EngineConfig::from_vars(|name| match name {
            "TERM" => Some("xterm-256color".to_string()),
            MOUSE_ENV => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config.terminal_type.as_deref(), Some("xterm-256color"));
        assert!(!config.enable_mouse);
        assert_eq!(config.capabilities().name(), "ansi");
        assert!(!config.tty_options().mouse);
    }

    #[test]
    fn test_unrecognised_mouse_value_keeps_default() {
        let config = EngineConfig::from_vars(|name| (name == MOUSE_ENV).then(|| "yes".to_string()));
        assert!(config.enable_mouse);
        assert_eq!(config.terminal_type, None);
    }
}

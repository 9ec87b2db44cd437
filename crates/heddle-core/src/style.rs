//! Terminal styling for diagnostic output.

use std::io::IsTerminal;

use colored::Colorize;

/// Named styling functions over a construction-time on/off switch.
///
/// Enablement is decided once, when the palette is built, and carried by
/// value; when disabled every function returns its input unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Enable color iff the diagnostic stream is a terminal and `NO_COLOR`
    /// is unset.
    pub fn detect() -> Self {
        let enabled = std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        Self { enabled }
    }

    /// Styling switched off. What piped output and tests want.
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    /// Task names in the timing lines.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan().to_string())
    }

    /// Clock stamps.
    pub fn gray(&self, text: &str) -> String {
        self.paint(text, |t| t.bright_black().to_string())
    }

    /// Elapsed times.
    pub fn magenta(&self, text: &str) -> String {
        self.paint(text, |t| t.magenta().to_string())
    }

    fn paint(&self, text: &str, apply: impl Fn(&str) -> String) -> String {
        if self.enabled {
            apply(text)
        } else {
            text.to_string()
        }
    }
}

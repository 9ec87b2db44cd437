use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use super::ArgValue;

/// Structured form of a raw token list.
///
/// `positional` keeps encounter order and is consumed from the front by
/// task selection. `options` is keyed by option name without its `--`
/// marker; a name given twice keeps the later value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedArgs {
    #[serde(default)]
    pub positional: VecDeque<String>,
    #[serde(default)]
    pub options: HashMap<String, ArgValue>,
}

impl ParsedArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn option(&self, name: &str) -> Option<&ArgValue> {
        self.options.get(name)
    }

    /// Truthiness of an option; absent reads as false.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.options.get(name).is_some_and(ArgValue::is_truthy)
    }

    /// Text of an option, when it was captured as text rather than coerced.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(ArgValue::as_text)
    }

    /// Pop the front positional. Task selection consumes exactly one.
    pub fn shift(&mut self) -> Option<String> {
        self.positional.pop_front()
    }
}

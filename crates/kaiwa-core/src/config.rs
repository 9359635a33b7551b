use chrono::format::Item;
use chrono::format::StrftimeItems;
use serde::Deserialize;
use serde::Serialize;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%H:%M";

/// True when chrono can render `format` without error.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub chat: ChatConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ChatConfig {
    pub show_greeting: bool,
    pub transcript_capacity: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            show_greeting: true,
            transcript_capacity: 500,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    pub timestamp_format: String,
    pub theme: UiTheme,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            theme: UiTheme::Classic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum UiTheme {
    #[default]
    Classic,
    Mono,
}

impl UiTheme {
    pub fn label(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Mono => "Mono",
        }
    }
}

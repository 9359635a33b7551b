use std::collections::VecDeque;
use std::fmt::Write;

use chrono::DateTime;
use chrono::Local;
use serde::Serialize;

use super::config::Config;
use super::config::DEFAULT_TIMESTAMP_FORMAT;
use super::dialog::DialogState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub seq: u64,
    pub role: Role,
    pub text: String,
    pub at: DateTime<Local>,
}

impl TranscriptEntry {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            seq: 0,
            role,
            text: text.into(),
            at: Local::now(),
        }
    }

    /// Falls back to `%H:%M` when `format` is not a valid strftime string.
    pub fn timestamp_label(&self, format: &str) -> String {
        let mut label = String::new();
        if write!(label, "{}", self.at.format(format)).is_ok() {
            return label;
        }
        tracing::warn!(format, "invalid timestamp format, using default");
        self.at.format(DEFAULT_TIMESTAMP_FORMAT).to_string()
    }
}

/// Bounded chat history. Oldest entries are evicted first.
#[derive(Debug, Clone)]
pub struct Transcript {
    cap: usize,
    next_seq: u64,
    buf: VecDeque<TranscriptEntry>,
}

impl Transcript {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            cap,
            next_seq: 1,
            buf: VecDeque::with_capacity(cap.min(1_024)),
        }
    }

    pub fn append(&mut self, mut entry: TranscriptEntry) -> &TranscriptEntry {
        entry.seq = self.next_seq;
        self.next_seq += 1;

        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(entry);
        &self.buf[self.buf.len() - 1]
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.next_seq = 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &TranscriptEntry> {
        self.buf.iter()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.buf.back()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn render_plain(&self, timestamp_format: &str) -> String {
        self.buf
            .iter()
            .map(|entry| {
                format!(
                    "[{}] {}: {}",
                    entry.timestamp_label(timestamp_format),
                    entry.role.label(),
                    entry.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Everything one conversation needs. Hosts own one of these per chat.
#[derive(Debug, Clone)]
pub struct ChatSession {
    pub config: Config,
    pub dialog: DialogState,
    pub transcript: Transcript,
    pub input: String,
    pub notice: Option<String>,
    pub scroll: u16,
}

impl ChatSession {
    pub fn new(config: Config) -> Self {
        let transcript = Transcript::new(config.chat.transcript_capacity);
        Self {
            config,
            dialog: DialogState::idle(),
            transcript,
            input: String::new(),
            notice: None,
            scroll: 0,
        }
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

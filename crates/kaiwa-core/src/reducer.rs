use super::actions::quick_reply;
use super::actions::ChatAction;
use super::actions::ATTACHMENT_NOTICE;
use super::actions::GREETING;
use super::dialog::advance;
use super::dialog::DialogState;
use super::dialog::Topic;
use super::keywords::match_keywords;
use super::state::ChatSession;
use super::state::Role;
use super::state::TranscriptEntry;

pub const FALLBACK_REPLY: &str = "メッセージありがとうございます！\n「趣味」「仕事」「旅行」などの話題を含めてメッセージを送ると、3〜4ターンくらい会話が続くようになっています。\nもちろん、普通の雑談メッセージも歓迎です。";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEffect {
    Rendered(TranscriptEntry),
    Notice(String),
    RequestFrame,
    CopyToClipboard(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Keyword { rule_id: &'static str },
    /// `step` is the state after the turn; `Topic::None` marks a closing reply.
    Dialog { topic: Topic, step: u8 },
    Fallback,
}

impl ReplySource {
    pub fn label(self) -> &'static str {
        match self {
            Self::Keyword { .. } => "keyword",
            Self::Dialog { .. } => "dialog",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub reply: String,
    pub source: ReplySource,
}

/// Picks the reply for one trimmed, non-empty message.
///
/// Keyword rules always win and abandon any topic in progress. Otherwise
/// the topic flow gets the turn, and anything left gets the fallback.
pub fn decide_turn(state: &mut DialogState, text: &str) -> Decision {
    if let Some(rule) = match_keywords(text) {
        *state = DialogState::idle();
        tracing::debug!(rule = rule.id, "keyword rule matched, dialog reset");
        return Decision {
            reply: rule.reply.to_string(),
            source: ReplySource::Keyword { rule_id: rule.id },
        };
    }

    let (reply, next) = advance(text, *state);
    if let Some(reply) = reply {
        *state = next;
        tracing::debug!(topic = next.topic.label(), step = next.step, "dialog advanced");
        return Decision {
            reply,
            source: ReplySource::Dialog {
                topic: next.topic,
                step: next.step,
            },
        };
    }

    tracing::debug!("no rule or topic matched, using fallback");
    Decision {
        reply: FALLBACK_REPLY.to_string(),
        source: ReplySource::Fallback,
    }
}

pub fn decide(state: &mut DialogState, text: &str) -> String {
    decide_turn(state, text).reply
}

pub fn reduce(session: &mut ChatSession, action: ChatAction) -> Vec<ChatEffect> {
    match action {
        ChatAction::Open => {
            if !session.config.chat.show_greeting || !session.transcript.is_empty() {
                return Vec::new();
            }
            let entry = session
                .transcript
                .append(TranscriptEntry::new(Role::Bot, GREETING))
                .clone();
            vec![ChatEffect::Rendered(entry), ChatEffect::RequestFrame]
        }
        ChatAction::InputChar(c) => {
            session.input.push(c);
            vec![ChatEffect::RequestFrame]
        }
        ChatAction::InputBackspace => {
            session.input.pop();
            vec![ChatEffect::RequestFrame]
        }
        ChatAction::InputPaste(text) => {
            session.input.push_str(&text);
            vec![ChatEffect::RequestFrame]
        }
        ChatAction::Submit => {
            let text = session.input.trim().to_string();
            if text.is_empty() {
                return Vec::new();
            }
            session.input.clear();
            submit_turn(session, &text)
        }
        ChatAction::SubmitText(text) => {
            if text.trim().is_empty() {
                return Vec::new();
            }
            session.input = text;
            reduce(session, ChatAction::Submit)
        }
        ChatAction::QuickReply(index) => match quick_reply(index) {
            Some(item) => reduce(session, ChatAction::SubmitText(item.text.to_string())),
            None => Vec::new(),
        },
        ChatAction::Attach => {
            session.notice = Some(ATTACHMENT_NOTICE.to_string());
            vec![
                ChatEffect::Notice(ATTACHMENT_NOTICE.to_string()),
                ChatEffect::RequestFrame,
            ]
        }
        ChatAction::DismissNotice => {
            if session.notice.take().is_some() {
                vec![ChatEffect::RequestFrame]
            } else {
                Vec::new()
            }
        }
        ChatAction::ScrollUp => {
            session.scroll = session.scroll.saturating_add(1);
            vec![ChatEffect::RequestFrame]
        }
        ChatAction::ScrollDown => {
            session.scroll = session.scroll.saturating_sub(1);
            vec![ChatEffect::RequestFrame]
        }
        ChatAction::CopyTranscript => {
            let text = session
                .transcript
                .render_plain(&session.config.ui.timestamp_format);
            vec![ChatEffect::CopyToClipboard(text)]
        }
    }
}

fn submit_turn(session: &mut ChatSession, text: &str) -> Vec<ChatEffect> {
    let user = session
        .transcript
        .append(TranscriptEntry::new(Role::User, text))
        .clone();
    let decision = decide_turn(&mut session.dialog, text);
    tracing::info!(
        source = decision.source.label(),
        topic = session.dialog.topic.label(),
        step = session.dialog.step,
        "turn decided"
    );
    let bot = session
        .transcript
        .append(TranscriptEntry::new(Role::Bot, decision.reply))
        .clone();
    session.scroll = 0;
    vec![
        ChatEffect::Rendered(user),
        ChatEffect::Rendered(bot),
        ChatEffect::RequestFrame,
    ]
}

#[cfg(test)]
mod tests;

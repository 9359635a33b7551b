use pretty_assertions::assert_eq;

pub(super) use super::decide;
pub(super) use super::decide_turn;
pub(super) use super::reduce;
pub(super) use super::ChatEffect;
pub(super) use super::ReplySource;
pub(super) use super::FALLBACK_REPLY;
pub(super) use crate::actions::ChatAction;
pub(super) use crate::actions::ATTACHMENT_NOTICE;
pub(super) use crate::actions::GREETING;
pub(super) use crate::actions::QUICK_REPLIES;
pub(super) use crate::config::Config;
pub(super) use crate::dialog::script_for;
pub(super) use crate::dialog::DialogState;
pub(super) use crate::dialog::Topic;
pub(super) use crate::keywords::REPLY_RULES;
pub(super) use crate::state::ChatSession;
pub(super) use crate::state::Role;

mod progression;

fn session() -> ChatSession {
    ChatSession::new(Config::default())
}

fn at(topic: Topic, step: u8) -> DialogState {
    DialogState { topic, step }
}

fn rule_reply(id: &str) -> &'static str {
    REPLY_RULES
        .iter()
        .find(|rule| rule.id == id)
        .map(|rule| rule.reply)
        .expect("known rule id")
}

fn submit(session: &mut ChatSession, text: &str) -> Vec<ChatEffect> {
    reduce(session, ChatAction::SubmitText(text.to_string()))
}

fn last_bot_text(session: &ChatSession) -> &str {
    let entry = session.transcript.last().expect("transcript entry");
    assert_eq!(entry.role, Role::Bot);
    entry.text.as_str()
}

use std::io;
use std::io::BufRead;
use std::io::Write;

use kaiwa_core::actions::ChatAction;
use kaiwa_core::actions::QUICK_REPLIES;
use kaiwa_core::reducer::reduce;
use kaiwa_core::reducer::ChatEffect;
use kaiwa_core::state::ChatSession;
use kaiwa_core::state::Role;
use kaiwa_core::state::TranscriptEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Quit,
    Help,
    Action(ChatAction),
    Unknown(String),
}

/// Only the command words below are commands. Any other `/` line is sent
/// as a chat message.
fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return ReplCommand::Action(ChatAction::SubmitText(line.to_string()));
    };
    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit") | Some("exit"), None) => ReplCommand::Quit,
        (Some("help"), None) => ReplCommand::Help,
        (Some("attach"), None) => ReplCommand::Action(ChatAction::Attach),
        (Some("quick"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n >= 1 => ReplCommand::Action(ChatAction::QuickReply(n - 1)),
            _ => ReplCommand::Unknown(trimmed.to_string()),
        },
        (Some("quit" | "exit" | "help" | "attach" | "quick"), _) => {
            ReplCommand::Unknown(trimmed.to_string())
        }
        _ => ReplCommand::Action(ChatAction::SubmitText(line.to_string())),
    }
}

fn print_entry<W: Write>(out: &mut W, entry: &TranscriptEntry, format: &str) -> io::Result<()> {
    let speaker = match entry.role {
        Role::User => "you",
        Role::Bot => "bot",
    };
    let mut lines = entry.text.lines();
    let first = lines.next().unwrap_or_default();
    writeln!(out, "[{}] {speaker}: {first}", entry.timestamp_label(format))?;
    for line in lines {
        writeln!(out, "{:width$}{line}", "", width = speaker.len() + 10)?;
    }
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "commands: /quick <n>, /attach, /help, /quit")?;
    writeln!(out, "other lines, including /text, are sent as messages")?;
    for (idx, item) in QUICK_REPLIES.iter().enumerate() {
        writeln!(out, "  /quick {} -> {} ({})", idx + 1, item.label, item.text)?;
    }
    Ok(())
}

fn apply_effects<W: Write>(
    out: &mut W,
    session: &ChatSession,
    effects: Vec<ChatEffect>,
) -> io::Result<()> {
    for effect in effects {
        match effect {
            // User lines are already on screen as typed input.
            ChatEffect::Rendered(entry) if entry.role == Role::User => {}
            ChatEffect::Rendered(entry) => {
                print_entry(out, &entry, &session.config.ui.timestamp_format)?
            }
            ChatEffect::Notice(text) => writeln!(out, "! {text}")?,
            ChatEffect::CopyToClipboard(_) | ChatEffect::RequestFrame => {}
        }
    }
    out.flush()
}

pub fn run<R: BufRead, W: Write>(
    session: &mut ChatSession,
    input: R,
    mut out: W,
) -> io::Result<()> {
    let effects = reduce(session, ChatAction::Open);
    apply_effects(&mut out, session, effects)?;
    print_help(&mut out)?;

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Help => print_help(&mut out)?,
            ReplCommand::Unknown(command) => writeln!(out, "unknown command: {command}")?,
            ReplCommand::Action(action) => {
                let quick = matches!(action, ChatAction::QuickReply(_));
                let effects = reduce(session, action);
                if quick {
                    // Quick replies never passed through stdin, so echo them.
                    for effect in &effects {
                        if let ChatEffect::Rendered(entry) = effect {
                            if entry.role == Role::User {
                                print_entry(&mut out, entry, &session.config.ui.timestamp_format)?;
                            }
                        }
                    }
                }
                apply_effects(&mut out, session, effects)?;
            }
        }
    }
    tracing::debug!(entries = session.transcript.len(), "repl closed");
    Ok(())
}

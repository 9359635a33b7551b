use std::io;
use std::io::BufRead;
use std::io::Write;

use kaiwa_core::actions::ChatAction;
use kaiwa_core::dialog::Topic;
use kaiwa_core::reducer::reduce;
use kaiwa_core::reducer::ChatEffect;
use kaiwa_core::state::ChatSession;
use kaiwa_core::state::Role;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ReplayRecord<'a> {
    pub seq: u64,
    pub role: Role,
    pub text: &'a str,
    pub time: String,
    pub topic: Topic,
    pub step: u8,
}

/// Feeds each input line through the session as one turn and writes every
/// resulting transcript entry as a JSON line. Blank lines are skipped.
pub fn replay<R: BufRead, W: Write>(
    session: &mut ChatSession,
    input: R,
    mut out: W,
) -> io::Result<usize> {
    let mut turns = 0_usize;
    for line in input.lines() {
        let line = line?;
        let effects = reduce(session, ChatAction::SubmitText(line));
        if effects.is_empty() {
            continue;
        }
        turns += 1;
        for effect in effects {
            let ChatEffect::Rendered(entry) = effect else {
                continue;
            };
            let record = ReplayRecord {
                seq: entry.seq,
                role: entry.role,
                text: &entry.text,
                time: entry.timestamp_label(&session.config.ui.timestamp_format),
                topic: session.dialog.topic,
                step: session.dialog.step,
            };
            serde_json::to_writer(&mut out, &record)?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    tracing::info!(turns, "replay finished");
    Ok(turns)
}

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn hobby_flow_runs_four_turns_then_resets() {
    let mut state = DialogState::idle();
    let script = script_for(Topic::Hobby).expect("hobby");

    let first = decide_turn(&mut state, "趣味");
    assert_eq!(first.reply, script.opening);
    assert_eq!(state, at(Topic::Hobby, 1));

    let second = decide(&mut state, "釣り");
    assert_eq!(
        second,
        "「釣り」なんですね！\nその趣味はどのくらいの期間続けていますか？"
    );
    assert_eq!(state, at(Topic::Hobby, 2));

    let third = decide(&mut state, "10年くらいです");
    assert_eq!(third, script.deepen);
    assert_eq!(state, at(Topic::Hobby, 3));

    let fourth = decide_turn(&mut state, "大物が釣れた時");
    assert_eq!(fourth.reply, script.closing);
    assert_eq!(
        fourth.source,
        ReplySource::Dialog {
            topic: Topic::None,
            step: 0
        }
    );
    assert_eq!(state, DialogState::idle());
}

#[test]
fn work_follow_up_quotes_answer() {
    let mut state = DialogState::idle();
    decide(&mut state, "働いています");
    let reply = decide(&mut state, "看護師");
    assert_eq!(
        reply,
        "お仕事は「看護師」なんですね！\nその仕事の中で、特にやりがいを感じるのはどんなときですか？"
    );
}

#[test]
fn later_turns_ignore_entry_keywords() {
    let mut state = DialogState::idle();
    decide(&mut state, "旅行");
    // Mentions another topic, but the travel flow keeps the turn.
    let reply = decide(&mut state, "仕事で行った北海道");
    assert_eq!(
        reply,
        "「仕事で行った北海道」に関連した旅行なんですね！\nその場所で一番印象に残っている景色や体験は何ですか？"
    );
    assert_eq!(state, at(Topic::Travel, 2));
}

#[test]
fn closing_reply_allows_immediate_new_topic() {
    let mut state = at(Topic::Work, 3);
    decide(&mut state, "独立したい");
    assert_eq!(state, DialogState::idle());
    decide(&mut state, "趣味は？");
    assert_eq!(state, at(Topic::Hobby, 1));
}

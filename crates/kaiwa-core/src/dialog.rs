use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    None,
    Hobby,
    Work,
    Travel,
}

impl Topic {
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Hobby => "hobby",
            Self::Work => "work",
            Self::Travel => "travel",
        }
    }
}

pub const LAST_STEP: u8 = 3;

/// Position within a topic flow. `step == 0` exactly when `topic == Topic::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogState {
    pub topic: Topic,
    pub step: u8,
}

impl DialogState {
    pub const fn idle() -> Self {
        Self {
            topic: Topic::None,
            step: 0,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.topic == Topic::None
    }

    fn entered(topic: Topic) -> Self {
        Self { topic, step: 1 }
    }

    fn next_step(self) -> Self {
        Self {
            topic: self.topic,
            step: self.step + 1,
        }
    }
}

impl Default for DialogState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Three prompts and a closing message for one topic.
///
/// `opening` answers the entry message, `follow_up` answers the next turn
/// and quotes it, `deepen` answers the turn after that, and `closing` ends
/// the flow.
#[derive(Debug, Clone, Copy)]
pub struct TopicScript {
    pub topic: Topic,
    pub priority: u16,
    pub entry_keywords: &'static [&'static str],
    pub opening: &'static str,
    pub follow_up: fn(&str) -> String,
    pub deepen: &'static str,
    pub closing: &'static str,
}

impl TopicScript {
    pub fn is_triggered_by(&self, text: &str) -> bool {
        self.entry_keywords.iter().any(|keyword| text.contains(keyword))
    }
}

fn hobby_follow_up(text: &str) -> String {
    format!("「{text}」なんですね！\nその趣味はどのくらいの期間続けていますか？")
}

fn work_follow_up(text: &str) -> String {
    format!("お仕事は「{text}」なんですね！\nその仕事の中で、特にやりがいを感じるのはどんなときですか？")
}

fn travel_follow_up(text: &str) -> String {
    format!("「{text}」に関連した旅行なんですね！\nその場所で一番印象に残っている景色や体験は何ですか？")
}

// A message naming several topics starts the one with the lowest priority.
pub const TOPIC_SCRIPTS: [TopicScript; 3] = [
    TopicScript {
        topic: Topic::Hobby,
        priority: 10,
        entry_keywords: &["趣味", "好きなこと"],
        opening: "いいですね！まず教えてください。あなたの趣味は何ですか？",
        follow_up: hobby_follow_up,
        deepen: "続けていて良かったなと思う瞬間はどんな時ですか？",
        closing: "趣味の話を聞かせてくれてありがとうございました！\nまた別の話題（仕事・旅行など）も振ってみてください 😊",
    },
    TopicScript {
        topic: Topic::Work,
        priority: 20,
        entry_keywords: &["仕事", "会社", "働"],
        opening: "お仕事の話、ぜひ聞きたいです。どんな仕事をされていますか？",
        follow_up: work_follow_up,
        deepen: "今後、そのお仕事でチャレンジしてみたいことや目標はありますか？",
        closing: "お仕事の話、とても興味深かったです！\n気分転換に趣味や旅行の話もしてみませんか？",
    },
    TopicScript {
        topic: Topic::Travel,
        priority: 30,
        entry_keywords: &["旅行", "旅"],
        opening: "旅行の話、ワクワクしますね！最近行った場所や、行ってみたい場所はどこですか？",
        follow_up: travel_follow_up,
        deepen: "もし友だちにその旅行先をおすすめするとしたら、どんなところを推しますか？",
        closing: "旅行の思い出を共有してくれてありがとうございました！\nまた別の場所の話や、他の話題もぜひ聞かせてください ✈️",
    },
];

pub fn topic_scripts() -> &'static [TopicScript] {
    &TOPIC_SCRIPTS
}

pub fn script_for(topic: Topic) -> Option<&'static TopicScript> {
    match topic {
        Topic::None => None,
        Topic::Hobby => Some(&TOPIC_SCRIPTS[0]),
        Topic::Work => Some(&TOPIC_SCRIPTS[1]),
        Topic::Travel => Some(&TOPIC_SCRIPTS[2]),
    }
}

/// Lowest-priority script triggered by `text`; ties go to the earlier entry.
pub fn first_triggered<'a>(scripts: &'a [TopicScript], text: &str) -> Option<&'a TopicScript> {
    scripts
        .iter()
        .filter(|script| script.is_triggered_by(text))
        .min_by_key(|script| script.priority)
}

pub fn entry_topic(text: &str) -> Option<&'static TopicScript> {
    first_triggered(&TOPIC_SCRIPTS, text)
}

/// Runs one turn of the topic flow without touching any shared state.
///
/// Returns `None` only when no topic is active and `text` names none.
pub fn advance(text: &str, state: DialogState) -> (Option<String>, DialogState) {
    let Some(script) = script_for(state.topic) else {
        return match entry_topic(text) {
            Some(script) => (
                Some(script.opening.to_string()),
                DialogState::entered(script.topic),
            ),
            None => (None, state),
        };
    };

    match state.step {
        1 => (Some((script.follow_up)(text)), state.next_step()),
        2 => (Some(script.deepen.to_string()), state.next_step()),
        _ => (Some(script.closing.to_string()), DialogState::idle()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scripts_are_declared_in_priority_order() {
        let topics: Vec<Topic> = topic_scripts().iter().map(|s| s.topic).collect();
        assert_eq!(topics, vec![Topic::Hobby, Topic::Work, Topic::Travel]);
        assert!(topic_scripts()
            .windows(2)
            .all(|pair| pair[0].priority < pair[1].priority));
    }

    #[test]
    fn entry_order_follows_priority_field() {
        let mut scripts = TOPIC_SCRIPTS;
        scripts.reverse();
        let text = "旅行と仕事と趣味";
        assert_eq!(first_triggered(&scripts, text).map(|s| s.topic), Some(Topic::Hobby));

        scripts[0].priority = 1;
        assert_eq!(first_triggered(&scripts, text).map(|s| s.topic), Some(Topic::Travel));
    }

    #[test]
    fn script_lookup_matches_table_position() {
        for script in topic_scripts() {
            assert_eq!(script_for(script.topic).map(|s| s.topic), Some(script.topic));
        }
        assert!(script_for(Topic::None).is_none());
    }

    #[test]
    fn idle_without_entry_keyword_is_unchanged() {
        let (reply, next) = advance("こんばんは", DialogState::idle());
        assert_eq!(reply, None);
        assert_eq!(next, DialogState::idle());
    }

    #[test]
    fn entry_returns_opening_without_interpolation() {
        let (reply, next) = advance("会社の話をしよう", DialogState::idle());
        assert_eq!(
            reply.as_deref(),
            Some("お仕事の話、ぜひ聞きたいです。どんな仕事をされていますか？")
        );
        assert_eq!(
            next,
            DialogState {
                topic: Topic::Work,
                step: 1
            }
        );
    }

    #[test]
    fn follow_up_quotes_user_text_verbatim() {
        let state = DialogState {
            topic: Topic::Travel,
            step: 1,
        };
        let (reply, next) = advance("京都", state);
        assert_eq!(
            reply.as_deref(),
            Some("「京都」に関連した旅行なんですね！\nその場所で一番印象に残っている景色や体験は何ですか？")
        );
        assert_eq!(next.step, 2);
        assert_eq!(next.topic, Topic::Travel);
    }

    #[test]
    fn active_topic_ignores_other_entry_keywords() {
        let state = DialogState {
            topic: Topic::Hobby,
            step: 2,
        };
        let (reply, next) = advance("仕事も旅行も好き", state);
        assert_eq!(
            reply.as_deref(),
            Some("続けていて良かったなと思う瞬間はどんな時ですか？")
        );
        assert_eq!(
            next,
            DialogState {
                topic: Topic::Hobby,
                step: 3
            }
        );
    }

    #[test]
    fn step_three_closes_and_resets() {
        let state = DialogState {
            topic: Topic::Work,
            step: LAST_STEP,
        };
        let (reply, next) = advance("がんばります", state);
        assert_eq!(
            reply.as_deref(),
            Some("お仕事の話、とても興味深かったです！\n気分転換に趣味や旅行の話もしてみませんか？")
        );
        assert_eq!(next, DialogState::idle());
    }

    #[test]
    fn out_of_range_step_is_treated_as_closing() {
        let state = DialogState {
            topic: Topic::Hobby,
            step: 9,
        };
        let (_, next) = advance("x", state);
        assert_eq!(next, DialogState::idle());
    }

    #[test]
    fn multi_topic_message_picks_hobby_then_work_then_travel() {
        assert_eq!(entry_topic("仕事と旅行と趣味").map(|s| s.topic), Some(Topic::Hobby));
        assert_eq!(entry_topic("旅先で働く").map(|s| s.topic), Some(Topic::Work));
        assert_eq!(entry_topic("一人旅").map(|s| s.topic), Some(Topic::Travel));
    }
}

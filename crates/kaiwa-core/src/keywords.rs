/// A fixed keyword command. Matches when the message contains any keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyRule {
    pub id: &'static str,
    pub priority: u16,
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

impl ReplyRule {
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

// Lower `priority` wins when several rules match. Declared in that order.
pub const REPLY_RULES: [ReplyRule; 3] = [
    ReplyRule {
        id: "greeting",
        priority: 10,
        keywords: &["こんにちは", "こんちゃ", "やあ"],
        reply: "こんにちは！Chatです。\nあらかじめ用意した文章で、簡単なデモチャットができます。",
    },
    ReplyRule {
        id: "introduction",
        priority: 20,
        keywords: &["自己紹介", "誰", "あなたは"],
        reply: "私はデモ用のチャットボットです。\nこのサンプルでは、あらかじめ決めたルールで会話を返しています。",
    },
    ReplyRule {
        id: "capabilities",
        priority: 30,
        keywords: &["機能", "何ができる", "できること"],
        reply: "今はシンプルに、決めておいたキーワードや会話フローに従って返事をしています。\n「趣味」「仕事」「旅行」などの話題を含めて話しかけると、3〜4ターンくらい会話が続くようになっています。",
    },
];

pub fn reply_rules() -> &'static [ReplyRule] {
    &REPLY_RULES
}

/// Lowest-priority matching rule; ties go to the earlier entry.
pub fn first_match<'a>(rules: &'a [ReplyRule], text: &str) -> Option<&'a ReplyRule> {
    rules
        .iter()
        .filter(|rule| rule.matches(text))
        .min_by_key(|rule| rule.priority)
}

pub fn match_keywords(text: &str) -> Option<&'static ReplyRule> {
    let rule = first_match(&REPLY_RULES, text);
    tracing::trace!(matched = rule.map(|rule| rule.id), "keyword scan");
    rule
}

pub fn match_reply(text: &str) -> Option<&'static str> {
    match_keywords(text).map(|rule| rule.reply)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rules_are_declared_in_priority_order() {
        let priorities: Vec<u16> = reply_rules().iter().map(|rule| rule.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn every_rule_has_keywords() {
        for rule in reply_rules() {
            assert!(!rule.keywords.is_empty(), "{} has no keywords", rule.id);
            assert!(rule.keywords.iter().all(|keyword| !keyword.is_empty()));
        }
    }

    #[test]
    fn any_keyword_of_a_rule_matches_as_substring() {
        assert_eq!(match_keywords("やあ、元気？").map(|r| r.id), Some("greeting"));
        assert_eq!(match_keywords("あなたは誰ですか").map(|r| r.id), Some("introduction"));
        assert_eq!(match_keywords("何ができるの？").map(|r| r.id), Some("capabilities"));
    }

    #[test]
    fn earlier_rule_shadows_later_rule() {
        // Contains both a greeting and a capabilities keyword.
        let rule = match_keywords("こんにちは、機能を教えて").expect("match");
        assert_eq!(rule.id, "greeting");
    }

    #[test]
    fn priority_decides_regardless_of_table_position() {
        let mut rules = REPLY_RULES;
        rules.reverse();
        let rule = first_match(&rules, "こんにちは、機能を教えて").expect("match");
        assert_eq!(rule.id, "greeting");

        rules[0].priority = 1;
        let rule = first_match(&rules, "こんにちは、機能を教えて").expect("match");
        assert_eq!(rule.id, "capabilities");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(ReplyRule {
            id: "t",
            priority: 0,
            keywords: &["Hello"],
            reply: "",
        }
        .matches("Hello there"));
        assert!(!ReplyRule {
            id: "t",
            priority: 0,
            keywords: &["Hello"],
            reply: "",
        }
        .matches("hello there"));
    }

    #[test]
    fn unmatched_text_yields_none() {
        assert_eq!(match_reply("今日はいい天気ですね"), None);
    }
}

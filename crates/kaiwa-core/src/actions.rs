#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    /// Conversation window opened; posts the greeting when enabled.
    Open,
    InputChar(char),
    InputBackspace,
    InputPaste(String),
    Submit,
    SubmitText(String),
    QuickReply(usize),
    Attach,
    DismissNotice,
    ScrollUp,
    ScrollDown,
    CopyTranscript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickReply {
    pub label: &'static str,
    pub text: &'static str,
}

pub const QUICK_REPLIES: [QuickReply; 4] = [
    QuickReply {
        label: "趣味",
        text: "趣味の話をしたい",
    },
    QuickReply {
        label: "仕事",
        text: "仕事の話をしたい",
    },
    QuickReply {
        label: "旅行",
        text: "旅行の話をしたい",
    },
    QuickReply {
        label: "機能",
        text: "何ができるの？",
    },
];

pub fn quick_reply(index: usize) -> Option<&'static QuickReply> {
    QUICK_REPLIES.get(index)
}

pub const GREETING: &str =
    "こんにちは！Chatです。\n下の Quick Replies から話題を選ぶか、メッセージを入力して送信してみてください。";

pub const ATTACHMENT_NOTICE: &str = "ファイル添付機能はまだ実装していません（ダミーボタンです）";

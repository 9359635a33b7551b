use std::io;

use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Terminal;

use kaiwa_core::actions::{ChatAction, QUICK_REPLIES};
use kaiwa_core::config::UiTheme;
use kaiwa_core::dialog::LAST_STEP;
use kaiwa_core::reducer::{reduce, ChatEffect};
use kaiwa_core::state::{ChatSession, Role};

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableBracketedPaste,
            crossterm::cursor::Show
        );
    }
}

pub fn run(session: &mut ChatSession) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let _guard = TuiGuard; // Restores the terminal on exit or panic

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, session).map_err(|e| e.into())
}

enum KeyHandlerResult {
    Continue(Vec<ChatEffect>),
    Exit,
}

fn handle_key_event(key: event::KeyEvent, session: &mut ChatSession) -> KeyHandlerResult {
    if key.kind != KeyEventKind::Press {
        return KeyHandlerResult::Continue(Vec::new());
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let action = match key.code {
        KeyCode::Char('c') if ctrl => return KeyHandlerResult::Exit,
        KeyCode::Esc if session.notice.is_none() => return KeyHandlerResult::Exit,
        KeyCode::Esc => ChatAction::DismissNotice,
        KeyCode::Char('a') if ctrl => ChatAction::Attach,
        KeyCode::Char('y') if ctrl => ChatAction::CopyTranscript,
        KeyCode::Char(_) if ctrl => return KeyHandlerResult::Continue(Vec::new()),
        KeyCode::Char(c) => ChatAction::InputChar(c),
        KeyCode::Backspace => ChatAction::InputBackspace,
        KeyCode::Enter => ChatAction::Submit,
        KeyCode::F(n @ 1..=9) => ChatAction::QuickReply(usize::from(n) - 1),
        KeyCode::Up | KeyCode::PageUp => ChatAction::ScrollUp,
        KeyCode::Down | KeyCode::PageDown => ChatAction::ScrollDown,
        _ => return KeyHandlerResult::Continue(Vec::new()),
    };
    KeyHandlerResult::Continue(reduce(session, action))
}

fn apply_effects(session: &mut ChatSession, effects: Vec<ChatEffect>) {
    for effect in effects {
        match effect {
            ChatEffect::CopyToClipboard(text) => {
                let copied =
                    arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
                session.notice = Some(match copied {
                    Ok(()) => "会話をクリップボードにコピーしました".to_string(),
                    Err(err) => {
                        tracing::warn!(error = %err, "clipboard copy failed");
                        format!("コピーできませんでした: {err}")
                    }
                });
            }
            ChatEffect::Rendered(entry) => {
                tracing::debug!(seq = entry.seq, role = entry.role.label(), "rendered");
            }
            // The next loop iteration redraws from session state.
            ChatEffect::Notice(_) | ChatEffect::RequestFrame => {}
        }
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, session: &mut ChatSession) -> io::Result<()> {
    let effects = reduce(session, ChatAction::Open);
    apply_effects(session, effects);

    loop {
        terminal.draw(|f| ui(f, session))?;

        // One event is reduced to completion before the next is read, so
        // turns apply in the order they were typed.
        let effects = match event::read()? {
            Event::Key(key) => match handle_key_event(key, session) {
                KeyHandlerResult::Continue(effects) => effects,
                KeyHandlerResult::Exit => return Ok(()),
            },
            Event::Paste(text) => reduce(session, ChatAction::InputPaste(text.replace('\n', " "))),
            _ => Vec::new(),
        };
        apply_effects(session, effects);
    }
}

#[derive(Clone, Copy)]
struct UiPalette {
    accent: Color,
    user: Color,
    bot: Color,
    warning: Color,
    muted: Color,
    border: Color,
}

fn palette_for(theme: UiTheme) -> UiPalette {
    match theme {
        UiTheme::Classic => UiPalette {
            accent: Color::Cyan,
            user: Color::LightBlue,
            bot: Color::Green,
            warning: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::Gray,
        },
        UiTheme::Mono => UiPalette {
            accent: Color::White,
            user: Color::White,
            bot: Color::Gray,
            warning: Color::White,
            muted: Color::DarkGray,
            border: Color::DarkGray,
        },
    }
}

fn build_transcript_lines(session: &ChatSession, palette: UiPalette) -> Vec<Line<'static>> {
    let format = session.config.ui.timestamp_format.as_str();
    let mut out = Vec::new();
    for entry in session.transcript.iter() {
        let (alignment, color) = match entry.role {
            Role::User => (Alignment::Right, palette.user),
            Role::Bot => (Alignment::Left, palette.bot),
        };
        for text in entry.text.split('\n') {
            out.push(
                Line::from(Span::styled(text.to_string(), Style::default().fg(color)))
                    .alignment(alignment),
            );
        }
        out.push(
            Line::from(Span::styled(
                entry.timestamp_label(format),
                Style::default().fg(palette.muted),
            ))
            .alignment(alignment),
        );
        out.push(Line::from(""));
    }
    out
}

fn wrapped_height(lines: &[Line<'_>], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn dialog_label(session: &ChatSession) -> String {
    if session.dialog.is_idle() {
        "-".to_string()
    } else {
        format!(
            "{} ({}/{})",
            session.dialog.topic.label(),
            session.dialog.step,
            LAST_STEP
        )
    }
}

fn ui(f: &mut ratatui::Frame, session: &ChatSession) {
    let palette = palette_for(session.config.ui.theme);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Transcript
            Constraint::Length(3), // Quick replies
            Constraint::Length(3), // Input
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    let header = Paragraph::new(format!(
        "kaiwa | Topic:{} | Theme:{}",
        dialog_label(session),
        session.config.ui.theme.label()
    ))
    .style(Style::default().fg(palette.accent))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );
    f.render_widget(header, chunks[0]);

    render_transcript(f, chunks[1], session, palette);
    render_quick_replies(f, chunks[2], palette);

    let input = Paragraph::new(session.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title("Message (Enter to send)"),
    );
    f.render_widget(input, chunks[3]);
    let typed = Line::from(session.input.as_str()).width();
    let max_x = chunks[3].width.saturating_sub(2);
    let cursor_x = u16::try_from(typed).unwrap_or(u16::MAX).min(max_x);
    f.set_cursor_position((chunks[3].x + 1 + cursor_x, chunks[3].y + 1));

    let footer = match session.notice.as_deref() {
        Some(notice) => Line::from(Span::styled(
            format!("{notice}  (Esc to dismiss)"),
            Style::default()
                .fg(palette.warning)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            "F1-F4 quick reply | Ctrl+A attach | Ctrl+Y copy | PgUp/PgDn scroll | Esc quit",
            Style::default().fg(palette.muted),
        )),
    };
    f.render_widget(Paragraph::new(footer), chunks[4]);
}

fn render_transcript(
    f: &mut ratatui::Frame,
    area: Rect,
    session: &ChatSession,
    palette: UiPalette,
) {
    let lines = build_transcript_lines(session, palette);
    let inner_w = area.width.saturating_sub(2);
    let inner_h = area.height.saturating_sub(2);
    let bottom = wrapped_height(&lines, inner_w).saturating_sub(inner_h);
    let scroll = bottom.saturating_sub(session.scroll);

    let transcript = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title("Chat"),
        );
    f.render_widget(transcript, area);
}

fn render_quick_replies(f: &mut ratatui::Frame, area: Rect, palette: UiPalette) {
    let mut spans = Vec::new();
    for (idx, item) in QUICK_REPLIES.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            format!("F{}", idx + 1),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", item.label)));
    }
    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title("Quick Replies"),
    );
    f.render_widget(bar, area);
}

// Prompt line below the grid: rename / add-player input, otherwise the
// last notice from the application task.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::protocol::NoticeLevel;
use crate::tui::{Prompt, ViewState};

/// Render the prompt zone into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (title, line) = match &state.prompt {
        Some(prompt) => (prompt_title(state, prompt), input_line(prompt)),
        None => (String::from(" Messages "), notice_line(state)),
    };

    let border_color = if state.prompt.is_some() {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Block title naming what the prompt edits.
pub fn prompt_title(state: &ViewState, prompt: &Prompt) -> String {
    match prompt {
        Prompt::Rename { index, .. } => match state.snapshot.players.get(*index) {
            Some(name) => format!(" Rename {} ", name),
            None => String::from(" Rename "),
        },
        Prompt::AddPlayer { .. } => String::from(" Add player (empty for default name) "),
    }
}

fn input_line(prompt: &Prompt) -> Line<'static> {
    let buffer = match prompt {
        Prompt::Rename { buffer, .. } | Prompt::AddPlayer { buffer } => buffer,
    };
    Line::from(vec![
        Span::raw("> "),
        Span::styled(buffer.clone(), Style::default().fg(Color::Yellow)),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ])
}

fn notice_line(state: &ViewState) -> Line<'static> {
    match &state.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => Color::Green,
                NoticeLevel::Error => Color::Red,
            };
            Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
        }
        None => Line::from(""),
    }
}

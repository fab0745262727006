// Score entry dialog.
//
// Centered overlay showing the pair being edited and the draft text. The
// draft is sent to the application task exactly as typed.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::centered_rect;
use crate::tui::ScoreEditor;

const DIALOG_WIDTH: u16 = 40;
const DIALOG_HEIGHT: u16 = 7;

/// Render the score dialog centered on `area`.
pub fn render(frame: &mut Frame, area: Rect, editor: &ScoreEditor) {
    let dialog_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Result ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let lines = vec![
        Line::from(vec![
            Span::styled(
                editor.player_a.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" vs "),
            Span::styled(
                editor.player_b.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("Score: "),
            Span::styled(editor.draft.clone(), Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::from(Span::styled(
            "format: for - against",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, dialog_area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// Status bar widget: title, table size, selected pair.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [title] | [players / results] | [selected pair and result]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snapshot = &state.snapshot;
    let mut spans = vec![
        Span::styled(
            format!(" {} ", snapshot.title),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(Color::Gray)),
        Span::styled(counts_label(state), Style::default().fg(Color::White)),
    ];

    if let Some(label) = selection_label(state) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(label, Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// E.g. "4 players, 1 result".
pub fn counts_label(state: &ViewState) -> String {
    let players = state.snapshot.players.len();
    let results = state.snapshot.results.pair_count();
    format!(
        "{} player{}, {} result{}",
        players,
        if players == 1 { "" } else { "s" },
        results,
        if results == 1 { "" } else { "s" },
    )
}

/// E.g. "PlayerA vs PlayerC: 3 - 2", `None` on an empty grid.
pub fn selection_label(state: &ViewState) -> Option<String> {
    let (row, col) = state.selected_pair()?;
    if state.on_diagonal() {
        return Some(row.to_string());
    }
    Some(match state.selected_result() {
        Some(result) => format!("{} vs {}: {}", row, col, result),
        None => format!("{} vs {}: not played", row, col),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

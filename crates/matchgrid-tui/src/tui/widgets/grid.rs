// Results grid widget: one row and one column per player.
//
// Row i, column j shows player i's result against player j from player i's
// side. The diagonal is drawn but never editable. When the grid is larger
// than the panel, a window of rows and columns follows the cursor.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::tui::ViewState;
use matchgrid_core::GridCell;

/// Bounds for the player-name column.
const MIN_NAME_WIDTH: u16 = 6;
const MAX_NAME_WIDTH: u16 = 16;

/// Bounds for each opponent column. Names are cut at `MAX_HEADER_WIDTH`;
/// scores may widen the column up to `MAX_CELL_WIDTH`, which fits
/// `"4294967295 - 4294967295"`.
const MIN_CELL_WIDTH: u16 = 7;
const MAX_HEADER_WIDTH: u16 = 12;
const MAX_CELL_WIDTH: u16 = 23;

/// Render the results grid into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let snapshot = &state.snapshot;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", snapshot.title));

    let players = &snapshot.players;
    if players.is_empty() {
        let paragraph = Paragraph::new("No players. Press a to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let name_width = column_width(players.iter(), MIN_NAME_WIDTH, MAX_NAME_WIDTH);
    let cell_width = score_column_width(state);

    // Borders take two columns/rows, the header one row.
    let inner_width = area.width.saturating_sub(2);
    let column_capacity =
        (inner_width.saturating_sub(name_width + 1) / (cell_width + 1)).max(1) as usize;
    let row_capacity = area.height.saturating_sub(3).max(1) as usize;

    let (col_start, col_end) = visible_window(state.cursor_col, players.len(), column_capacity);
    let (row_start, row_end) = visible_window(state.cursor_row, players.len(), row_capacity);

    let header_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let mut header_cells = vec![Cell::from("")];
    for (col, name) in players.iter().enumerate().take(col_end).skip(col_start) {
        let style = if col == state.cursor_col {
            header_style.fg(Color::Yellow)
        } else {
            header_style
        };
        header_cells.push(Cell::from(truncate(name, cell_width)).style(style));
    }
    let header = Row::new(header_cells).style(header_style);

    let rows: Vec<Row> = (row_start..row_end)
        .map(|row| {
            let name_style = if row == state.cursor_row {
                header_style.fg(Color::Yellow)
            } else {
                header_style
            };
            let mut cells = vec![Cell::from(truncate(&players[row], name_width)).style(name_style)];
            for col in col_start..col_end {
                let content = snapshot.cell(row, col).unwrap_or(GridCell::Unplayed);
                let selected = row == state.cursor_row && col == state.cursor_col;
                cells.push(
                    Cell::from(truncate(&cell_text(&content), cell_width))
                        .style(cell_style(&content, selected)),
                );
            }
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(name_width)];
    widths.extend(std::iter::repeat(Constraint::Length(cell_width)).take(col_end - col_start));

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

/// Text shown in a grid cell.
pub fn cell_text(cell: &GridCell) -> String {
    match cell {
        GridCell::Diagonal => "╲".to_string(),
        GridCell::Played(result) => result.to_string(),
        GridCell::Unplayed => "-".to_string(),
    }
}

fn cell_style(cell: &GridCell, selected: bool) -> Style {
    let base = match cell {
        GridCell::Diagonal => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
        GridCell::Played(_) => Style::default().fg(Color::Green),
        GridCell::Unplayed => Style::default().fg(Color::Gray),
    };
    if selected {
        base.add_modifier(Modifier::REVERSED)
    } else {
        base
    }
}

/// Half-open range `[start, end)` of at most `capacity` indices out of
/// `total` that contains `cursor`, scrolled as little as possible.
pub fn visible_window(cursor: usize, total: usize, capacity: usize) -> (usize, usize) {
    let capacity = capacity.max(1);
    if total <= capacity {
        return (0, total);
    }
    let cursor = cursor.min(total - 1);
    let start = (cursor + 1).saturating_sub(capacity);
    (start, start + capacity)
}

/// Width of the opponent columns: wide enough for every header name (up to
/// `MAX_HEADER_WIDTH`) and every stored score (up to `MAX_CELL_WIDTH`).
fn score_column_width(state: &ViewState) -> u16 {
    let header = column_width(state.snapshot.players.iter(), MIN_CELL_WIDTH, MAX_HEADER_WIDTH);
    let longest_score = state
        .snapshot
        .results
        .iter()
        .map(|(_, _, result)| result.to_string().chars().count())
        .max()
        .unwrap_or(0);
    header.max(longest_score.min(MAX_CELL_WIDTH as usize) as u16)
}

fn column_width<'a>(names: impl Iterator<Item = &'a String>, min: u16, max: u16) -> u16 {
    let longest = names.map(|n| n.chars().count()).max().unwrap_or(0);
    (longest.min(max as usize) as u16).max(min)
}

/// Cut `name` to `width` characters, marking the cut with `…`.
fn truncate(name: &str, width: u16) -> String {
    let width = width as usize;
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut out: String = name.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

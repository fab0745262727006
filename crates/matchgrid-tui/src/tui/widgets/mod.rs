// TUI widget modules for each screen zone.

pub mod grid;
pub mod prompt;
pub mod quit_confirm;
pub mod score_modal;
pub mod status_bar;

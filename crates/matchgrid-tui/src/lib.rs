// Library root: exposes the modules so integration tests can drive the
// application task and the TUI state without a terminal.

pub mod app;
pub mod config;
pub mod protocol;
pub mod tui;

//! Terminal UI: a scrolling command log with a single input line.

mod app;
mod events;
mod theme;

pub use app::run_tui;

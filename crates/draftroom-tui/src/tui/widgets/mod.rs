// TUI widget modules for each dashboard panel.

pub mod available;
pub mod draft_log;
pub mod exposure_bar;
pub mod picks_bar;
pub mod quit_confirm;
pub mod status_bar;

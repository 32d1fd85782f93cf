// Library root: re-exports the terminal app's modules so integration tests
// can drive the app loop and render the dashboard.

pub mod app;
pub mod protocol;
pub mod tui;

// Library root for the dashboard binary: exposes the terminal UI so
// integration tests can drive it through the public API.

pub mod tui;

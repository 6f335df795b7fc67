//! This module contains the interactive terminal user interface.
pub mod event;
pub mod log_entry;
pub mod log_view;
pub mod mode;
pub mod runner;
pub mod state;
pub mod terminal;

pub use event::UIEvent;
pub use log_entry::LogEntry;
pub use log_view::LogView;
pub use mode::UIMode;
pub use runner::run_tui;
pub use state::UIState;
pub use terminal::TerminalUI;

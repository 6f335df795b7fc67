mod input;
mod logs;

use std::collections::VecDeque;

use tracing::Level;

pub use input::LineInput;

use super::{log_entry::LogEntry, mode::UIMode};

/// Default number of log entries kept for the log view.
pub const MAX_LOG_ENTRIES: usize = 10_000;

/// View state that is not owned by the command engine.
#[derive(Debug)]
pub struct UIState {
    pub mode: UIMode,
    pub last_log_mode: Option<UIMode>,
    pub logs: VecDeque<LogEntry>,
    /// Scrollback rows hidden below the bottom of the view.
    pub scroll_offset: usize,
    pub log_scroll_offset: usize,
    pub horizontal_scroll_offset: usize,
    pub is_at_bottom_log: bool,
    /// Input line of the log view. The terminal's input lives in the engine.
    pub log_input: LineInput,
    pub terminal_size: (u16, u16),
    pub max_log_entries: usize,
    pub should_quit: bool,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            mode: UIMode::default(),
            last_log_mode: None,
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
            scroll_offset: 0,
            log_scroll_offset: 0,
            horizontal_scroll_offset: 0,
            is_at_bottom_log: true,
            log_input: LineInput::default(),
            terminal_size: (80, 24),
            max_log_entries: MAX_LOG_ENTRIES,
            should_quit: false,
        }
    }

    /// Switches between the terminal and the log view, remembering the log
    /// view's filter and level.
    pub fn toggle_mode(&mut self) {
        self.mode = match &self.mode {
            UIMode::Terminal => match self.last_log_mode.take() {
                Some(mode @ UIMode::Logs { .. }) => mode,
                _ => UIMode::Logs {
                    filter: None,
                    level: Level::DEBUG,
                },
            },
            UIMode::Logs { .. } => {
                self.last_log_mode = Some(self.mode.clone());
                UIMode::Terminal
            }
        };

        self.scroll_offset = 0;
        self.log_scroll_offset = 0;
        self.is_at_bottom_log = true;
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(rows);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(rows);
    }

    pub fn jump_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }

    /// Keeps `scroll_offset` within `total_rows` rows shown `visible_rows` at a time.
    pub fn clamp_scroll(&mut self, total_rows: usize, visible_rows: usize) {
        let max_scroll = total_rows.saturating_sub(visible_rows);
        self.scroll_offset = self.scroll_offset.min(max_scroll);
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_remembers_log_settings() {
        let mut state = UIState::new();
        state.toggle_mode();
        state.mode = UIMode::Logs {
            filter: Some("engine".into()),
            level: Level::WARN,
        };

        state.toggle_mode();
        assert_eq!(state.mode, UIMode::Terminal);

        state.toggle_mode();
        assert_eq!(
            state.mode,
            UIMode::Logs {
                filter: Some("engine".into()),
                level: Level::WARN,
            }
        );
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut state = UIState::new();
        state.scroll_up(50);
        state.clamp_scroll(30, 20);
        assert_eq!(state.scroll_offset, 10);

        state.clamp_scroll(5, 20);
        assert_eq!(state.scroll_offset, 0);
    }
}

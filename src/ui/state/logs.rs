use tracing::Level;

use crate::ui::{log_entry::LogEntry, mode::UIMode};

use super::UIState;

impl UIState {
    /// Appends flushed entries, keeping the view pinned unless the user scrolled up.
    pub fn add_log_batch(&mut self, entries: Vec<LogEntry>) {
        let added = entries.len();
        for entry in entries {
            if self.logs.len() >= self.max_log_entries {
                self.logs.pop_front();
            }
            self.logs.push_back(entry);
        }

        if matches!(self.mode, UIMode::Logs { .. }) && !self.is_at_bottom_log {
            self.log_scroll_offset = self.log_scroll_offset.saturating_add(added);
            self.update_log_scroll_state(self.terminal_size.1 as usize);
        }
    }

    pub fn refresh_logs(&mut self) {
        if matches!(self.mode, UIMode::Logs { .. }) {
            self.jump_to_bottom_log();
        }
    }

    pub fn clear_logs(&mut self) {
        self.logs.clear();
        self.jump_to_bottom_log();
    }

    pub fn set_log_level(&mut self, new_level: Level) {
        if let UIMode::Logs { level, .. } = &mut self.mode {
            *level = new_level;
        }
    }

    pub fn set_log_filter(&mut self, new_filter: Option<String>) {
        if let UIMode::Logs { filter, .. } = &mut self.mode {
            *filter = new_filter;
        }
    }

    pub fn scroll_logs(&mut self, up: bool, rows: usize) {
        self.log_scroll_offset = if up {
            self.log_scroll_offset.saturating_add(rows)
        } else {
            self.log_scroll_offset.saturating_sub(rows)
        };
        self.update_log_scroll_state(self.terminal_size.1 as usize);
    }

    pub fn update_log_scroll_state(&mut self, terminal_height: usize) {
        let total = self.filtered_logs().len();
        let visible = terminal_height.saturating_sub(3);
        self.log_scroll_offset = self.log_scroll_offset.min(total.saturating_sub(visible));
        self.is_at_bottom_log = self.log_scroll_offset == 0;
    }

    pub fn jump_to_bottom_log(&mut self) {
        self.log_scroll_offset = 0;
        self.is_at_bottom_log = true;
    }

    /// Entries passing the log view's level and filter.
    pub fn filtered_logs(&self) -> Vec<&LogEntry> {
        let UIMode::Logs { filter, level } = &self.mode else {
            return self.logs.iter().collect();
        };

        self.logs
            .iter()
            .filter(|entry| entry.level <= *level)
            .filter(|entry| match filter.as_deref() {
                None => true,
                Some(f) => match f.strip_prefix('-') {
                    Some(excluded) => !entry.module.contains(excluded),
                    None => entry.module.contains(f) || entry.message.contains(f),
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(level: Level, module: &str, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level,
            module: module.to_string(),
            message: message.to_string(),
        }
    }

    fn state_with_logs() -> UIState {
        let mut state = UIState::new();
        state.toggle_mode();
        state.add_log_batch(vec![
            entry(Level::DEBUG, "engine", "Dispatching 'echo'"),
            entry(Level::INFO, "engine", "Theme changed"),
            entry(Level::WARN, "opener", "Could not open"),
        ]);
        state
    }

    #[test]
    fn level_hides_more_verbose_entries() {
        let mut state = state_with_logs();
        assert_eq!(state.filtered_logs().len(), 3);
        state.set_log_level(Level::INFO);
        assert_eq!(state.filtered_logs().len(), 2);
    }

    #[test]
    fn filter_includes_or_excludes() {
        let mut state = state_with_logs();
        state.set_log_filter(Some("opener".into()));
        assert_eq!(state.filtered_logs().len(), 1);

        state.set_log_filter(Some("-engine".into()));
        assert_eq!(state.filtered_logs().len(), 1);
        assert_eq!(state.filtered_logs()[0].module, "opener");

        state.set_log_filter(Some("Theme".into()));
        assert_eq!(state.filtered_logs()[0].message, "Theme changed");
    }

    #[test]
    fn oldest_entries_are_dropped_at_capacity() {
        let mut state = UIState::new();
        state.max_log_entries = 2;
        state.add_log_batch(vec![
            entry(Level::INFO, "a", "1"),
            entry(Level::INFO, "a", "2"),
            entry(Level::INFO, "a", "3"),
        ]);
        let messages: Vec<_> = state.logs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["2", "3"]);
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::Recall;
use crate::ui::UIState;

use super::LogView;

const PAGE: usize = 10;
const HORIZONTAL_STEP: usize = 10;

impl LogView {
    /// Handles a key press while the log view is shown.
    pub fn handle_key(&mut self, state: &mut UIState, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => {
                if state.log_input.is_blank() {
                    return;
                }
                let input = state.log_input.take();
                self.history.push(input.as_str());
                self.execute_command(&input, state);
            }
            KeyCode::Char(c) => {
                state.log_input.insert_char(c);
                self.history.reset_cursor();
            }
            KeyCode::Backspace => {
                if state.log_input.remove_before() {
                    self.history.reset_cursor();
                }
            }
            KeyCode::Delete => {
                state.log_input.remove_at();
            }
            KeyCode::Left => state.log_input.left(),
            KeyCode::Right => state.log_input.right(),
            KeyCode::Home if ctrl => {
                state.horizontal_scroll_offset =
                    state.horizontal_scroll_offset.saturating_sub(HORIZONTAL_STEP);
            }
            KeyCode::End if ctrl => {
                state.horizontal_scroll_offset =
                    state.horizontal_scroll_offset.saturating_add(HORIZONTAL_STEP);
            }
            KeyCode::Home => state.log_input.home(),
            KeyCode::End => state.log_input.end(),
            KeyCode::Up if ctrl => self.recall(state, true),
            KeyCode::Down if ctrl => self.recall(state, false),
            KeyCode::Up => state.scroll_logs(true, 1),
            KeyCode::Down => state.scroll_logs(false, 1),
            KeyCode::PageUp => state.scroll_logs(true, PAGE),
            KeyCode::PageDown => state.scroll_logs(false, PAGE),
            KeyCode::Esc => state.jump_to_bottom_log(),
            _ => {}
        }
    }

    fn recall(&mut self, state: &mut UIState, older: bool) {
        let recall = if older {
            self.history.previous()
        } else {
            self.history.next()
        };
        match recall {
            Recall::Entry(entry) => state.log_input.set(entry),
            Recall::Exhausted => state.log_input.set(""),
            Recall::Unchanged => {}
        }
    }
}

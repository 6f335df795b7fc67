use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::ui::UIEvent;

use super::TerminalUI;

const PAGE: usize = 10;

impl TerminalUI {
    /// Handles a key press while the command terminal is shown.
    pub(super) fn handle_terminal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.engine.insert_char(c);
            }
            KeyCode::Backspace => self.engine.backspace(),
            KeyCode::Delete => self.engine.delete(),
            KeyCode::Left => self.engine.cursor_left(),
            KeyCode::Right => self.engine.cursor_right(),
            KeyCode::Home => self.engine.cursor_home(),
            KeyCode::End => self.engine.cursor_end(),
            KeyCode::Up => self.engine.history_previous(),
            KeyCode::Down => self.engine.history_next(),
            KeyCode::Tab => {
                self.engine.complete();
            }
            KeyCode::PageUp => self.state.scroll_up(PAGE),
            KeyCode::PageDown => self.state.scroll_down(PAGE),
            KeyCode::Esc => self.state.jump_to_bottom(),
            _ => {}
        }
    }

    /// Dispatches the input line and runs its handler on a separate task.
    ///
    /// The handler reports back through `UIEvent::CommandFinished`.
    fn submit(&mut self) {
        match self.engine.begin_submit() {
            Ok(Some(pending)) => {
                let event_tx = self.event_tx.clone();
                tokio::spawn(async move {
                    let outcome = pending.await;
                    if event_tx.send(UIEvent::CommandFinished(outcome)).is_err() {
                        debug!("UI closed before command finished");
                    }
                });
            }
            Ok(None) => {}
            Err(e) => debug!("Submission ignored: {}", e),
        }
        self.state.jump_to_bottom();
    }
}

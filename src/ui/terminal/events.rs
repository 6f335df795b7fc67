use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ui::{UIEvent, UIMode};

use super::TerminalUI;

impl TerminalUI {
    pub(super) async fn handle_event(&mut self, event: UIEvent) -> Result<()> {
        self.engine.pump();
        match event {
            UIEvent::NewLogBatch(entries) => self.state.add_log_batch(entries),
            UIEvent::RefreshLogs => self.state.refresh_logs(),
            UIEvent::KeyPress(key) => self.handle_key_event(key),
            UIEvent::Resize(width, height) => self.state.terminal_size = (width, height),
            UIEvent::CommandFinished(outcome) => {
                self.engine.finish(outcome)?;
                self.state.jump_to_bottom();
            }
        }

        self.persist_theme().await;
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::F(9), _) | (KeyCode::Char('l'), KeyModifiers::CONTROL) => {
                self.toggle_mode();
                return;
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.state.should_quit = true;
                return;
            }
            _ => {}
        }

        let old_level = match &self.state.mode {
            UIMode::Terminal => {
                self.handle_terminal_key(key);
                return;
            }
            UIMode::Logs { level, .. } => *level,
        };

        self.log_view.handle_key(&mut self.state, key);
        if let UIMode::Logs { level, .. } = &self.state.mode {
            if *level != old_level {
                if let Some(log_buffer) = &self.log_buffer {
                    log_buffer.set_display_level(*level);
                }
            }
        }
    }

    fn toggle_mode(&mut self) {
        self.state.toggle_mode();
        if let (Some(log_buffer), UIMode::Logs { level, .. }) = (&self.log_buffer, &self.state.mode)
        {
            log_buffer.set_display_level(*level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{handler_fn, CommandEngine, CommandOutput, CommandSpec, EngineOptions};
    use crate::ports::{MemoryPreferenceStore, PreferenceStore};
    use crate::theme::Theme;
    use crossterm::event::KeyEvent;
    use std::sync::Arc;
    use tokio::sync::{mpsc, Notify};

    fn ui() -> TerminalUI {
        let engine = CommandEngine::new(
            EngineOptions::default().with_opener(|_: &str| -> anyhow::Result<()> { Ok(()) }),
        );
        let (tx, rx) = mpsc::unbounded_channel();
        TerminalUI::new(engine, tx, rx)
    }

    fn key(code: KeyCode) -> UIEvent {
        UIEvent::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    async fn type_line(ui: &mut TerminalUI, line: &str) {
        for c in line.chars() {
            ui.handle_event(key(KeyCode::Char(c))).await.unwrap();
        }
        ui.handle_event(key(KeyCode::Enter)).await.unwrap();
    }

    async fn deliver_next(ui: &mut TerminalUI) {
        let event = ui.event_rx.recv().await.unwrap();
        ui.handle_event(event).await.unwrap();
    }

    #[tokio::test]
    async fn enter_runs_the_command_in_the_background() {
        let mut ui = ui();
        type_line(&mut ui, "echo hi").await;
        assert!(ui.engine.is_running());
        assert_eq!(ui.engine.input(), "");

        deliver_next(&mut ui).await;
        assert!(!ui.engine.is_running());
        assert_eq!(ui.engine.scrollback(), ["$ echo hi", "hi"]);
    }

    #[tokio::test]
    async fn output_from_a_leftover_task_shows_up_while_idle() {
        let release = Arc::new(Notify::new());
        let printed = Arc::new(Notify::new());
        let (gate, done) = (release.clone(), printed.clone());
        let watch = CommandSpec::new(
            "watch",
            "prints once released",
            handler_fn(move |_, ctx| {
                let (gate, done) = (gate.clone(), done.clone());
                async move {
                    tokio::spawn(async move {
                        gate.notified().await;
                        ctx.print("late line");
                        done.notify_one();
                    });
                    Ok(CommandOutput::line("watching"))
                }
            }),
        );
        let engine = CommandEngine::new(EngineOptions::default().with_command(watch));
        let (tx, rx) = mpsc::unbounded_channel();
        let mut ui = TerminalUI::new(engine, tx, rx);

        type_line(&mut ui, "watch").await;
        deliver_next(&mut ui).await;
        assert!(!ui.engine.is_running());

        release.notify_one();
        printed.notified().await;
        ui.handle_event(UIEvent::Resize(80, 24)).await.unwrap();

        assert_eq!(ui.engine.scrollback(), ["$ watch", "watching", "late line"]);
    }

    #[tokio::test]
    async fn theme_changes_are_saved() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let mut ui = ui();
        ui.set_preferences(store.clone());

        type_line(&mut ui, "theme light").await;
        deliver_next(&mut ui).await;

        assert_eq!(ui.engine.theme(), Theme::Light);
        assert_eq!(store.load_theme().await.unwrap(), Some(Theme::Light));
    }

    #[tokio::test]
    async fn arrows_and_tab_drive_history_and_completion() {
        let mut ui = ui();
        type_line(&mut ui, "date").await;
        deliver_next(&mut ui).await;

        ui.handle_event(key(KeyCode::Up)).await.unwrap();
        assert_eq!(ui.engine.input(), "date");
        ui.handle_event(key(KeyCode::Down)).await.unwrap();
        assert_eq!(ui.engine.input(), "");

        ui.handle_event(key(KeyCode::Char('w'))).await.unwrap();
        ui.handle_event(key(KeyCode::Tab)).await.unwrap();
        assert_eq!(ui.engine.input(), "whoami");
    }

    #[tokio::test]
    async fn f9_switches_to_logs_and_ctrl_c_quits() {
        let mut ui = ui();
        ui.handle_event(key(KeyCode::F(9))).await.unwrap();
        assert!(matches!(ui.state.mode, UIMode::Logs { .. }));

        ui.handle_event(key(KeyCode::Char('x'))).await.unwrap();
        assert_eq!(ui.state.log_input.text(), "x");
        assert_eq!(ui.engine.input(), "");

        ui.handle_event(UIEvent::KeyPress(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )))
        .await
        .unwrap();
        assert!(ui.state.should_quit);
    }
}

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::engine::CommandEngine;
use crate::logging::LogBuffer;
use crate::ports::PreferenceStore;
use crate::theme::Theme;
use crate::ui::{LogView, UIEvent, UIState};

/// How often queued handler output is pulled in between UI events.
const PUMP_INTERVAL: Duration = Duration::from_millis(50);

pub struct TerminalUI {
    pub(super) state: UIState,
    pub(super) engine: CommandEngine,
    pub(super) log_view: LogView,
    pub(super) event_tx: mpsc::UnboundedSender<UIEvent>,
    pub(super) event_rx: mpsc::UnboundedReceiver<UIEvent>,
    pub(super) log_buffer: Option<Arc<LogBuffer>>,
    pub(super) preferences: Option<Arc<dyn PreferenceStore>>,
    pub(super) saved_theme: Theme,
    pub(super) terminal_active: bool,
}

impl TerminalUI {
    pub fn new(
        engine: CommandEngine,
        event_tx: mpsc::UnboundedSender<UIEvent>,
        event_rx: mpsc::UnboundedReceiver<UIEvent>,
    ) -> Self {
        let saved_theme = engine.theme();
        Self {
            state: UIState::new(),
            engine,
            log_view: LogView::new(),
            event_tx,
            event_rx,
            log_buffer: None,
            preferences: None,
            saved_theme,
            terminal_active: false,
        }
    }

    pub fn set_log_buffer(&mut self, log_buffer: Arc<LogBuffer>) {
        self.log_buffer = Some(log_buffer);
    }

    /// Theme changes are saved to `preferences` as they happen.
    pub fn set_preferences(&mut self, preferences: Arc<dyn PreferenceStore>) {
        self.preferences = Some(preferences);
    }

    pub fn engine(&self) -> &CommandEngine {
        &self.engine
    }

    pub fn state(&self) -> &UIState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<()> {
        self.initialize_terminal()?;
        self.render()?;

        debug!("Starting terminal UI loop");
        let mut pump = tokio::time::interval(PUMP_INTERVAL);

        while !self.state.should_quit {
            let redraw = tokio::select! {
                event = self.event_rx.recv() => match event {
                    Some(event) => {
                        if let Err(e) = self.handle_event(event).await {
                            error!("Error handling UI event: {}", e);
                        }
                        true
                    }
                    None => {
                        self.state.should_quit = true;
                        false
                    }
                },
                _ = pump.tick() => self.engine.pump(),
            };

            if redraw {
                self.persist_theme().await;
                self.render()?;
            }
        }

        debug!("Terminal UI loop finished");
        Ok(())
    }

    /// Saves the engine's theme if it changed since the last save.
    pub(super) async fn persist_theme(&mut self) {
        let theme = self.engine.theme();
        if theme == self.saved_theme {
            return;
        }
        self.saved_theme = theme;

        if let Some(preferences) = &self.preferences {
            if let Err(e) = preferences.save_theme(theme).await {
                warn!("Could not save theme preference: {:#}", e);
            }
        }
    }
}

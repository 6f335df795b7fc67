//! This module starts the interactive terminal.
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::CommandEngine;
use crate::logging::{LogBuffer, TUILogCollector};
use crate::ports::PreferenceStore;

use super::state::MAX_LOG_ENTRIES;
use super::{TerminalUI, UIEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Runs the full-screen terminal around `engine` until the user exits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn.
pub async fn run_tui(engine: CommandEngine, preferences: Arc<dyn PreferenceStore>) -> Result<()> {
    let log_buffer = Arc::new(LogBuffer::new(MAX_LOG_ENTRIES));
    if let Err(e) = TUILogCollector::init_subscriber(log_buffer.clone()) {
        debug!("Failed to initialize TUI log collector: {}", e);
    }

    let (ui_event_tx, ui_event_rx) = mpsc::unbounded_channel::<UIEvent>();
    log_buffer.set_ui_sender(ui_event_tx.clone());

    info!("Starting folio-term");

    let mut terminal_ui = TerminalUI::new(engine, ui_event_tx.clone(), ui_event_rx);
    terminal_ui.set_log_buffer(log_buffer);
    terminal_ui.set_preferences(preferences);

    // crossterm polling blocks, so it gets its own thread.
    tokio::task::spawn_blocking(move || {
        while !ui_event_tx.is_closed() {
            if !event::poll(POLL_INTERVAL).unwrap_or(false) {
                continue;
            }

            let event = match event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => UIEvent::KeyPress(key),
                Ok(Event::Resize(width, height)) => UIEvent::Resize(width, height),
                Ok(_) => continue,
                Err(e) => {
                    debug!("Failed to read terminal event: {}", e);
                    continue;
                }
            };

            if ui_event_tx.send(event).is_err() {
                break;
            }
        }
        debug!("Terminal event reader stopped");
    });

    let result = terminal_ui.run().await;
    terminal_ui.cleanup()?;
    result
}

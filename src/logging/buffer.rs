//! This module provides the buffer between the `tracing` layer and the UI.
//!
//! Entries are kept in a bounded ring. Entries at or above the display level
//! are also queued and flushed to the UI in batches every 100ms.
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::Level;

use crate::ui::{LogEntry, UIEvent};

const BATCH_INTERVAL: Duration = Duration::from_millis(100);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A bounded store of log entries that forwards new ones to the UI.
pub struct LogBuffer {
    entries: Mutex<VecDeque<LogEntry>>,
    max_size: usize,
    ui_sender: Mutex<Option<mpsc::UnboundedSender<UIEvent>>>,
    display_level: Mutex<Level>,
    pending: Arc<Mutex<Vec<LogEntry>>>,
    flushing: Arc<AtomicBool>,
}

impl LogBuffer {
    /// Creates a buffer keeping at most `max_size` entries.
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_size)),
            max_size,
            ui_sender: Mutex::new(None),
            display_level: Mutex::new(Level::DEBUG),
            pending: Arc::new(Mutex::new(Vec::new())),
            flushing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn set_ui_sender(&self, sender: mpsc::UnboundedSender<UIEvent>) {
        *lock(&self.ui_sender) = Some(sender);
    }

    /// Stores `entry` and queues it for the UI if it passes the display level.
    pub fn add_entry(&self, entry: LogEntry) {
        {
            let mut entries = lock(&self.entries);
            if entries.len() >= self.max_size {
                entries.pop_front();
            }
            entries.push_back(entry.clone());
        }

        if entry.level <= *lock(&self.display_level) {
            lock(&self.pending).push(entry);
            self.start_flusher_if_needed();
        }
    }

    /// Every stored entry, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        lock(&self.entries).iter().cloned().collect()
    }

    pub fn display_level(&self) -> Level {
        *lock(&self.display_level)
    }

    /// Changes which entries are forwarded and asks the UI to re-filter.
    pub fn set_display_level(&self, level: Level) {
        *lock(&self.display_level) = level;
        self.notify(UIEvent::RefreshLogs);
    }

    fn notify(&self, event: UIEvent) {
        if let Some(sender) = lock(&self.ui_sender).as_ref() {
            let _ = sender.send(event);
        }
    }

    fn start_flusher_if_needed(&self) {
        let Some(sender) = lock(&self.ui_sender).clone() else {
            return;
        };
        // Logs emitted outside the runtime stay pending until the next one inside it.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        if self.flushing.swap(true, Ordering::AcqRel) {
            return;
        }

        let pending = self.pending.clone();
        let flushing = self.flushing.clone();
        runtime.spawn(async move {
            let mut timer = tokio::time::interval(BATCH_INTERVAL);
            timer.tick().await;

            loop {
                timer.tick().await;

                let batch: Vec<LogEntry> = lock(&pending).drain(..).collect();
                if batch.is_empty() {
                    continue;
                }
                if sender.send(UIEvent::NewLogBatch(batch)).is_err() {
                    break;
                }
            }

            flushing.store(false, Ordering::Release);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn entry(level: Level, message: &str) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level,
            module: "engine".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn keeps_at_most_max_size_entries() {
        let buffer = LogBuffer::new(2);
        buffer.add_entry(entry(Level::INFO, "one"));
        buffer.add_entry(entry(Level::INFO, "two"));
        buffer.add_entry(entry(Level::INFO, "three"));

        let messages: Vec<_> = buffer.snapshot().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[tokio::test]
    async fn batches_reach_the_ui() {
        let buffer = LogBuffer::new(10);
        let (tx, mut rx) = mpsc::unbounded_channel();
        buffer.set_ui_sender(tx);
        buffer.set_display_level(Level::INFO);
        assert!(matches!(rx.recv().await, Some(UIEvent::RefreshLogs)));

        buffer.add_entry(entry(Level::TRACE, "hidden"));
        buffer.add_entry(entry(Level::WARN, "shown"));

        match rx.recv().await {
            Some(UIEvent::NewLogBatch(batch)) => {
                assert_eq!(batch.len(), 1);
                assert_eq!(batch[0].message, "shown");
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert_eq!(buffer.snapshot().len(), 2);
    }
}

//! This module provides the `tracing` layer that feeds the `LogBuffer`.
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    Layer,
};

use super::{env_filter, LogBuffer};
use crate::ui::LogEntry;

/// A `tracing` layer that turns events into `LogEntry`s.
pub struct TUILogCollector {
    buffer: Arc<LogBuffer>,
}

impl TUILogCollector {
    pub fn new(buffer: Arc<LogBuffer>) -> Self {
        Self { buffer }
    }

    /// Installs the collector as the global subscriber.
    ///
    /// Nothing is written to the console while the TUI owns the screen.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already set.
    pub fn init_subscriber(
        buffer: Arc<LogBuffer>,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter("folio_term=debug,info"))
            .with(TUILogCollector::new(buffer));

        tracing::subscriber::set_global_default(subscriber)?;
        Ok(())
    }
}

impl<S> Layer<S> for TUILogCollector
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        // Last path segment only, e.g. `engine` for `folio_term::engine`.
        let module = metadata
            .module_path()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or_else(|| metadata.target())
            .to_string();

        self.buffer.add_entry(LogEntry {
            timestamp: Utc::now(),
            level: *metadata.level(),
            module,
            message,
        });
    }
}

/// Collects the `message` field plus any other fields as `key=value`.
struct MessageVisitor<'a>(&'a mut String);

impl MessageVisitor<'_> {
    fn push_field(&mut self, field: &Field, value: impl fmt::Display) {
        if !self.0.is_empty() {
            self.0.push(' ');
        }
        self.0.push_str(&format!("{}={}", field.name(), value));
    }
}

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let rest = std::mem::take(self.0);
            *self.0 = format!("{:?}", value);
            if !rest.is_empty() {
                self.0.push(' ');
                self.0.push_str(&rest);
            }
        } else {
            self.push_field(field, format!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.record_debug(field, &format_args!("{}", value));
        } else {
            self.push_field(field, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn events_land_in_the_buffer() {
        let buffer = Arc::new(LogBuffer::new(10));
        let subscriber =
            tracing_subscriber::registry().with(TUILogCollector::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(command = "theme", "Theme changed to {}", "dark");
        });

        let entries = buffer.snapshot();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::WARN);
        assert_eq!(entries[0].message, "Theme changed to dark command=theme");
        assert_eq!(entries[0].module, "tests");
    }
}

use std::io::Write;

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use tracing::Level;

use crate::ui::UIState;

use super::LogView;

fn level_color(level: Level) -> Color {
    match level {
        Level::ERROR => Color::Red,
        Level::WARN => Color::Yellow,
        Level::INFO => Color::Blue,
        Level::DEBUG => Color::White,
        Level::TRACE => Color::DarkGrey,
    }
}

impl LogView {
    /// Draws the filtered log entries into `area` (x, y, width, height).
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `stdout` fails.
    pub fn render(
        &self,
        stdout: &mut impl Write,
        state: &UIState,
        area: (u16, u16, u16, u16),
    ) -> Result<()> {
        let (x, y, width, height) = area;
        let width = width as usize;

        let logs = state.filtered_logs();
        let visible = height as usize;
        let end = logs.len().saturating_sub(state.log_scroll_offset);
        let start = end.saturating_sub(visible);

        for (row, entry) in logs[start..end].iter().enumerate() {
            let line = format!(
                "{} {:5} [{}] {}",
                entry
                    .timestamp
                    .with_timezone(&chrono::Local)
                    .format("%H:%M:%S%.3f"),
                entry.level.as_str(),
                entry.module,
                entry.message
            );

            let mut shown: String = line.chars().skip(state.horizontal_scroll_offset).collect();
            if shown.chars().count() > width {
                shown = shown.chars().take(width.saturating_sub(3)).collect();
                shown.push_str("...");
            }

            queue!(
                stdout,
                cursor::MoveTo(x, y + row as u16),
                SetForegroundColor(level_color(entry.level)),
                Print(shown),
                ResetColor
            )?;
        }

        if state.log_scroll_offset > 0 {
            let marker = format!("↑ +{} more", state.log_scroll_offset);
            let column = width.saturating_sub(marker.chars().count()) as u16;
            queue!(
                stdout,
                cursor::MoveTo(x + column, y),
                SetForegroundColor(Color::Yellow),
                Print(marker),
                ResetColor
            )?;
        }

        if state.horizontal_scroll_offset > 0 {
            queue!(
                stdout,
                cursor::MoveTo(x, y),
                SetForegroundColor(Color::Yellow),
                Print(format!("← +{}", state.horizontal_scroll_offset)),
                ResetColor
            )?;
        }

        Ok(())
    }
}

use std::io::{stdout, Write};

use anyhow::Result;
use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::engine::{Phase, Suggestion, PROMPT};
use crate::ui::UIMode;

use super::palette::Palette;
use super::TerminalUI;

const LOG_PROMPT: &str = "log> ";

/// Splits `line` into rows at most `width` columns wide.
///
/// An empty line still takes one row.
pub(super) fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for c in line.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }

    rows.push(current);
    rows
}

fn fit(text: &str, width: usize) -> String {
    let mut fitted = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        fitted.push(c);
        used += w;
    }
    fitted
}

impl TerminalUI {
    pub(super) fn render(&mut self) -> Result<()> {
        let mut stdout = stdout();
        let palette = Palette::for_theme(self.engine.theme());
        let background = match self.state.mode {
            UIMode::Terminal => palette.background,
            UIMode::Logs { .. } => Color::Reset,
        };

        queue!(
            stdout,
            SetBackgroundColor(background),
            Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;

        let (width, height) = self.state.terminal_size;
        let area_height = height.saturating_sub(3);
        let status_row = area_height;
        let input_row = area_height + 1;

        match &self.state.mode {
            UIMode::Terminal => {
                self.render_scrollback(&mut stdout, &palette, (0, 0, width, area_height))?
            }
            UIMode::Logs { .. } => {
                self.log_view
                    .render(&mut stdout, &self.state, (0, 0, width, area_height))?;
            }
        }

        self.render_status_line(&mut stdout, &palette, status_row, width)?;
        self.render_input_area(&mut stdout, &palette, input_row, width, background)?;

        stdout.flush()?;
        Ok(())
    }

    fn render_scrollback(
        &mut self,
        stdout: &mut impl Write,
        palette: &Palette,
        area: (u16, u16, u16, u16),
    ) -> Result<()> {
        let (x, y, width, height) = area;

        let rows: Vec<(String, Color)> = self
            .engine
            .scrollback()
            .iter()
            .flat_map(|line| {
                let color = palette.line_color(line);
                wrap(line, width as usize)
                    .into_iter()
                    .map(move |row| (row, color))
            })
            .collect();

        let visible = height as usize;
        self.state.clamp_scroll(rows.len(), visible);

        let end = rows.len() - self.state.scroll_offset;
        let start = end.saturating_sub(visible);

        for (offset, (row, color)) in rows[start..end].iter().enumerate() {
            queue!(
                stdout,
                cursor::MoveTo(x, y + offset as u16),
                SetForegroundColor(*color),
                Print(row)
            )?;
        }

        if self.state.scroll_offset > 0 {
            let marker = format!("↓ {} more", self.state.scroll_offset);
            let column = (width as usize).saturating_sub(marker.chars().count()) as u16;
            queue!(
                stdout,
                cursor::MoveTo(x + column, y + height.saturating_sub(1)),
                SetForegroundColor(palette.hint),
                Print(marker)
            )?;
        }

        Ok(())
    }

    fn render_status_line(
        &self,
        stdout: &mut impl Write,
        palette: &Palette,
        row: u16,
        width: u16,
    ) -> Result<()> {
        let status = match &self.state.mode {
            UIMode::Terminal => {
                let phase = match self.engine.phase() {
                    Phase::Idle => "ready".to_string(),
                    Phase::Running { command } => format!("running {}", command),
                };
                format!(
                    " folio-term | theme: {} | {} | history: {}/{} | F9: logs | Ctrl+C: exit",
                    self.engine.theme(),
                    phase,
                    self.engine.history().len(),
                    self.engine.history().max_size()
                )
            }
            UIMode::Logs { filter, level } => {
                let filter = filter
                    .as_ref()
                    .map(|f| format!(" | filter: {}", f))
                    .unwrap_or_default();
                format!(
                    " logs | level: {}{} | entries: {} | F9: terminal",
                    level,
                    filter,
                    self.state.logs.len()
                )
            }
        };

        let shown = fit(&status, width as usize);
        let padding = (width as usize).saturating_sub(UnicodeWidthStr::width(shown.as_str()));

        queue!(
            stdout,
            cursor::MoveTo(0, row),
            SetBackgroundColor(palette.status_bg),
            SetForegroundColor(palette.status_fg),
            Print(shown),
            Print(" ".repeat(padding)),
            ResetColor
        )?;
        Ok(())
    }

    fn render_input_area(
        &self,
        stdout: &mut impl Write,
        palette: &Palette,
        row: u16,
        width: u16,
        background: Color,
    ) -> Result<()> {
        let (prompt, input, cursor_pos) = match &self.state.mode {
            UIMode::Terminal => (PROMPT, self.engine.input(), self.engine.cursor_pos()),
            UIMode::Logs { .. } => (
                LOG_PROMPT,
                self.state.log_input.text(),
                self.state.log_input.cursor(),
            ),
        };

        queue!(
            stdout,
            cursor::MoveTo(0, row),
            SetBackgroundColor(background),
            SetForegroundColor(palette.prompt),
            Print(prompt),
            SetForegroundColor(palette.text),
            Print(input)
        )?;

        let at_end = cursor_pos == input.chars().count();
        if matches!(self.state.mode, UIMode::Terminal) && at_end {
            if let Some(hint) = self.engine.suggestion().hint(input) {
                queue!(stdout, SetForegroundColor(palette.hint), Print(hint))?;
            }
        }

        let help = match (&self.state.mode, self.engine.suggestion()) {
            (UIMode::Terminal, Suggestion::Ambiguous(_)) => {
                format!(" {}", self.engine.suggestion().text().unwrap_or_default())
            }
            (UIMode::Terminal, _) => {
                " Tab: complete | ↑↓: history | PgUp/PgDn: scroll | Esc: bottom".to_string()
            }
            (UIMode::Logs { .. }, _) => {
                " level <lvl> | filter [text] | clear | tail <n> | ↑↓: scroll | Ctrl+↑↓: history"
                    .to_string()
            }
        };
        queue!(
            stdout,
            cursor::MoveTo(0, row + 1),
            SetForegroundColor(palette.hint),
            Print(fit(&help, width as usize))
        )?;

        let cursor_x = UnicodeWidthStr::width(prompt)
            + input
                .chars()
                .take(cursor_pos)
                .map(|c| UnicodeWidthChar::width(c).unwrap_or(0))
                .sum::<usize>();
        if cursor_x < width as usize {
            queue!(stdout, cursor::MoveTo(cursor_x as u16, row), cursor::Show)?;
        }

        queue!(stdout, ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_splits_on_display_width() {
        assert_eq!(wrap("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap("", 4), vec![""]);
        assert_eq!(wrap("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn fit_truncates_to_width() {
        assert_eq!(fit("status line", 6), "status");
        assert_eq!(fit("ok", 6), "ok");
    }
}

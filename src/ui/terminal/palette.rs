use crossterm::style::Color;

use crate::engine::PROMPT;
use crate::theme::Theme;

/// Colours used to draw the terminal in a given theme.
#[derive(Debug, Clone, Copy)]
pub(super) struct Palette {
    pub background: Color,
    pub text: Color,
    pub echo: Color,
    pub prompt: Color,
    pub error: Color,
    pub hint: Color,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Holo => Self {
                background: Color::Rgb { r: 4, g: 12, b: 24 },
                text: Color::Rgb { r: 150, g: 230, b: 255 },
                echo: Color::Rgb { r: 255, g: 120, b: 230 },
                prompt: Color::Cyan,
                error: Color::Rgb { r: 255, g: 90, b: 110 },
                hint: Color::DarkCyan,
                status_bg: Color::Rgb { r: 20, g: 40, b: 70 },
                status_fg: Color::Cyan,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                echo: Color::Green,
                prompt: Color::Green,
                error: Color::Red,
                hint: Color::DarkGrey,
                status_bg: Color::DarkGrey,
                status_fg: Color::White,
            },
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                echo: Color::DarkBlue,
                prompt: Color::DarkBlue,
                error: Color::DarkRed,
                hint: Color::Grey,
                status_bg: Color::Grey,
                status_fg: Color::Black,
            },
        }
    }

    /// Colour for one scrollback line.
    pub fn line_color(&self, line: &str) -> Color {
        if line.starts_with(PROMPT) {
            self.echo
        } else if line.starts_with("error: ") || line.starts_with("command not found: ") {
            self.error
        } else {
            self.text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_and_errors_stand_out() {
        let palette = Palette::for_theme(Theme::Dark);
        assert_eq!(palette.line_color("$ help"), Color::Green);
        assert_eq!(palette.line_color("error: boom"), Color::Red);
        assert_eq!(palette.line_color("command not found: x. Type 'help' for available commands."), Color::Red);
        assert_eq!(palette.line_color("Available commands:"), Color::White);
    }
}

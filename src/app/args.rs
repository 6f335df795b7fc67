use std::path::PathBuf;

use clap::Parser;

use crate::theme::Theme;

#[derive(Parser, Debug, Clone)]
#[command(name = "folio-term")]
#[command(about = "The portfolio's command terminal")]
pub struct AppArgs {
    #[arg(long, help = "Config file path (JSON)")]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "data", help = "Directory for saved preferences")]
    pub data_dir: PathBuf,

    #[arg(long, help = "Start with this theme (holo, dark or light)")]
    pub theme: Option<Theme>,

    #[arg(long, help = "Number of history entries to keep")]
    pub history_size: Option<usize>,

    #[arg(long, help = "Read commands from stdin and print output instead of the TUI")]
    pub script: bool,
}

impl AppArgs {
    pub fn from_cli() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = AppArgs::parse_from([
            "folio-term",
            "--theme",
            "light",
            "--history-size",
            "3",
            "--script",
        ]);
        assert_eq!(args.theme, Some(Theme::Light));
        assert_eq!(args.history_size, Some(3));
        assert!(args.script);
        assert_eq!(args.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn rejects_unknown_theme() {
        assert!(AppArgs::try_parse_from(["folio-term", "--theme", "neon"]).is_err());
    }
}

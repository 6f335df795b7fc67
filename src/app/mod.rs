pub mod args;
mod client;
mod headless;
mod setup;

pub use args::AppArgs;
pub use headless::ScrollbackPrinter;

use anyhow::Result;

pub async fn launch() -> Result<()> {
    launch_with_args(AppArgs::from_cli()).await
}

pub async fn launch_with_args(args: AppArgs) -> Result<()> {
    let setup::PreparedApp {
        args,
        config,
        theme,
        preferences,
    } = setup::prepare(args).await?;

    if args.script {
        headless::run(config, theme, preferences).await
    } else {
        client::run(config, theme, preferences).await
    }
}

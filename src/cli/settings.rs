use std::path::{Path, PathBuf};

use clap::Subcommand;
use menuplan::{Config, Theme};
use time::OffsetDateTime;

#[derive(Subcommand)]
pub enum ThemeCommand {
    /// Print the current theme
    Get,
    /// Change the theme (default, green, blue, purple, orange, ocean)
    Set { theme: Theme },
}

#[tracing::instrument(skip_all)]
pub async fn theme(config: Config, command: ThemeCommand) -> anyhow::Result<()> {
    let mut planner = super::open_planner(&config).await?;

    match command {
        ThemeCommand::Get => println!("{}", planner.theme()),
        ThemeCommand::Set { theme } => {
            planner.set_theme(theme).await?;
            println!("{theme}");
        }
    }

    Ok(())
}

#[tracing::instrument(skip(config))]
pub async fn export(config: Config, output: Option<PathBuf>) -> anyhow::Result<()> {
    let planner = super::open_planner(&config).await?;
    let export = planner.export(OffsetDateTime::now_utc().date())?;

    let path = output.unwrap_or_else(|| Path::new(&config.planner.export_dir).join(&export.file_name));
    tokio::fs::write(&path, export.text).await?;

    tracing::info!(path = %path.display(), "weekly menu exported");
    println!("{}", path.display());

    Ok(())
}

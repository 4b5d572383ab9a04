use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

use cli::plan::{IngredientCommand, MealCommand, SlotCommand};
use cli::settings::ThemeCommand;
use cli::shopping::ShoppingCommand;
use cli::template::TemplateCommand;

/// menuplan - Weekly meal planner
#[derive(Parser)]
#[command(name = "menuplan")]
#[command(about = "Weekly meal planning with a reusable shopping list", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Meal names and the weekly overview
    Meal {
        #[command(subcommand)]
        command: MealCommand,
    },
    /// Ingredients of a meal
    Ingredient {
        #[command(subcommand)]
        command: IngredientCommand,
    },
    /// Custom slots of a day
    Slot {
        #[command(subcommand)]
        command: SlotCommand,
    },
    /// Shopping list
    Shopping {
        #[command(subcommand)]
        command: ShoppingCommand,
    },
    /// Saved weeks
    Template {
        #[command(subcommand)]
        command: TemplateCommand,
    },
    /// Colour theme preference
    Theme {
        #[command(subcommand)]
        command: ThemeCommand,
    },
    /// Write the weekly menu and ingredient summary to a text file
    Export {
        /// Output file (defaults to planner.export_dir/Daftar_Menu_<date>.txt)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = menuplan::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    menuplan::observability::init_observability(
        "menuplan",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    let result = match cli.command {
        Commands::Migrate => migrate_command(config).await,
        Commands::Meal { command } => cli::plan::meal(config, command).await,
        Commands::Ingredient { command } => cli::plan::ingredient(config, command).await,
        Commands::Slot { command } => cli::plan::slot(config, command).await,
        Commands::Shopping { command } => cli::shopping::shopping(config, command).await,
        Commands::Template { command } => cli::template::template(config, command).await,
        Commands::Theme { command } => cli::settings::theme(config, command).await,
        Commands::Export { output } => cli::settings::export(config, output).await,
    };

    let Err(err) = result else {
        return Ok(());
    };

    match err.downcast_ref::<menuplan_shared::Error>() {
        Some(planner_err) if planner_err.is_user_facing() => {
            eprintln!("{planner_err}");
            if matches!(planner_err, menuplan_shared::Error::ConfirmationRequired(_)) {
                eprintln!("nothing changed, rerun with --yes to proceed");
            }

            std::process::exit(2);
        }
        _ => {
            tracing::error!(error = %err, "command failed");
            Err(err)
        }
    }
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: menuplan::Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    let pool =
        menuplan::db::create_pool(&config.database.url, config.database.max_connections).await?;
    menuplan::db::migrate(&pool).await?;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

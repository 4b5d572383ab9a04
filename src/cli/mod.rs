pub mod plan;
pub mod settings;
pub mod shopping;
pub mod template;

use menuplan::{Config, Planner};

/// Connect, migrate and load the planner state
pub async fn open_planner(config: &Config) -> anyhow::Result<Planner> {
    let pool = menuplan::db::connect(&config.database.url, config.database.max_connections).await?;
    let planner = Planner::load(menuplan_db::Storage::new(pool)).await?;

    Ok(planner)
}

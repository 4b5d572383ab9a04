//! Shared setup for planner integration tests

#![allow(dead_code)]

use std::path::Path;

use menuplan::Planner;
use menuplan_db::Storage;

/// Migrated storage backed by a SQLite file at `path`
pub async fn setup_storage(path: &Path) -> anyhow::Result<Storage> {
    let url = format!("sqlite:{}", path.to_str().unwrap());
    let pool = menuplan::db::connect(&url, 1).await?;

    Ok(Storage::new(pool))
}

/// Planner loaded from the database file at `path`
pub async fn setup_planner(path: &Path) -> anyhow::Result<Planner> {
    let storage = setup_storage(path).await?;

    Ok(Planner::load(storage).await?)
}

/// Drops the document table behind the planner's back so every later write
/// to the file at `path` fails
pub async fn break_storage(path: &Path) -> anyhow::Result<()> {
    let url = format!("sqlite:{}", path.to_str().unwrap());
    let pool = menuplan::db::create_pool(&url, 1).await?;
    sqlx::query("DROP TABLE document").execute(&pool).await?;
    pool.close().await;

    Ok(())
}

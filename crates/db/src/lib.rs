use sqlx_migrator::{Info, Migrator};

mod m0_1;
mod storage;
pub mod table;

pub use storage::*;

pub fn migrator<DB: sqlx::Database>() -> Result<Migrator<DB>, sqlx_migrator::Error>
where
    m0_1::Migration: sqlx_migrator::Migration<DB>,
{
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec![Box::new(m0_1::Migration)])?;

    Ok(migrator)
}

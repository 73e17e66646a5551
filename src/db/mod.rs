use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::AppConfig;

pub mod customer_repo;
pub mod entities;
pub mod entry_repo;

pub async fn connect(cfg: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.database_url.clone());
    options
        .max_connections(cfg.db_max_connections)
        .min_connections(cfg.db_min_idle)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(options).await?;
    if cfg
        .database_url
        .trim()
        .to_ascii_lowercase()
        .starts_with("sqlite:")
    {
        db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    }
    info!("syncing database schema from entities");
    db.get_schema_registry("milk_ledger::db::entities::*")
        .sync(&db)
        .await?;
    Ok(db)
}

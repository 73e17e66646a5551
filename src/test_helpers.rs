use std::sync::Arc;

use axum::Router;
use sea_orm::{ConnectOptions, Database};

use crate::{routes::router, state::AppState};

/// Fresh application state over a private in-memory database. The pool is
/// pinned to a single connection so the database survives between requests.
pub async fn test_state() -> Arc<AppState> {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect test database");
    db.get_schema_registry("milk_ledger::db::entities::*")
        .sync(&db)
        .await
        .expect("sync schema");

    AppState::new(db)
}

pub fn test_router(state: &Arc<AppState>) -> Router {
    router(state.clone())
}

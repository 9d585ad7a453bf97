use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::service::WalletActions;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub db_pool: SqlitePool,
    pub dashboard: Arc<Dashboard>,
    pub actions: Arc<WalletActions>,
}

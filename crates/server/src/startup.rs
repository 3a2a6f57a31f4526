use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging;
use configs::AppConfig;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::accounts::{
    repo::seaorm::SeaOrmAccountsRepository, repository::AccountsRepository, AccountsService,
    AccountsServiceConfig,
};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Assemble router state from a live connection and the loaded config.
pub fn build_state(db: DatabaseConnection, cfg: &AppConfig) -> ServerState {
    let repo: Arc<dyn AccountsRepository> =
        Arc::new(SeaOrmAccountsRepository::new(db, cfg.accounts.auditor.clone()));
    let accounts = AccountsService::new(
        repo,
        AccountsServiceConfig { branch_address: cfg.accounts.branch_address.clone() },
    );
    ServerState {
        accounts: Arc::new(accounts),
        build_version: cfg.accounts.build_version.clone(),
        contact: cfg.accounts.contact.clone(),
    }
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(build_cors(), state)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}

/// Public entry: load config, connect, migrate and serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    init_logging(&cfg.server.log_format);

    let db_cfg = models::db::DatabaseConfig::from(&cfg.database);
    let db = models::db::connect_with_config(&db_cfg)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.run_migrations {
        Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;
        info!("migrations applied");
    }

    let app = build_app(build_state(db, &cfg));

    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting accounts server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

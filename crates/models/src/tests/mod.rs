//! DB-backed tests. They skip when `SKIP_DB_TESTS` is set or no Postgres is reachable.
use migration::MigratorTrait;
use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::db::connect;

/// Database connection and configuration tests
pub mod db_tests;



/// Connect and migrate, or `None` when the database is unavailable.
pub(crate) async fn setup_test_db() -> Option<DatabaseConnection> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return None;
    }
    let db = match connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skip: cannot connect to db: {}", e);
            return None;
        }
    };
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("skip: migrate up failed: {}", e);
        return None;
    }
    Some(db)
}

/// Random 10-digit mobile number, unlikely to collide across test runs.
pub(crate) fn random_mobile() -> String {
    format!("9{:09}", rand::thread_rng().gen_range(0..1_000_000_000u32))
}

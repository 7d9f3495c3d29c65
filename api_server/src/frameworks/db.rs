use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::frameworks::config::DB_MAX_CONNECTIONS;

// Build a small PostgreSQL pool for users and scores.
pub async fn connect_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DB_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

// Run embedded migrations for the users and scores tables.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
    MIGRATOR.run(pool).await
}

use secrecy::ExposeSecret;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::time::Duration;
use tracing::warn;

use crate::configuration::DatabaseSettings;

pub async fn get_connection_pool(configuration: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut retries = 0;
    let max_retries = configuration.max_connection_retries;

    loop {
        let connect_options = PgConnectOptions::new()
            .host(&configuration.host)
            .port(configuration.port)
            .username(&configuration.username)
            .password(configuration.password.expose_secret())
            .database(&configuration.database_name)
            .ssl_mode(if configuration.require_ssl {
                PgSslMode::Require
            } else {
                PgSslMode::Prefer
            });

        match PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(connect_options)
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                if retries >= max_retries {
                    return Err(e);
                }
                retries += 1;
                warn!("Database connection failed (attempt {}): {}", retries, e);
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }
}

pub async fn migrate_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Protocol(format!("Migration error: {}", e)))
}

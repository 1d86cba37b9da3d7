//! Shared application state

use database::postgres::DatabaseConnection;

/// Cloned into each router; both fields are cheap to clone (the pool is Arc-backed).
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
}

#[cfg(test)]
pub(crate) fn test_state(db: DatabaseConnection) -> AppState {
    use crate::config::{Config, Environment};
    use axum_helpers::JwtConfig;
    use core_config::{app_info, server::ServerConfig};
    use database::postgres::PostgresConfig;

    AppState {
        config: Config {
            app: app_info!(),
            database: PostgresConfig::new("postgres://localhost/products"),
            server: ServerConfig::new("127.0.0.1", 0),
            environment: Environment::Development,
            jwt: JwtConfig::new(TEST_JWT_SECRET).unwrap(),
            run_migrations: false,
        },
        db,
    }
}

#[cfg(test)]
pub(crate) const TEST_JWT_SECRET: &str = "products-api-state-secret-0123456789";

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::DatabaseError;

/// Verify the pool can run `SELECT 1`.
///
/// Used by the readiness endpoint.
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    probe(db, "SELECT 1").await
}

/// Verify a table exists and is readable by the service's role.
///
/// Only identifiers made of ASCII letters, digits and `_` are accepted, since
/// the name cannot be bound as a parameter.
pub async fn check_table_readable(db: &DatabaseConnection, table: &str) -> Result<(), DatabaseError> {
    if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(DatabaseError::HealthCheckFailed(format!(
            "invalid table name '{}'",
            table
        )));
    }
    probe(db, &format!("SELECT 1 FROM {} LIMIT 1", table)).await
}

async fn probe(db: &DatabaseConnection, sql: &str) -> Result<(), DatabaseError> {
    debug!(sql, "Running PostgreSQL health probe");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, sql.to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL probe '{}' failed: {}", sql, e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbErr, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn one_row() -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("?column?", Value::from(1i32))])
    }

    #[tokio::test]
    async fn test_check_health_ok() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![one_row()]])
            .into_connection();

        assert!(check_health(&db).await.is_ok());
    }

    #[tokio::test]
    async fn test_check_health_reports_failure() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".into())])
            .into_connection();

        let err = check_health(&db).await.unwrap_err();
        assert!(matches!(err, DatabaseError::HealthCheckFailed(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_check_table_readable_rejects_injection() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = check_table_readable(&db, "products; DROP TABLE products")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid table name"));
    }
}

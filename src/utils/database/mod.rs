use crate::modules::audit;
use async_trait::async_trait;
use sqlx::{
    postgres::{PgDatabaseError, PgPoolOptions},
    PgConnection, PgPool, Postgres,
};

#[derive(Clone)]
pub struct DatabaseConnection {
    pub pool: PgPool,
}

pub async fn connect(
    database_url: &str,
    max_connections: u32,
) -> Result<DatabaseConnection, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map(|pool| DatabaseConnection { pool })
        .map_err(|err| {
            tracing::error!("Error connecting to database: {}", err);
            err
        })
}

pub async fn migrate(db_conn: &DatabaseConnection) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(&db_conn.pool).await.map_err(|err| {
        tracing::error!("Failed to run database migrations: {}", err);
        err
    })
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0} already exists")]
    Duplicate(String),
    #[error(transparent)]
    AutoFill(#[from] audit::Error),
    #[error("unexpected database error: {0}")]
    Unexpected(sqlx::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        let duplicate = err
            .as_database_error()
            .filter(|db_err| db_err.is_unique_violation())
            .map(|db_err| {
                db_err
                    .try_downcast_ref::<PgDatabaseError>()
                    .and_then(PgDatabaseError::detail)
                    .map(duplicate_key)
                    .unwrap_or_else(|| db_err.message().to_string())
            });

        match duplicate {
            Some(key) => Self::Duplicate(key),
            None => Self::Unexpected(err),
        }
    }
}

/// Pulls the offending value out of a unique-violation detail line such as
/// `Key (name)=(Kung Pao Chicken) already exists.`
fn duplicate_key(detail: &str) -> String {
    detail
        .split_once(")=(")
        .and_then(|(_, rest)| rest.rsplit_once(") already exists"))
        .map(|(value, _)| value.to_string())
        .unwrap_or_else(|| detail.to_string())
}

/// Source of units of work.
#[async_trait]
pub trait Database: Send + Sync {
    type Transaction: Transaction;

    async fn begin(&self) -> Result<Self::Transaction, Error>;
}

/// All-or-nothing group of writes. Dropping it without [`Transaction::commit`] rolls
/// every write back.
#[async_trait]
pub trait Transaction: Send + Sized {
    async fn commit(self) -> Result<(), Error>;
}

pub struct PgTransaction(sqlx::Transaction<'static, Postgres>);

impl PgTransaction {
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.0
    }
}

#[async_trait]
impl Database for DatabaseConnection {
    type Transaction = PgTransaction;

    async fn begin(&self) -> Result<PgTransaction, Error> {
        self.pool.begin().await.map(PgTransaction).map_err(|err| {
            tracing::error!("Failed to start database transaction: {}", err);
            Error::from(err)
        })
    }
}

#[async_trait]
impl Transaction for PgTransaction {
    async fn commit(self) -> Result<(), Error> {
        self.0.commit().await.map_err(|err| {
            tracing::error!("Failed to commit database transaction: {}", err);
            Error::from(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_extracts_value_from_detail() {
        assert_eq!(
            duplicate_key("Key (name)=(Kung Pao Chicken) already exists."),
            "Kung Pao Chicken"
        );
    }

    #[test]
    fn duplicate_key_keeps_parentheses_inside_value() {
        assert_eq!(
            duplicate_key("Key (name)=(Tofu (silken)) already exists."),
            "Tofu (silken)"
        );
    }

    #[test]
    fn duplicate_key_falls_back_to_whole_detail() {
        assert_eq!(duplicate_key("something else"), "something else");
    }

    #[test]
    fn audit_errors_convert_into_database_errors() {
        let err: Error = audit::Error::MissingMutator {
            entity: "Dish",
            field: "created_at",
        }
        .into();

        assert!(matches!(err, Error::AutoFill(_)));
    }

    #[test]
    fn non_database_sqlx_errors_are_unexpected() {
        let err: Error = sqlx::Error::RowNotFound.into();

        assert!(matches!(err, Error::Unexpected(sqlx::Error::RowNotFound)));
    }
}

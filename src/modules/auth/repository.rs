use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::PgPool;

#[derive(Serialize, Clone, Debug, sqlx::FromRow)]
pub struct Session {
    pub id: String,
    pub employee_id: i64,
    pub access_token: String,
    pub access_token_expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl Session {
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.access_token_expires_at < now
    }
}

pub async fn find_by_access_token(
    db: &PgPool,
    access_token: &str,
) -> Result<Option<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE access_token = $1")
        .bind(access_token)
        .fetch_optional(db)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while trying to fetch session by access token: {}",
                err
            );
            err
        })
}

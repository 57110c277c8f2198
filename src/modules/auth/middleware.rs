use super::repository;
use crate::{modules::audit::ActorContext, types::Context};
use axum::{
    async_trait,
    extract::{Extension, FromRequestParts},
    http::{self, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestPartsExt,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
enum Error {
    MissingHeader,
    InvalidSession,
    ExpiredSession,
    Unexpected,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::Unexpected => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to verify session" })),
            )
                .into_response(),
            _ => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid session token" })),
            )
                .into_response(),
        }
    }
}

fn get_session_id_from_header(header: &str) -> Result<&str, Error> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(Error::InvalidSession)
}

async fn get_employee_from_header(ctx: &Context, header: &str) -> Result<i64, Error> {
    let access_token = get_session_id_from_header(header)?;

    let session = repository::find_by_access_token(&ctx.db_conn.pool, access_token)
        .await
        .map_err(|_| Error::Unexpected)?
        .ok_or(Error::InvalidSession)?;

    if session.is_expired(Utc::now().naive_utc()) {
        return Err(Error::ExpiredSession);
    }

    Ok(session.employee_id)
}

/// The signed-in employee making the request.
#[derive(Serialize, Clone, Copy, Debug)]
pub struct Auth {
    pub employee_id: i64,
}

impl Auth {
    /// Identity handed to the mapper layer for audit-field filling.
    pub fn actor(&self) -> ActorContext {
        ActorContext::new(self.employee_id)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|_| {
                tracing::error!("Application context is missing from request extensions");
                Error::Unexpected.into_response()
            })?;

        let header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or(Error::MissingHeader)
            .map_err(IntoResponse::into_response)?;

        get_employee_from_header(&ctx, header)
            .await
            .map(|employee_id| Self { employee_id })
            .map_err(|err| {
                tracing::debug!("Rejected request session: {:?}", err);
                err.into_response()
            })
    }
}

use super::{service::service, types::request};
use crate::{modules::auth::middleware::Auth, types::Context};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    _: Auth,
    State(ctx): State<Arc<Context>>,
    Query(payload): Query<request::Payload>,
) -> impl IntoResponse {
    service(ctx, payload).await
}

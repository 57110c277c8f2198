use super::{service::service, types::request};
use crate::{
    modules::{auth::middleware::Auth, dish::repository::DishPayload},
    types::Context,
};
use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    auth: Auth,
    State(ctx): State<Arc<Context>>,
    Path(id): Path<i64>,
    Json(dish): Json<DishPayload>,
) -> impl IntoResponse {
    service(ctx, request::Payload { auth, id, dish }).await
}

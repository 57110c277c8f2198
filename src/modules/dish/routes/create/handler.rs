use super::{service::service, types::request};
use crate::{
    modules::{auth::middleware::Auth, dish::repository::DishPayload},
    types::Context,
};
use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    auth: Auth,
    State(ctx): State<Arc<Context>>,
    Json(dish): Json<DishPayload>,
) -> impl IntoResponse {
    service(ctx, request::Payload { auth, dish }).await
}

use super::{service::service, types::request};
use crate::{
    modules::{auth::middleware::Auth, dish::repository::DishFilters},
    types::Context,
    utils::pagination::Pagination,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use std::sync::Arc;

pub async fn handler(
    _: Auth,
    State(ctx): State<Arc<Context>>,
    pagination: Pagination,
    Query(filters): Query<DishFilters>,
) -> impl IntoResponse {
    service(
        ctx,
        request::Payload {
            pagination,
            filters,
        },
    )
    .await
}

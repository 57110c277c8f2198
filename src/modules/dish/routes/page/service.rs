use super::types::{request, response};
use crate::{modules::dish, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    dish::service::page_query(&ctx.db_conn, payload.pagination, payload.filters)
        .await
        .map_err(|_| response::Error::FailedToFetchDishes)
        .map(response::Success::Dishes)
}

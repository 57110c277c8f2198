use super::types::{request, response};
use crate::{modules::dish, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    dish::service::list(&ctx.db_conn, payload.category_id)
        .await
        .map_err(|_| response::Error::FailedToFetchDishes)
        .map(response::Success::Dishes)
}

use super::types::{request, response};
use crate::{modules::dish, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    dish::service::get_by_id_with_flavors(&ctx.db_conn, payload.id)
        .await
        .map_err(|err| match err {
            dish::service::Error::NotFound(_) => response::Error::DishNotFound,
            _ => response::Error::FailedToFetchDish,
        })
        .map(response::Success::Dish)
}

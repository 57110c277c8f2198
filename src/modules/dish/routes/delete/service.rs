use super::types::{request, response};
use crate::{modules::dish, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let ids = payload.ids().map_err(|_| response::Error::InvalidIds)?;

    dish::service::delete_batch(&ctx.db_conn, &ids)
        .await
        .map_err(response::Error::from)
        .map(|_| response::Success::DishesDeleted)
}

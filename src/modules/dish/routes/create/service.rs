use super::types::{request, response};
use crate::{modules::dish, types::Context};
use std::sync::Arc;
use validator::Validate;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    payload
        .dish
        .validate()
        .map_err(response::Error::InvalidPayload)?;

    dish::service::save_with_flavors(&ctx.db_conn, payload.auth.actor(), payload.dish)
        .await
        .map_err(response::Error::from)
        .map(response::Success::DishCreated)
}

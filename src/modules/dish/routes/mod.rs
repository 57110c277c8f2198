mod create;
mod delete;
mod get;
mod list;
mod page;
mod update;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .merge(create::get_router())
        .merge(page::get_router())
        .merge(list::get_router())
        .merge(delete::get_router())
        .merge(get::get_router())
        .merge(update::get_router())
}

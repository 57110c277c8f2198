pub mod request {
    use crate::{modules::dish::repository::DishFilters, utils::pagination::Pagination};

    pub struct Payload {
        pub pagination: Pagination,
        pub filters: DishFilters,
    }
}

pub mod response {
    use crate::{modules::dish::repository::DishView, utils::pagination::Paginated};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Dishes(Paginated<DishView>),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Dishes(dishes) => (StatusCode::OK, Json(json!(dishes))).into_response(),
            }
        }
    }

    pub enum Error {
        FailedToFetchDishes,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::FailedToFetchDishes => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch dishes" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

pub mod request {
    pub struct Payload {
        pub id: i64,
    }
}

pub mod response {
    use crate::modules::dish::repository::DishView;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        Dish(DishView),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Dish(dish) => (StatusCode::OK, Json(json!(dish))).into_response(),
            }
        }
    }

    pub enum Error {
        DishNotFound,
        FailedToFetchDish,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DishNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Dish not found" })),
                )
                    .into_response(),
                Self::FailedToFetchDish => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to fetch dish" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}

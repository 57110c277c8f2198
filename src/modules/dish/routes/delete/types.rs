pub mod request {
    use serde::Deserialize;
    use std::num::ParseIntError;

    #[derive(Deserialize)]
    pub struct Payload {
        #[serde(default)]
        ids: String,
    }

    impl Payload {
        /// Parses the comma-separated `ids` query value.
        pub fn ids(&self) -> Result<Vec<i64>, ParseIntError> {
            self.ids
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::parse::<i64>)
                .collect()
        }
    }

}

pub mod response {
    use crate::modules::dish::service::{self, DeletionNotAllowed};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        DishesDeleted,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DishesDeleted => (
                    StatusCode::OK,
                    Json(json!({ "message": "Dishes deleted successfully" })),
                )
                    .into_response(),
            }
        }
    }

    #[derive(Debug)]
    pub enum Error {
        InvalidIds,
        DishNotFound(i64),
        DeletionNotAllowed(DeletionNotAllowed),
        FailedToDeleteDishes,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::NotFound(id) => Self::DishNotFound(id),
                service::Error::DeletionNotAllowed(reason) => Self::DeletionNotAllowed(reason),
                service::Error::Database(_) => Self::FailedToDeleteDishes,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidIds => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid dish ids" })),
                )
                    .into_response(),
                Self::DishNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": format!("Dish {} not found", id) })),
                )
                    .into_response(),
                Self::DeletionNotAllowed(reason) => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": reason.to_string() })),
                )
                    .into_response(),
                Self::FailedToDeleteDishes => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete dishes" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn on_sale_dish_is_a_conflict() {
            let err = Error::from(service::Error::DeletionNotAllowed(
                DeletionNotAllowed::OnSale { dish_id: 4 },
            ));

            assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
        }

        #[test]
        fn setmeal_link_is_a_conflict() {
            let err = Error::from(service::Error::DeletionNotAllowed(
                DeletionNotAllowed::RelatedBySetmeal {
                    setmeal_ids: vec![2],
                },
            ));

            assert!(matches!(err, Error::DeletionNotAllowed(_)));
            assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
        }

        #[test]
        fn unknown_dish_is_not_found() {
            let err = Error::from(service::Error::NotFound(8));

            assert!(matches!(err, Error::DishNotFound(8)));
            assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
        }
    }
}

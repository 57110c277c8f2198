pub mod request {
    use crate::modules::{auth::middleware::Auth, dish::repository::DishPayload};

    pub struct Payload {
        pub auth: Auth,
        pub id: i64,
        pub dish: DishPayload,
    }
}

pub mod response {
    use crate::{modules::dish::service, utils::database};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        DishUpdated,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DishUpdated => (
                    StatusCode::OK,
                    Json(json!({ "message": "Dish updated successfully" })),
                )
                    .into_response(),
            }
        }
    }

    #[derive(Debug)]
    pub enum Error {
        InvalidPayload(ValidationErrors),
        DishNotFound,
        DishAlreadyExists(String),
        FailedToUpdateDish,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::NotFound(_) => Self::DishNotFound,
                service::Error::Database(database::Error::Duplicate(name)) => {
                    Self::DishAlreadyExists(name)
                }
                _ => Self::FailedToUpdateDish,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidPayload(errors) => {
                    (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
                }
                Self::DishNotFound => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "Dish not found" })),
                )
                    .into_response(),
                Self::DishAlreadyExists(name) => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": format!("{} already exists", name) })),
                )
                    .into_response(),
                Self::FailedToUpdateDish => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to update dish" })),
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
        fn missing_dish_is_not_found() {
            let err = Error::from(service::Error::NotFound(3));

            assert!(matches!(err, Error::DishNotFound));
            assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
        }

        #[test]
        fn renaming_onto_an_existing_name_is_a_conflict() {
            let err = Error::from(service::Error::Database(database::Error::Duplicate(
                String::from("Soup"),
            )));

            assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
        }
    }
}

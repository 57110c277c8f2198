pub mod request {
    use crate::modules::{auth::middleware::Auth, dish::repository::DishPayload};

    pub struct Payload {
        pub auth: Auth,
        pub dish: DishPayload,
    }
}

pub mod response {
    use crate::{modules::dish::service, utils::database};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;
    use validator::ValidationErrors;

    pub enum Success {
        DishCreated(i64),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DishCreated(id) => (
                    StatusCode::CREATED,
                    Json(json!({
                        "message": "Dish created!",
                        "id": id
                    })),
                )
                    .into_response(),
            }
        }
    }

    #[derive(Debug)]
    pub enum Error {
        InvalidPayload(ValidationErrors),
        DishAlreadyExists(String),
        FailedToCreateDish,
    }

    impl From<service::Error> for Error {
        fn from(err: service::Error) -> Self {
            match err {
                service::Error::Database(database::Error::Duplicate(name)) => {
                    Self::DishAlreadyExists(name)
                }
                _ => Self::FailedToCreateDish,
            }
        }
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::InvalidPayload(errors) => {
                    (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
                }
                Self::DishAlreadyExists(name) => (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": format!("{} already exists", name) })),
                )
                    .into_response(),
                Self::FailedToCreateDish => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to create dish" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;

}

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json, RequestPartsExt,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub meta: PaginatedMeta,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PaginatedMeta {
    pub total: u32,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: u32, page: u32, per_page: u32) -> Paginated<T> {
        Self {
            items,
            meta: PaginatedMeta {
                total,
                page,
                per_page,
            },
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page", alias = "page_size")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl Pagination {
    /// Rows to skip; page numbers start at 1 and page 0 is treated as 1.
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.per_page)
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Pagination {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extract::<Query<Pagination>>().await {
            Ok(Query(pagination)) if pagination.per_page > 0 => Ok(pagination),
            _ => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid pagination options"})),
            )
                .into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_starts_at_zero() {
        assert_eq!(Pagination::default().offset(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let pagination = Pagination {
            page: 3,
            per_page: 20,
        };

        assert_eq!(pagination.offset(), 40);
    }

    #[test]
    fn page_zero_behaves_like_page_one() {
        let pagination = Pagination {
            page: 0,
            per_page: 20,
        };

        assert_eq!(pagination.offset(), 0);
    }
}

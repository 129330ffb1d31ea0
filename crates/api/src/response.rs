//! Shared response envelope types for API handlers.
//!
//! All successful responses use a `{ "data": ... }` envelope; paginated
//! lists add `meta`. Use [`DataResponse`] instead of ad-hoc
//! `serde_json::json!({ "data": ... })`.

use serde::Serialize;
use setlist_core::pagination::{total_pages, PageRequest};

/// Pagination metadata for list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(page: PageRequest, total: i64) -> Self {
        Self {
            page: page.page,
            per_page: page.per_page,
            total,
            total_pages: total_pages(total, page.per_page),
        }
    }
}

/// Standard `{ "data": T, "meta"?: PageMeta }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse::new(items)))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }

    pub fn paginated(data: T, page: PageRequest, total: i64) -> Self {
        Self {
            data,
            meta: Some(PageMeta::new(page, total)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn meta_is_omitted_when_absent() {
        let body = serde_json::to_value(DataResponse::new(vec![1, 2])).unwrap();
        assert_eq!(body, json!({ "data": [1, 2] }));
    }

    #[test]
    fn paginated_meta_derives_total_pages() {
        let page = PageRequest {
            page: 2,
            per_page: 20,
        };
        let response = DataResponse::paginated(Vec::<i32>::new(), page, 41);
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(
            body,
            json!({
                "data": [],
                "meta": { "page": 2, "per_page": 20, "total": 41, "total_pages": 3 }
            })
        );
    }
}

//! Page/per-page resolution shared by every paginated list endpoint.
//!
//! Unlike the `limit` parameters in [`crate::limits`], an oversized
//! `per_page` is rejected rather than clamped.

use crate::error::CoreError;

pub const DEFAULT_PAGE: i64 = 1;

pub const DEFAULT_PER_PAGE: i64 = 50;

pub const MAX_PER_PAGE: i64 = 100;

/// A validated `page` / `per_page` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Parse raw `page` / `per_page` query values.
    ///
    /// Absent or empty values fall back to the defaults. Present values must
    /// be integers >= 1, and `per_page` must not exceed [`MAX_PER_PAGE`].
    pub fn resolve(page: Option<&str>, per_page: Option<&str>) -> Result<Self, CoreError> {
        let mut request = Self::default();

        if let Some(raw) = non_empty(page) {
            request.page = parse_positive(raw)
                .ok_or_else(|| CoreError::invalid_param("page", "must be a positive integer"))?;
        }

        if let Some(raw) = non_empty(per_page) {
            let per_page = parse_positive(raw).ok_or_else(|| {
                CoreError::invalid_param("per_page", "must be a positive integer")
            })?;
            if per_page > MAX_PER_PAGE {
                return Err(CoreError::invalid_param(
                    "per_page",
                    format!("cannot exceed {MAX_PER_PAGE}"),
                ));
            }
            request.per_page = per_page;
        }

        Ok(request)
    }

    /// SQL `OFFSET` for this page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// SQL `LIMIT` for this page.
    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

/// Number of pages needed to show `total` rows, `per_page` at a time.
///
/// Returns 0 for a non-positive `per_page`.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

pub(crate) fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a strictly positive integer, rejecting zero, negatives and junk.
pub(crate) fn parse_positive(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|n| *n >= 1)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_when_absent() {
        let page = PageRequest::resolve(None, None).unwrap();
        assert_eq!(page, PageRequest { page: 1, per_page: 50 });
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn empty_strings_use_defaults() {
        let page = PageRequest::resolve(Some(""), Some("")).unwrap();
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn offset_is_derived_from_page() {
        let page = PageRequest::resolve(Some("3"), Some("20")).unwrap();
        assert_eq!(page.offset(), 40);
        assert_eq!(page.limit(), 20);
    }

    #[test]
    fn max_per_page_is_accepted() {
        let page = PageRequest::resolve(None, Some("100")).unwrap();
        assert_eq!(page.per_page, 100);
    }

    #[test]
    fn per_page_above_max_is_rejected() {
        let err = PageRequest::resolve(None, Some("101")).unwrap_err();
        assert_matches!(
            err,
            CoreError::InvalidParameter { param: "per_page", ref message }
                if message == "cannot exceed 100"
        );
    }

    #[test]
    fn zero_page_is_rejected() {
        let err = PageRequest::resolve(Some("0"), None).unwrap_err();
        assert_matches!(err, CoreError::InvalidParameter { param: "page", .. });
    }

    #[test]
    fn negative_page_is_rejected() {
        let err = PageRequest::resolve(Some("-2"), None).unwrap_err();
        assert_matches!(err, CoreError::InvalidParameter { param: "page", .. });
    }

    #[test]
    fn non_numeric_per_page_is_rejected() {
        let err = PageRequest::resolve(Some("1"), Some("ten")).unwrap_err();
        assert_matches!(err, CoreError::InvalidParameter { param: "per_page", .. });
    }

    #[test]
    fn page_error_reported_before_per_page() {
        let err = PageRequest::resolve(Some("x"), Some("500")).unwrap_err();
        assert_matches!(err, CoreError::InvalidParameter { param: "page", .. });
    }

    #[test]
    fn huge_page_does_not_overflow_offset() {
        let page = PageRequest::resolve(Some(&i64::MAX.to_string()), Some("100")).unwrap();
        assert_eq!(page.offset(), i64::MAX);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 50), 0);
        assert_eq!(total_pages(1, 50), 1);
        assert_eq!(total_pages(50, 50), 1);
        assert_eq!(total_pages(51, 50), 2);
    }

    #[test]
    fn total_pages_tolerates_non_positive_per_page() {
        assert_eq!(total_pages(10, 0), 0);
        assert_eq!(total_pages(10, -5), 0);
    }
}

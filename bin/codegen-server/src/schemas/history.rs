use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ServerError;
use crate::schemas::generation::GenerationResponse;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Query string of `GET /api/history`.
///
/// Values are kept as raw strings: anything that does not parse as an
/// integer falls back to the default, while parsed values out of range are
/// rejected.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HistoryQuery {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size, 1..=100 (default 10).
    pub limit: Option<String>,
    /// Exact-match language filter; empty means no filter.
    pub language: Option<String>,
}

/// A validated history window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
    pub language: Option<String>,
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl HistoryQuery {
    pub fn into_page_request(self) -> Result<PageRequest, ServerError> {
        let page = parse_or(self.page.as_deref(), DEFAULT_PAGE);
        let limit = parse_or(self.limit.as_deref(), DEFAULT_LIMIT);

        if page < 1 {
            return Err(ServerError::BadRequest(
                "page must be an integer greater than or equal to 1".into(),
            ));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(ServerError::BadRequest(format!(
                "limit must be an integer between 1 and {MAX_LIMIT}"
            )));
        }

        Ok(PageRequest {
            page,
            limit,
            language: self.language.filter(|l| !l.is_empty()),
        })
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = if total <= 0 { 0 } else { (total + limit - 1) / limit };
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HistoryResponse {
    pub generations: Vec<GenerationResponse>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>, language: Option<&str>) -> HistoryQuery {
        HistoryQuery {
            page: page.map(str::to_owned),
            limit: limit.map(str::to_owned),
            language: language.map(str::to_owned),
        }
    }

    #[test]
    fn defaults_apply_when_absent() {
        let req = HistoryQuery::default().into_page_request().unwrap();
        assert_eq!(req, PageRequest { page: 1, limit: 10, language: None });
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let req = query(Some("abc"), Some(""), None).into_page_request().unwrap();
        assert_eq!((req.page, req.limit), (1, 10));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for (page, limit) in [("0", "10"), ("-3", "10"), ("1", "0"), ("1", "101")] {
            let result = query(Some(page), Some(limit), None).into_page_request();
            assert!(
                matches!(result, Err(ServerError::BadRequest(_))),
                "page={page} limit={limit}"
            );
        }
        assert!(query(None, Some("100"), None).into_page_request().is_ok());
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let req = query(Some("3"), Some("25"), None).into_page_request().unwrap();
        assert_eq!(req.offset(), 50);
        let huge = query(Some(&i64::MAX.to_string()), Some("100"), None)
            .into_page_request()
            .unwrap();
        assert_eq!(huge.offset(), i64::MAX);
    }

    #[test]
    fn empty_language_means_no_filter() {
        let req = query(None, None, Some("")).into_page_request().unwrap();
        assert_eq!(req.language, None);
        let req = query(None, None, Some("C++")).into_page_request().unwrap();
        assert_eq!(req.language.as_deref(), Some("C++"));
    }

    #[test]
    fn pagination_metadata() {
        assert_eq!(
            Pagination::new(1, 10, 25),
            Pagination { page: 1, limit: 10, total: 25, total_pages: 3, has_next: true, has_prev: false }
        );
        let beyond = Pagination::new(4, 10, 25);
        assert!(!beyond.has_next && beyond.has_prev);
        let exact = Pagination::new(2, 10, 20);
        assert_eq!(exact.total_pages, 2);
        assert!(!exact.has_next);
        let empty = Pagination::new(1, 10, 0);
        assert_eq!((empty.total_pages, empty.has_next, empty.has_prev), (0, false, false));
    }
}

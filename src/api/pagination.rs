//! Pagination utilities for list endpoints

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::validation::{FieldError, Validator};

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PageParams {
    /// Page number (1-indexed)
    pub page_number: Option<u32>,

    /// Items per page
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Maximum allowed items per page
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Returns the page number (1-indexed, defaults to 1)
    pub fn page_number(&self) -> u32 {
        self.page_number.unwrap_or(1)
    }

    /// Returns the page size (defaults to 20)
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(20)
    }

    /// Calculate SQL OFFSET
    pub fn offset(&self) -> i64 {
        (self.page_number() as i64 - 1) * self.page_size() as i64
    }

    /// Calculate SQL LIMIT
    pub fn limit(&self) -> i64 {
        self.page_size() as i64
    }

    /// Out-of-range parameters are rejected, not clamped
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut v = Validator::new();
        v.ensure(
            self.page_number() >= 1,
            "page_number",
            "Page number must be greater than 0",
        )
        .ensure(
            self.page_size() >= 1,
            "page_size",
            "Page size must be greater than 0",
        )
        .ensure(
            self.page_size() <= Self::MAX_PAGE_SIZE,
            "page_size",
            "Page size cannot exceed 100",
        );
        v.finish()
    }
}

/// One page of an ordered collection plus total-count metadata
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> PagedResult<T> {
    /// Wrap one page window. `total_count` is the size of the unfiltered
    /// collection; a page number beyond the last page simply carries an
    /// empty window.
    pub fn new(items: Vec<T>, total_count: u64, params: &PageParams) -> Self {
        let page_number = params.page_number();
        let page_size = params.page_size();
        let total_pages = total_count.div_ceil(page_size as u64) as u32;

        Self {
            items,
            total_count,
            page_number,
            page_size,
            total_pages,
            has_next_page: page_number < total_pages,
            has_previous_page: page_number > 1,
        }
    }

    /// Convert the window items while keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_number: self.page_number,
            page_size: self.page_size,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            has_previous_page: self.has_previous_page,
        }
    }
}

impl<T: Serialize> IntoResponse for PagedResult<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page_number: u32, page_size: u32) -> PageParams {
        PageParams {
            page_number: Some(page_number),
            page_size: Some(page_size),
        }
    }

    #[test]
    fn single_page_has_no_neighbours() {
        let result = PagedResult::new(vec![1, 2, 3], 3, &params(1, 10));

        assert_eq!(result.items.len(), 3);
        assert_eq!(result.total_pages, 1);
        assert!(!result.has_next_page);
        assert!(!result.has_previous_page);
    }

    #[test]
    fn last_partial_page_of_twenty_five_items() {
        // 25 items, page size 10: page 3 holds the trailing 5
        let p = params(3, 10);
        assert_eq!(p.offset(), 20);
        assert_eq!(p.limit(), 10);

        let window: Vec<u32> = (21..=25).collect();
        let result = PagedResult::new(window, 25, &p);

        assert_eq!(result.items.len(), 5);
        assert_eq!(result.total_pages, 3);
        assert!(!result.has_next_page);
        assert!(result.has_previous_page);
    }

    #[test]
    fn page_beyond_total_is_empty_not_an_error() {
        let result = PagedResult::<u32>::new(Vec::new(), 25, &params(7, 10));

        assert!(result.items.is_empty());
        assert_eq!(result.total_pages, 3);
        assert!(!result.has_next_page);
        assert!(result.has_previous_page);
    }

    #[test]
    fn empty_collection_has_zero_pages() {
        let result = PagedResult::<u32>::new(Vec::new(), 0, &params(1, 20));

        assert_eq!(result.total_pages, 0);
        assert!(!result.has_next_page);
        assert!(!result.has_previous_page);
    }

    #[test]
    fn total_pages_uses_ceiling_division() {
        let result = PagedResult::<u32>::new(Vec::new(), 21, &params(1, 10));
        assert_eq!(result.total_pages, 3);
    }

    #[test]
    fn defaults_apply_when_params_are_omitted() {
        let p = PageParams::default();
        assert_eq!(p.page_number(), 1);
        assert_eq!(p.page_size(), 20);
        assert_eq!(p.offset(), 0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn out_of_range_params_are_rejected() {
        assert!(params(0, 20).validate().is_err());
        assert!(params(1, 0).validate().is_err());
        assert!(params(1, 101).validate().is_err());
        assert!(params(1, 100).validate().is_ok());
    }
}

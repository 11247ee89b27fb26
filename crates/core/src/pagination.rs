//! Pagination primitives shared by list queries and view state.
//!
//! The backend pages with `pageNum` (1-based) and `pageSize`. A page size of
//! [`UNPAGINATED`] asks for every matching record and must never be sent
//! together with a page number.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sentinel page size meaning "return all matching records".
pub const UNPAGINATED: i32 = -1;

/// Page size used by list views until the user picks another.
pub const DEFAULT_PAGE_SIZE: i32 = 10;

/// Cap used when loading a related resource for a selector.
pub const RELATION_PAGE_SIZE: i32 = 100;

/// Cap used when loading the products stored on one pallet.
pub const PALLET_PRODUCTS_PAGE_SIZE: i32 = 1000;

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// The paging part of an outgoing list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_num: Option<u32>,
    pub page_size: i32,
}

impl PageRequest {
    /// A regular numbered page. Non-positive sizes fall back to the default.
    pub fn page(page_num: u32, page_size: i32) -> Self {
        let page_size = if page_size > 0 {
            page_size
        } else {
            DEFAULT_PAGE_SIZE
        };
        Self {
            page_num: Some(page_num.max(1)),
            page_size,
        }
    }

    /// Every matching record; used by export paths.
    pub fn unpaginated() -> Self {
        Self {
            page_num: None,
            page_size: UNPAGINATED,
        }
    }

    /// The first `page_size` records without an explicit page number.
    pub fn capped(page_size: i32) -> Self {
        Self {
            page_num: None,
            page_size,
        }
    }

    pub fn is_unpaginated(&self) -> bool {
        self.page_size == UNPAGINATED
    }
}

// ---------------------------------------------------------------------------
// Wire pagination summary
// ---------------------------------------------------------------------------

/// Pagination summary returned alongside every list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page_num: i64,
    #[serde(default)]
    pub page_size: i64,
}

// ---------------------------------------------------------------------------
// View-side pagination state
// ---------------------------------------------------------------------------

/// Pagination held by a list view between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page_num: u32,
    pub page_size: i32,
    pub total: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_num: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }
}

impl PaginationState {
    /// The request for the page currently selected.
    pub fn request(&self) -> PageRequest {
        PageRequest::page(self.page_num, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaginated_has_no_page_number() {
        let req = PageRequest::unpaginated();
        assert_eq!(req.page_num, None);
        assert_eq!(req.page_size, UNPAGINATED);
        assert!(req.is_unpaginated());
    }

    #[test]
    fn numbered_page_never_carries_sentinel_size() {
        let req = PageRequest::page(3, UNPAGINATED);
        assert_eq!(req.page_num, Some(3));
        assert_eq!(req.page_size, DEFAULT_PAGE_SIZE);
        assert!(!req.is_unpaginated());
    }

    #[test]
    fn page_zero_is_clamped_to_first_page() {
        assert_eq!(PageRequest::page(0, 20).page_num, Some(1));
    }

    #[test]
    fn default_state_is_first_page_of_ten() {
        let state = PaginationState::default();
        assert_eq!(state.request(), PageRequest::page(1, 10));
        assert_eq!(state.total, 0);
    }

    #[test]
    fn pagination_deserializes_with_missing_fields() {
        let p: Pagination = serde_json::from_str(r#"{"total": 25}"#).unwrap();
        assert_eq!(p.total, 25);
        assert_eq!(p.page_num, 0);
    }
}

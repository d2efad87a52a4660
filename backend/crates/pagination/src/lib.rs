//! Shared pagination envelope primitives for Eventify backend endpoints.
//!
//! The engine is deliberately dumb: callers sort their snapshot first
//! (with whatever comparator their entity needs), then hand the ordered
//! collection to [`paginate`], which counts the unpaged set and applies
//! skip/take. Keeping counting and slicing here guarantees every entity
//! kind reports `totalCount` and `hasMore` the same way.

use serde::{Deserialize, Serialize};

/// Default page size applied when a request does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Validated page/size pair.
///
/// ## Invariants
/// - `page >= 1` and `page_size >= 1`; non-positive inputs clamp to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request, clamping non-positive values to the lower bound
    /// of 1.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let request = PageRequest::clamped(0, -3);
    /// assert_eq!(request.page(), 1);
    /// assert_eq!(request.page_size(), 1);
    /// ```
    pub fn clamped(page: i64, page_size: i64) -> Self {
        Self {
            page: clamp_to_bound(page),
            page_size: clamp_to_bound(page_size),
        }
    }

    /// One-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Maximum number of items per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items skipped before this page starts.
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn clamp_to_bound(value: i64) -> u32 {
    if value < 1 {
        1
    } else {
        u32::try_from(value).unwrap_or(u32::MAX)
    }
}

/// One page of an ordered collection plus paging metadata.
///
/// ## Invariants
/// - `has_more == page * page_size < total_count`.
/// - `items.len() <= page_size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub has_more: bool,
}

impl<T> PagedResult<T> {
    /// Convert the item type while keeping the paging metadata intact.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            has_more: self.has_more,
        }
    }
}

/// Slice one page out of an already-sorted collection.
///
/// The count is taken over the full collection before slicing, so
/// `total_count` always reflects the unpaged set.
///
/// # Examples
/// ```
/// use pagination::{paginate, PageRequest};
///
/// let page = paginate((1..=12).collect::<Vec<_>>(), PageRequest::clamped(2, 5));
/// assert_eq!(page.items, vec![6, 7, 8, 9, 10]);
/// assert_eq!(page.total_count, 12);
/// assert!(page.has_more);
/// ```
pub fn paginate<T>(sorted: Vec<T>, request: PageRequest) -> PagedResult<T> {
    let total_count = sorted.len() as u64;
    let items: Vec<T> = sorted
        .into_iter()
        .skip(request.offset())
        .take(request.page_size() as usize)
        .collect();

    PagedResult {
        items,
        page: request.page(),
        page_size: request.page_size(),
        total_count,
        has_more: u64::from(request.page()) * u64::from(request.page_size()) < total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 1, 1)]
    #[case(-5, -1, 1, 1)]
    #[case(3, 25, 3, 25)]
    fn clamps_to_lower_bound(
        #[case] page: i64,
        #[case] page_size: i64,
        #[case] expected_page: u32,
        #[case] expected_size: u32,
    ) {
        let request = PageRequest::clamped(page, page_size);
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.page_size(), expected_size);
    }

    #[rstest]
    #[case(1, 5, 12, 5, true)]
    #[case(2, 5, 12, 5, true)]
    #[case(3, 5, 12, 2, false)]
    #[case(4, 5, 12, 0, false)]
    #[case(1, 20, 12, 12, false)]
    fn item_count_matches_window(
        #[case] page: i64,
        #[case] page_size: i64,
        #[case] total: usize,
        #[case] expected_len: usize,
        #[case] expected_has_more: bool,
    ) {
        let result = paginate((0..total).collect(), PageRequest::clamped(page, page_size));
        assert_eq!(result.items.len(), expected_len);
        assert_eq!(result.has_more, expected_has_more);
        assert_eq!(result.total_count, total as u64);
    }

    #[rstest]
    fn pages_tile_the_collection_without_overlap() {
        let all: Vec<u32> = (0..23).collect();
        let mut seen = Vec::new();
        for page in 1..=5 {
            let result = paginate(all.clone(), PageRequest::clamped(page, 5));
            seen.extend(result.items);
        }
        assert_eq!(seen, all);
    }

    #[rstest]
    fn map_preserves_metadata() {
        let result = paginate(vec![1, 2, 3], PageRequest::clamped(1, 2)).map(|n| n * 10);
        assert_eq!(result.items, vec![10, 20]);
        assert_eq!(result.total_count, 3);
        assert!(result.has_more);
    }

    #[rstest]
    fn serialises_camel_case() {
        let result = paginate(vec![1], PageRequest::default());
        let value = serde_json::to_value(&result).expect("paged result JSON");
        assert!(value.get("pageSize").is_some());
        assert!(value.get("totalCount").is_some());
        assert!(value.get("hasMore").is_some());
        assert!(value.get("page_size").is_none());
    }
}

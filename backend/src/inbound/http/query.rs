//! List query-string binding shared by every collection endpoint.

use pagination::{DEFAULT_PAGE_SIZE, PageRequest};
use serde::Deserialize;

use crate::domain::query::ListParams;

/// Raw paging and sorting parameters as they arrive on the wire.
///
/// Every field is optional; defaults are page 1, page size 10, sort by
/// id ascending. Unknown `sortBy` values fall back to the id ordering
/// rather than failing the request.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// 1-based page number.
    pub page: Option<i64>,
    /// Items per page.
    pub page_size: Option<i64>,
    /// Sort field name, matched case-insensitively.
    pub sort_by: Option<String>,
    /// Sort direction; `true` reverses the field ordering. Accepted
    /// under both spellings in use across the entity endpoints.
    #[serde(alias = "isDescending")]
    pub descending: Option<bool>,
}

impl ListQuery {
    /// Resolve into validated list parameters using the entity's sort
    /// key parser.
    pub fn into_params<K>(self, parse: impl FnOnce(Option<&str>) -> K) -> ListParams<K> {
        ListParams {
            request: PageRequest::clamped(
                self.page.unwrap_or(1),
                self.page_size.unwrap_or(i64::from(DEFAULT_PAGE_SIZE)),
            ),
            sort: parse(self.sort_by.as_deref()),
            descending: self.descending.unwrap_or(false),
        }
    }
}

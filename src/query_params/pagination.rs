use super::QueryPairs;
use serde::Serialize;
use utoipa::ToSchema;

/// Upper bound for a client-supplied `limit`.
pub const MAX_LIMIT: usize = 100;

const MAX_OFFSET: usize = i32::MAX as usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub struct PaginationParams {
    pub page: usize,
    pub limit: usize,
    pub offset: usize,
}

impl PaginationParams {
    pub fn new(page: usize, limit: usize) -> Self {
        let limit = limit.clamp(1, MAX_LIMIT);
        // GraphQL offsets are `Int` (i32); pages past that are simply empty.
        let page = page.clamp(1, MAX_OFFSET / limit + 1);
        PaginationParams {
            page,
            limit,
            offset: (page - 1) * limit,
        }
    }

    /// `page` and `limit` from the URL; missing or invalid values fall back
    /// to the first page and `default_limit`.
    pub fn from_query(query: &QueryPairs, default_limit: usize) -> Self {
        let page = query
            .get("page")
            .and_then(|p| p.parse::<usize>().ok())
            .unwrap_or(1);
        let limit = query
            .get("limit")
            .and_then(|l| l.parse::<usize>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(default_limit);
        Self::new(page, limit)
    }
}

/// Page navigation over a result set of known size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let mut pagination = Pagination {
            page: 1,
            limit: limit.max(1),
            total,
        };
        pagination.page = pagination.clamp(i64::try_from(page).unwrap_or(i64::MAX));
        pagination
    }

    /// Never less than one, so an empty result still has a page to show.
    pub fn page_count(&self) -> u64 {
        let limit = self.limit.max(1);
        let pages = self.total / limit + u64::from(self.total % limit != 0);
        pages.max(1)
    }

    pub fn clamp(&self, requested: i64) -> u64 {
        if requested < 1 {
            1
        } else {
            (requested as u64).min(self.page_count())
        }
    }

    /// Page to navigate to, or `None` when the request lands on the current
    /// page.
    pub fn go_to(&self, requested: i64) -> Option<u64> {
        let page = self.clamp(requested);
        if page == self.page {
            None
        } else {
            Some(page)
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_derived_from_page_and_limit() {
        let params = PaginationParams::new(3, 12);
        assert_eq!(params.offset, 24);
        assert_eq!(PaginationParams::new(0, 12).offset, 0);
        assert_eq!(PaginationParams::new(1, 500).limit, MAX_LIMIT);
    }

    #[test]
    fn huge_pages_stay_within_graphql_int() {
        let params = PaginationParams::new(usize::MAX, 12);
        assert!(params.offset <= i32::MAX as usize);
        assert!(params.offset + params.limit > i32::MAX as usize);
        assert_eq!(PaginationParams::new(usize::MAX, 1).offset, i32::MAX as usize);
    }

    #[test]
    fn huge_requested_page_clamps_to_last() {
        assert_eq!(Pagination::new(u64::MAX, 4, 10).page, 3);
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(Pagination::new(1, 4, 10).page_count(), 3);
        assert_eq!(Pagination::new(1, 5, 10).page_count(), 2);
        assert_eq!(Pagination::new(1, 5, 0).page_count(), 1);
    }

    #[test]
    fn navigation_flags() {
        let first = Pagination::new(1, 4, 10);
        assert!(!first.has_previous());
        assert!(first.has_next());
        let last = Pagination::new(3, 4, 10);
        assert!(last.has_previous());
        assert!(!last.has_next());
    }
}

//! Tests for pagination and sort order parameters.

use marketplace_api::query_params::{AssetOrderBy, Pagination, PaginationParams, QueryPairs};

fn params(raw: &str, default_limit: usize) -> PaginationParams {
    PaginationParams::from_query(&QueryPairs::parse(raw).unwrap(), default_limit)
}

#[test]
fn test_offset_from_page_and_limit() {
    let p = params("page=3&limit=20", 12);
    assert_eq!((p.page, p.limit, p.offset), (3, 20, 40));
}

#[test]
fn test_missing_or_invalid_values_use_defaults() {
    assert_eq!(params("", 12), PaginationParams::new(1, 12));
    assert_eq!(params("page=abc&limit=-4", 12), PaginationParams::new(1, 12));
    assert_eq!(params("page=0&limit=0", 12), PaginationParams::new(1, 12));
}

#[test]
fn test_go_to_clamps_to_existing_pages() {
    let pagination = Pagination::new(1, 4, 10);
    assert_eq!(pagination.go_to(99), Some(3));
    assert_eq!(pagination.go_to(-5), None);
    assert_eq!(pagination.clamp(-5), 1);
    assert_eq!(pagination.go_to(2), Some(2));
}

#[test]
fn test_go_to_current_page_is_noop() {
    let pagination = Pagination::new(2, 4, 10);
    assert_eq!(pagination.go_to(2), None);
    assert_eq!(pagination.go_to(1), Some(1));
}

#[test]
fn test_empty_result_has_one_page() {
    let pagination = Pagination::new(5, 12, 0);
    assert_eq!(pagination.page, 1);
    assert_eq!(pagination.page_count(), 1);
    assert!(!pagination.has_next());
}

#[test]
fn test_order_by_parameter() {
    let order = |raw: &str| AssetOrderBy::from_query(&QueryPairs::parse(raw).unwrap());
    assert_eq!(
        order("orderBy=SALES_MIN_UNIT_PRICE_IN_REF_ASC"),
        AssetOrderBy::SalesMinUnitPriceInRefAsc
    );
    assert_eq!(order("orderBy=CREATED_AT_ASC"), AssetOrderBy::CreatedAtAsc);
    assert_eq!(order(""), AssetOrderBy::CreatedAtDesc);
}

#[test]
fn test_far_page_offset_fits_graphql_int() {
    let p = params("page=99999999999&limit=20", 12);
    assert_eq!(p.limit, 20);
    assert!(p.offset <= i32::MAX as usize);
    assert!(p.page > 1);
}

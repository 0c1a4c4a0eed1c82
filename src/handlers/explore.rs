use crate::graphql::Queries;
use crate::handlers::ResponseCache;
use crate::model::Asset;
use crate::query_params::{
    convert_filter_to_asset_filter, AssetOrderBy, Filter, PaginationParams, QueryPairs,
};
use crate::schema::{AssetPage, Page};
use crate::{api_doc_addon, cached_response, catch_error};
use chrono::Utc;
use std::convert::Infallible;
use utoipa::OpenApi;
use warp::Filter as _;

#[derive(OpenApi)]
#[openapi(
    paths(get_explore_assets),
    components(schemas(AssetPage, Filter, AssetOrderBy)),
    tags(
        (name = "explore", description = "Asset search"),
    )
)]
struct ApiDoc;
api_doc_addon!(ApiDoc);

#[utoipa::path(
    get,
    tag = "explore",
    path = "/explore/assets",
    params(
        ("chains" = Option<Vec<u64>>, Query, description = "Chain ids, repeated or comma separated"),
        ("search" = Option<String>, Query, description = "Case insensitive name search"),
        ("minPrice" = Option<String>, Query, description = "Lowest unit price, requires currency"),
        ("maxPrice" = Option<String>, Query, description = "Highest unit price, requires currency"),
        ("currency" = Option<String>, Query, description = "Currency id of the price range"),
        ("decimals" = Option<u8>, Query, description = "Decimals of the currency"),
        ("collection" = Option<String>, Query, description = "Collection as chainId-address"),
        ("offers" = Option<String>, Query, description = "fixed or bids"),
        ("orderBy" = Option<AssetOrderBy>, Query, description = "Sort order"),
        ("page" = Option<usize>, Query, description = "Page number, starting at 1"),
        ("limit" = Option<usize>, Query, description = "Page size"),
        ("account" = Option<String>, Query, description = "Viewer address"),
    ),
    responses(
        (status = 200, body = AssetPage),
        (status = 500),
    ),
)]
pub fn get_explore_assets(
    db: Queries,
    cache: ResponseCache,
    default_limit: usize,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("explore" / "assets")
        .and(warp::get())
        .and(warp::query::<Vec<(String, String)>>())
        .and(warp::any().map(move || db.clone()))
        .and(warp::any().map(move || cache.clone()))
        .and(warp::any().map(move || default_limit))
        .and_then(get_explore_assets_handler)
}

pub async fn get_explore_assets_handler(
    query: Vec<(String, String)>,
    db: Queries,
    cache: ResponseCache,
    default_limit: usize,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let query = QueryPairs::new(query);
    let filter = Filter::from_query(&query, &db.currencies);
    let order = AssetOrderBy::from_query(&query);
    let pagination = PaginationParams::from_query(&query, default_limit);
    let account = query.get("account").map(str::to_lowercase);
    let key = ("explore", &filter, order, pagination, &account);

    cached_response!(cache, key, {
        let condition = convert_filter_to_asset_filter(&filter);
        let now = Utc::now();
        let assets = catch_error!(
            db.fetch_assets(
                &condition,
                order,
                pagination.limit,
                pagination.offset,
                account.as_deref(),
                now,
            )
            .await
        );
        let total = assets.total();
        let items: Vec<Asset> = assets
            .nodes
            .iter()
            .map(|node| Asset::from_graphql(node, now))
            .collect();
        log::debug!("explore: {} of {} assets", items.len(), total);
        Page::new(items, total, pagination)
    })
}

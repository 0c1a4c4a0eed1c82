use crate::graphql::Queries;
use crate::handlers::ResponseCache;
use crate::model::{FullUser, Trade};
use crate::query_params::{PaginationParams, QueryPairs};
use crate::schema::{Page, TradePage};
use crate::{api_doc_addon, cached_response, catch_error};
use std::convert::Infallible;
use utoipa::OpenApi;
use warp::Filter;

#[derive(OpenApi)]
#[openapi(
    paths(get_user, get_user_trades),
    components(schemas(FullUser, TradePage)),
    tags(
        (name = "user", description = "User profile and activity"),
    )
)]
struct ApiDoc;
api_doc_addon!(ApiDoc);

#[utoipa::path(
    get,
    tag = "user",
    path = "/users/{address}",
    params(("address" = String, Path, description = "User address")),
    responses(
        (status = 200, body = FullUser),
        (status = 500),
    )
)]
pub fn get_user(
    db: Queries,
    cache: ResponseCache,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("users" / String)
        .and(warp::get())
        .and(warp::any().map(move || db.clone()))
        .and(warp::any().map(move || cache.clone()))
        .and_then(get_user_handler)
}

pub async fn get_user_handler(
    address: String,
    db: Queries,
    cache: ResponseCache,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let address = address.to_lowercase();
    let key = ("user", &address);

    cached_response!(cache, key, {
        let account = catch_error!(db.fetch_account(&address).await);
        // Addresses without a profile still have a page.
        let mut account = account.unwrap_or_default();
        account.address = address.clone();
        FullUser::from_graphql(&account)
    })
}

#[utoipa::path(
    get,
    tag = "user",
    path = "/users/{address}/trades",
    params(
        ("address" = String, Path, description = "User address"),
        ("page" = Option<usize>, Query, description = "Page number, starting at 1"),
        ("limit" = Option<usize>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, body = TradePage),
        (status = 500),
    )
)]
pub fn get_user_trades(
    db: Queries,
    cache: ResponseCache,
    default_limit: usize,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("users" / String / "trades")
        .and(warp::get())
        .and(warp::query::<Vec<(String, String)>>())
        .and(warp::any().map(move || db.clone()))
        .and(warp::any().map(move || cache.clone()))
        .and(warp::any().map(move || default_limit))
        .and_then(get_user_trades_handler)
}

pub async fn get_user_trades_handler(
    address: String,
    query: Vec<(String, String)>,
    db: Queries,
    cache: ResponseCache,
    default_limit: usize,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let address = address.to_lowercase();
    let pagination = PaginationParams::from_query(&QueryPairs::new(query), default_limit);
    let key = ("trades", &address, pagination);

    cached_response!(cache, key, {
        let trades = catch_error!(
            db.fetch_trades(&address, pagination.limit, pagination.offset)
                .await
        );
        let items: Vec<Trade> = trades.nodes.iter().map(Trade::from_graphql).collect();
        Page::new(items, trades.total(), pagination)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::AccountNode;

    #[test]
    fn user_without_profile_keeps_address() {
        let account = AccountNode {
            address: "0xabc".to_string(),
            ..Default::default()
        };
        let user = FullUser::from_graphql(&account);
        assert_eq!(user.user.address, "0xabc");
        assert!(!user.user.verified);
        assert!(user.user.name.is_none());
    }
}

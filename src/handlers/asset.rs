use crate::graphql::Queries;
use crate::handlers::{parse_chain_id, AccountQuery, ResponseCache};
use crate::model::AssetDetails;
use crate::{api_doc_addon, cached_response, catch_empty, catch_error};
use chrono::Utc;
use std::convert::Infallible;
use utoipa::OpenApi;
use warp::Filter;

#[derive(OpenApi)]
#[openapi(
    paths(get_asset),
    components(schemas(AssetDetails)),
    tags(
        (name = "asset", description = "Asset page"),
    )
)]
struct ApiDoc;
api_doc_addon!(ApiDoc);

#[utoipa::path(
    get,
    tag = "asset",
    path = "/assets/{chainId}/{collection}/{tokenId}",
    params(
        ("chainId" = u64, Path, description = "Chain id"),
        ("collection" = String, Path, description = "Collection address"),
        ("tokenId" = String, Path, description = "Token id"),
        AccountQuery,
    ),
    responses(
        (status = 200, body = AssetDetails),
        (status = 400),
        (status = 404),
        (status = 500),
    ),
)]
pub fn get_asset(
    db: Queries,
    cache: ResponseCache,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("assets" / String / String / String)
        .and(warp::get())
        .and(warp::query::<AccountQuery>())
        .and(warp::any().map(move || db.clone()))
        .and(warp::any().map(move || cache.clone()))
        .and_then(get_asset_handler)
}

pub async fn get_asset_handler(
    chain_id: String,
    collection: String,
    token_id: String,
    query: AccountQuery,
    db: Queries,
    cache: ResponseCache,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let collection = collection.to_lowercase();
    let account = query.account.map(|a| a.to_lowercase());
    let chain_id = catch_error!(parse_chain_id(&chain_id));
    let key = ("asset", chain_id, &collection, &token_id, &account);

    cached_response!(cache, key, {
        let now = Utc::now();
        let asset = catch_error!(
            db.fetch_asset(chain_id, &collection, &token_id, account.as_deref(), now)
                .await
        );
        let asset = catch_empty!(
            asset,
            format!("asset {}-{}-{} not found", chain_id, collection, token_id)
        );
        AssetDetails::from_graphql(&asset, now)
    })
}

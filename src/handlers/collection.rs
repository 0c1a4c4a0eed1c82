use crate::graphql::Queries;
use crate::handlers::{parse_chain_id, ResponseCache};
use crate::model::Collection;
use crate::{api_doc_addon, cached_response, catch_empty, catch_error};
use std::convert::Infallible;
use utoipa::OpenApi;
use warp::Filter;

#[derive(OpenApi)]
#[openapi(
    paths(get_collection),
    components(schemas(Collection)),
    tags(
        (name = "collection", description = "Collection page"),
    )
)]
struct ApiDoc;
api_doc_addon!(ApiDoc);

#[utoipa::path(
    get,
    tag = "collection",
    path = "/collections/{chainId}/{address}",
    params(
        ("chainId" = u64, Path, description = "Chain id"),
        ("address" = String, Path, description = "Collection address"),
    ),
    responses(
        (status = 200, body = Collection),
        (status = 400),
        (status = 404),
        (status = 500),
    ),
)]
pub fn get_collection(
    db: Queries,
    cache: ResponseCache,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("collections" / String / String)
        .and(warp::get())
        .and(warp::any().map(move || db.clone()))
        .and(warp::any().map(move || cache.clone()))
        .and_then(get_collection_handler)
}

pub async fn get_collection_handler(
    chain_id: String,
    address: String,
    db: Queries,
    cache: ResponseCache,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let address = address.to_lowercase();
    let chain_id = catch_error!(parse_chain_id(&chain_id));
    let key = ("collection", chain_id, &address);

    cached_response!(cache, key, {
        let collection = catch_error!(db.fetch_collection(chain_id, &address).await);
        let collection = catch_empty!(
            collection,
            format!("collection {}-{} not found", chain_id, address)
        );
        Collection::from_graphql(&collection)
    })
}

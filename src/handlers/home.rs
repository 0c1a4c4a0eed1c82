use crate::cfg::HomeConfig;
use crate::graphql::Queries;
use crate::handlers::{AccountQuery, ResponseCache};
use crate::home::{order_by_ids, pseudo_shuffle, shuffle_seed};
use crate::model::{Asset, Collection, User};
use crate::schema::HomeData;
use crate::{api_doc_addon, cached_response, catch_error};
use chrono::Utc;
use std::convert::Infallible;
use utoipa::OpenApi;
use warp::Filter;

#[derive(OpenApi)]
#[openapi(
    paths(get_home),
    components(schemas(HomeData)),
    tags(
        (name = "home", description = "Home page"),
    )
)]
struct ApiDoc;
api_doc_addon!(ApiDoc);

#[utoipa::path(
    get,
    tag = "home",
    path = "/home",
    params(AccountQuery),
    responses(
        (status = 200, body = HomeData),
        (status = 500),
    )
)]
pub fn get_home(
    db: Queries,
    cache: ResponseCache,
    home: HomeConfig,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("home")
        .and(warp::get())
        .and(warp::query::<AccountQuery>())
        .and(warp::any().map(move || db.clone()))
        .and(warp::any().map(move || cache.clone()))
        .and(warp::any().map(move || home.clone()))
        .and_then(get_home_handler)
}

pub async fn get_home_handler(
    query: AccountQuery,
    db: Queries,
    cache: ResponseCache,
    home: HomeConfig,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let now = Utc::now();
    let seed = shuffle_seed(now);
    let account = query.account.map(|a| a.to_lowercase());
    let key = ("home", seed, &account);

    cached_response!(cache, key, {
        let ids = pseudo_shuffle(&home.tokens, seed, home.tokens_limit);
        let assets = catch_error!(db.fetch_assets_by_ids(&ids, account.as_deref(), now).await);
        let assets: Vec<Asset> = order_by_ids(&ids, assets, |a| a.id.to_lowercase())
            .iter()
            .map(|node| Asset::from_graphql(node, now))
            .collect();

        let keys = home.collection_keys();
        let collections = catch_error!(db.fetch_collections(&keys).await);
        let collection_ids: Vec<String> = keys.iter().map(ToString::to_string).collect();
        let collections: Vec<Collection> = order_by_ids(&collection_ids, collections, |c| {
            format!("{}-{}", c.chain_id, c.address.to_lowercase())
        })
        .iter()
        .map(Collection::from_graphql)
        .collect();

        let accounts = catch_error!(db.fetch_accounts(&home.users).await);
        let users: Vec<User> = order_by_ids(&home.users, accounts, |a| a.address.to_lowercase())
            .iter()
            .map(User::from_graphql)
            .collect();

        log::debug!(
            "home seed {}: {} assets, {} collections, {} users",
            seed,
            assets.len(),
            collections.len(),
            users.len()
        );
        HomeData {
            assets,
            collections,
            users,
        }
    })
}

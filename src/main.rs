use anyhow::Context;
use marketplace_api::cfg::ApiConfig;
use marketplace_api::currency::CurrencyDict;
use marketplace_api::graphql::{GraphqlClient, Queries};
use marketplace_api::handlers::*;
use marketplace_api::services::error::handle_rejection;
use warp::{http::StatusCode, Filter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();
    log::info!("MARKETPLACE-API SERVICE");
    let cfg = ApiConfig::new().context("failed reading configuration")?;

    let client = GraphqlClient::new(&cfg.graphql).context("failed building graphql client")?;
    let currencies = CurrencyDict::load(&client)
        .await
        .context("error loading currencies dictionary")?;
    let service = Queries::new(client, currencies);
    let cache = response_cache(&cfg.cache);
    let limit = cfg.pagination_limit;
    let api_url = format!("http://{}", cfg.http_address);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["authority", "user-agent", "content-type"])
        .allow_methods(vec!["GET", "POST", "OPTIONS"]);
    let mut cors_headers = warp::http::HeaderMap::new();
    cors_headers.insert(
        "access-control-allow-origin",
        warp::http::HeaderValue::from_static("*"),
    );
    cors_headers.insert(
        "access-control-allow-methods",
        warp::http::HeaderValue::from_static("GET, POST, OPTIONS"),
    );

    let api = warp::any()
        .and(
            warp::options()
                .map(|| StatusCode::NO_CONTENT)
                .with(warp::reply::with::headers(cors_headers))
                .or(get_explore_assets(service.clone(), cache.clone(), limit))
                .or(get_asset(service.clone(), cache.clone()))
                .or(get_collection(service.clone(), cache.clone()))
                .or(get_user_trades(service.clone(), cache.clone(), limit))
                .or(get_user(service.clone(), cache.clone()))
                .or(get_home(service.clone(), cache.clone(), cfg.home.clone()))
                .or(get_step())
                .or(post_format_error())
                .or(get_swagger_json(api_url.clone()))
                .or(get_swagger_yaml(api_url)),
        )
        .recover(handle_rejection)
        .with(cors);

    // View access logs by setting `RUST_LOG=marketplace_api`.
    let routes = api.with(warp::log("marketplace_api"));

    warp::serve(routes).run(cfg.http_address).await;
    Ok(())
}

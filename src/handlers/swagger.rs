use std::convert::Infallible;
use utoipa::openapi::Server;
use utoipa::OpenApi;
use warp::http::{Response, StatusCode};
use warp::Filter;

use crate::schema::ApiDoc;
use crate::services::error::error_reply;

fn openapi(api_url: &str) -> utoipa::openapi::OpenApi {
    let mut openapi = ApiDoc::openapi();
    openapi.servers = Some(vec![Server::new(api_url)]);
    openapi
}

fn document_reply(body: Result<String, String>, content_type: &str) -> Box<dyn warp::Reply> {
    match body {
        Ok(body) => Box::new(
            Response::builder()
                .header("Content-Type", content_type)
                .status(StatusCode::OK)
                .body(body),
        ),
        Err(e) => {
            log::error!("failed rendering openapi document: {}", e);
            Box::new(error_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            ))
        }
    }
}

/// GET /swagger.json
pub fn get_swagger_json(
    api_url: String,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("swagger.json")
        .and(warp::get())
        .and(warp::any().map(move || api_url.clone()))
        .and_then(get_swagger_json_handler)
}

async fn get_swagger_json_handler(api_url: String) -> Result<Box<dyn warp::Reply>, Infallible> {
    let body = openapi(&api_url).to_pretty_json().map_err(|e| e.to_string());
    Ok(document_reply(body, "application/json"))
}

/// GET /swagger.yaml
pub fn get_swagger_yaml(
    api_url: String,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("swagger.yaml")
        .and(warp::get())
        .and(warp::any().map(move || api_url.clone()))
        .and_then(get_swagger_yaml_handler)
}

async fn get_swagger_yaml_handler(api_url: String) -> Result<Box<dyn warp::Reply>, Infallible> {
    let body = serde_yaml::to_string(&openapi(&api_url)).map_err(|e| e.to_string());
    Ok(document_reply(body, "application/yaml"))
}

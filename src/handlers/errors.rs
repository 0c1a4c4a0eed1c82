use crate::services::error::format_error;
use crate::{api_doc_addon, response};
use serde::Serialize;
use serde_json::Value;
use std::convert::Infallible;
use utoipa::{OpenApi, ToSchema};
use warp::Filter;

#[derive(OpenApi)]
#[openapi(
    paths(post_format_error),
    components(schemas(FormattedError)),
    tags(
        (name = "errors", description = "Wallet and SDK error messages"),
    )
)]
struct ApiDoc;
api_doc_addon!(ApiDoc);

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FormattedError {
    pub message: String,
}

#[utoipa::path(
    post,
    tag = "errors",
    path = "/errors/format",
    request_body(content = Object, description = "Error raised by the wallet or SDK"),
    responses(
        (status = 200, body = FormattedError),
        (status = 400),
    )
)]
pub fn post_format_error() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
{
    warp::path!("errors" / "format")
        .and(warp::post())
        .and(warp::body::json::<Value>())
        .and_then(post_format_error_handler)
}

pub async fn post_format_error_handler(error: Value) -> Result<Box<dyn warp::Reply>, Infallible> {
    response!(&FormattedError {
        message: format_error(&error),
    })
}

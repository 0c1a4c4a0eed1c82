use crate::services::error::Error;
use crate::step::{display_info, DisplayInfo, Flow, StepIcon, TransactionStep};
use crate::{api_doc_addon, catch_empty, catch_error, response};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use utoipa::{IntoParams, OpenApi, ToSchema};
use warp::Filter;

#[derive(OpenApi)]
#[openapi(
    paths(get_step),
    components(schemas(StepDisplay, DisplayInfo, StepIcon, Flow, TransactionStep)),
    tags(
        (name = "step", description = "Transaction progress"),
    )
)]
struct ApiDoc;
api_doc_addon!(ApiDoc);

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StepQuery {
    /// Hash of the transaction submitted by the SDK, echoed back.
    pub transaction_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepDisplay {
    pub flow: Flow,
    pub step: TransactionStep,
    #[serde(flatten)]
    pub info: DisplayInfo,
    pub transaction_hash: Option<String>,
}

#[utoipa::path(
    get,
    tag = "step",
    path = "/steps/{flow}/{step}",
    params(
        ("flow" = Flow, Path, description = "Transaction flow"),
        ("step" = TransactionStep, Path, description = "Current step of the flow"),
        StepQuery,
    ),
    responses(
        (status = 200, body = StepDisplay),
        (status = 400),
        (status = 404),
    )
)]
pub fn get_step() -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("steps" / String / String)
        .and(warp::get())
        .and(warp::query::<StepQuery>())
        .and_then(get_step_handler)
}

pub async fn get_step_handler(
    flow: String,
    step: String,
    query: StepQuery,
) -> Result<Box<dyn warp::Reply>, Infallible> {
    let flow: Flow = catch_error!(flow
        .parse()
        .map_err(|_| Error::BadRequest(format!("flow {}", flow))));
    let step: TransactionStep = catch_error!(step
        .parse()
        .map_err(|_| Error::BadRequest(format!("step {}", step))));
    let info = catch_empty!(
        display_info(flow, step),
        format!("{:?} has no {:?} step", flow, step)
    );

    response!(&StepDisplay {
        flow,
        step,
        info,
        transaction_hash: query.transaction_hash,
    })
}

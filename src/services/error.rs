use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::convert::Infallible;
use thiserror::Error;
use warp::{Rejection, Reply};

use crate::graphql::GraphqlError;

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";
pub const USER_REJECTED_MESSAGE: &str = "Transaction rejected by the user";

/// EIP-1193 `userRejectedRequest`.
const USER_REJECTED_CODE: i64 = 4001;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found")]
    NotFound,
    #[error("Invalid parameter: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Graphql(#[from] GraphqlError),
    #[error("Failed serializing response: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Serialize, Debug)]
struct ErrorResponse {
    message: String,
    status: String,
}

impl warp::reject::Reject for Error {}

impl Error {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::Graphql(e) => {
                log::error!("graphql query failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR_MESSAGE.to_string(),
                )
            }
            Error::Serialization(e) => {
                log::error!("{}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_ERROR_MESSAGE.to_string(),
                )
            }
        }
    }
}

/// JSON error body with the given status.
pub fn error_reply(code: StatusCode, message: String) -> warp::reply::WithStatus<warp::reply::Json> {
    let json = warp::reply::json(&ErrorResponse {
        status: code.to_string(),
        message,
    });
    warp::reply::with_status(json, code)
}

impl Reply for Error {
    fn into_response(self) -> warp::reply::Response {
        let (code, message) = self.status_and_message();
        error_reply(code, message).into_response()
    }
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(e) = err.find::<Error>() {
        e.status_and_message()
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed".to_string(),
        )
    } else {
        log::error!("unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    };

    Ok(error_reply(code, message))
}

fn is_user_rejection(error: &Value) -> bool {
    if error.get("code").and_then(Value::as_i64) == Some(USER_REJECTED_CODE) {
        return true;
    }
    error
        .get("message")
        .and_then(Value::as_str)
        .map(|m| {
            let m = m.to_lowercase();
            m.contains("user rejected") || m.contains("user denied")
        })
        .unwrap_or(false)
}

/// Human readable message for an error raised by a wallet or the transaction
/// SDK. Wrapped errors (`.error`, `.data`) are unwrapped first.
pub fn format_error(error: &Value) -> String {
    let mut current = error;
    loop {
        if is_user_rejection(current) {
            return USER_REJECTED_MESSAGE.to_string();
        }
        if let Some(inner) = current.get("error").filter(|e| e.is_object()) {
            current = inner;
            continue;
        }
        if let Some(message) = current
            .get("data")
            .and_then(|d| d.get("message"))
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
        if let Some(message) = current.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
        return match current {
            Value::String(message) if !message.is_empty() => message.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        };
    }
}

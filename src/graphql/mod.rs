pub mod enums;
pub mod queries;
mod types;

pub use self::enums::*;
pub use self::queries::*;
pub use self::types::*;

use crate::cfg::GraphqlConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphqlError {
    #[error("request to graphql api failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("graphql api returned errors: {}", .0.join("; "))]
    Api(Vec<String>),
    #[error("graphql response has no data")]
    EmptyData,
}

#[derive(Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Deserialize)]
struct GraphqlErrorEntry {
    message: String,
}

#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http_client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl GraphqlClient {
    pub fn new(cfg: &GraphqlConfig) -> reqwest::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(GraphqlClient {
            http_client,
            url: cfg.url.clone(),
            api_key: cfg.api_key.clone(),
        })
    }

    pub async fn query<V, T>(&self, document: &str, variables: V) -> Result<T, GraphqlError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let mut request = self.http_client.post(&self.url).json(&GraphqlRequest {
            query: document,
            variables,
        });
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .await?
            .error_for_status()?
            .json::<GraphqlResponse<T>>()
            .await?;

        if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            log::warn!("graphql errors: {:?}", messages);
            return Err(GraphqlError::Api(messages));
        }
        response.data.ok_or(GraphqlError::EmptyData)
    }
}

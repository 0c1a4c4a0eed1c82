pub mod asset;
pub use self::asset::*;

pub mod collection;
pub use self::collection::*;

pub mod errors;
pub use self::errors::*;

pub mod explore;
pub use self::explore::*;

pub mod home;
pub use self::home::*;

pub mod step;
pub use self::step::*;

pub mod swagger;
pub use self::swagger::*;

pub mod user;
pub use self::user::*;

use moka::future::Cache;
use serde::Deserialize;
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;
use utoipa::IntoParams;

use crate::cfg::CacheConfig;
use crate::services::error::Error;

pub type ResponseCache = Cache<u64, Value>;

pub fn response_cache(cfg: &CacheConfig) -> ResponseCache {
    Cache::builder()
        .max_capacity(cfg.capacity)
        .time_to_live(Duration::from_secs(cfg.ttl_secs))
        .build()
}

pub fn calculate_hash<T: Hash>(t: &T) -> u64 {
    let mut s = DefaultHasher::new();
    t.hash(&mut s);
    s.finish()
}

pub fn parse_chain_id(value: &str) -> Result<u64, Error> {
    value
        .parse()
        .map_err(|_| Error::BadRequest(format!("chainId {}", value)))
}

/// Account viewing the page, used for the `owned` quantity of assets.
#[derive(Debug, Clone, Default, Deserialize, Hash, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccountQuery {
    pub account: Option<String>,
}

#[macro_export]
macro_rules! response {
    ($x:expr) => {
        Ok(Box::new(warp::reply::with_status(
            warp::reply::json($x),
            warp::http::StatusCode::OK,
        )))
    };
}

/// Unwraps a `Result`, answering with the matching error reply on `Err`.
#[macro_export]
macro_rules! catch_error {
    ($x:expr) => {
        match $x {
            Ok(value) => value,
            Err(e) => {
                let e: $crate::services::error::Error = e.into();
                return Ok(Box::new(e));
            }
        }
    };
}

/// Unwraps an `Option`, answering `404` on `None`.
#[macro_export]
macro_rules! catch_empty {
    ($x:expr, $msg:expr) => {
        match $x {
            Some(value) => value,
            None => {
                log::debug!("{}", $msg);
                return Ok(Box::new($crate::services::error::Error::NotFound));
            }
        }
    };
}

/// Exposes a module's `ApiDoc` as a modifier merged into the service document.
#[macro_export]
macro_rules! api_doc_addon {
    ($doc:ident) => {
        pub struct ApiDocAddon;

        impl utoipa::Modify for ApiDocAddon {
            fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
                openapi.merge(<$doc as utoipa::OpenApi>::openapi());
            }
        }
    };
}

/// Returns the cached JSON for `$key`, or evaluates `$value`, caches its JSON
/// and returns it.
#[macro_export]
macro_rules! cached_response {
    ($cache:expr, $key:expr, $value:expr) => {{
        let hash = $crate::handlers::calculate_hash(&$key);
        match $cache.get(&hash) {
            Some(cached) => {
                log::trace!("cache hit {}", hash);
                $crate::response!(&cached)
            }
            None => {
                let value = $crate::catch_error!(serde_json::to_value(&$value));
                $cache.insert(hash, value.clone()).await;
                $crate::response!(&value)
            }
        }
    }};
}

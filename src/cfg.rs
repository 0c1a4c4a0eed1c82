use config::{self, ConfigError, Environment};
use serde::{Deserialize, Deserializer};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

use crate::query_params::CollectionKey;

fn default_http_address() -> SocketAddr {
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080))
}

fn default_graphql_url() -> String {
    String::from("http://localhost:4000/graphql")
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_pagination_limit() -> usize {
    12
}

fn default_home_tokens_limit() -> usize {
    12
}

fn default_cache_ttl_secs() -> u64 {
    60
}

fn default_cache_capacity() -> u64 {
    1000
}

/// Reads `a,b,c` from a single environment variable.
fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}

/// Like [`comma_list`], lower-casing every entry. Addresses are matched
/// against the lower-case form the API returns.
fn lowercase_comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(comma_list(deserializer)?
        .into_iter()
        .map(|s| s.to_lowercase())
        .collect())
}

#[derive(Debug, Deserialize, Clone)]
pub struct GraphqlConfig {
    #[serde(default = "default_graphql_url")]
    pub url: String,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        GraphqlConfig {
            url: default_graphql_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Featured content of the home page.
#[derive(Debug, Deserialize, Clone)]
pub struct HomeConfig {
    /// Asset ids, `chainId-collection-tokenId`.
    #[serde(default, deserialize_with = "lowercase_comma_list")]
    pub tokens: Vec<String>,
    /// Collection keys, `chainId-address`.
    #[serde(default, deserialize_with = "lowercase_comma_list")]
    pub collections: Vec<String>,
    #[serde(default, deserialize_with = "lowercase_comma_list")]
    pub users: Vec<String>,
    #[serde(default = "default_home_tokens_limit")]
    pub tokens_limit: usize,
}

impl HomeConfig {
    /// Configured collections that are well-formed keys.
    pub fn collection_keys(&self) -> Vec<CollectionKey> {
        self.collections
            .iter()
            .filter_map(|c| {
                let key = CollectionKey::parse(c);
                if key.is_none() {
                    log::warn!("ignoring malformed home collection {}", c);
                }
                key
            })
            .collect()
    }
}

impl Default for HomeConfig {
    fn default() -> Self {
        HomeConfig {
            tokens: Vec::new(),
            collections: Vec::new(),
            users: Vec::new(),
            tokens_limit: default_home_tokens_limit(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            ttl_secs: default_cache_ttl_secs(),
            capacity: default_cache_capacity(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_http_address")]
    pub http_address: SocketAddr,
    #[serde(default)]
    pub graphql: GraphqlConfig,
    #[serde(default)]
    pub home: HomeConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default = "default_pagination_limit")]
    pub pagination_limit: usize,
}

impl ApiConfig {
    pub fn new() -> Result<ApiConfig, ConfigError> {
        let prefix = std::env::var("PREFIX").unwrap_or_else(|_| String::from("marketplace_api"));
        config::Config::builder()
            .add_source(Environment::with_prefix(&prefix).separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_address: default_http_address(),
            graphql: GraphqlConfig::default(),
            home: HomeConfig::default(),
            cache: CacheConfig::default(),
            pagination_limit: default_pagination_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_lists_skip_blank_entries() {
        let home: HomeConfig = serde_json::from_value(serde_json::json!({
            "tokens": "1-0xabc-1, 1-0xabc-2,,",
            "collections": "1-0xabc,broken",
        }))
        .unwrap();
        assert_eq!(home.tokens, vec!["1-0xabc-1", "1-0xabc-2"]);
        assert_eq!(home.tokens_limit, 12);
        assert_eq!(home.collection_keys().len(), 1);
        assert!(home.users.is_empty());
    }

    #[test]
    fn home_addresses_are_lower_cased() {
        let home: HomeConfig = serde_json::from_value(serde_json::json!({
            "tokens": "1-0xAbC-1",
            "collections": "137-0xDeF0",
            "users": "0xA1b2,0xc3D4",
        }))
        .unwrap();
        assert_eq!(home.tokens, vec!["1-0xabc-1"]);
        assert_eq!(home.collection_keys()[0].address, "0xdef0");
        assert_eq!(home.users, vec!["0xa1b2", "0xc3d4"]);
    }

    #[test]
    fn defaults_apply_without_environment() {
        let cfg: ApiConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg.pagination_limit, 12);
        assert_eq!(cfg.graphql.timeout_secs, 30);
        assert_eq!(cfg.http_address.port(), 8080);
    }
}

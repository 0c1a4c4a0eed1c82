pub mod filter;
pub mod order;
pub mod pagination;

pub use self::filter::*;
pub use self::order::*;
pub use self::pagination::*;

/// Decoded URL query string, keeping repeated keys and their order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryPairs(Vec<(String, String)>);

impl QueryPairs {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        QueryPairs(pairs)
    }

    /// Parses a raw `a=1&b=2` query string the same way the HTTP layer does.
    pub fn parse(raw: &str) -> Result<Self, serde_urlencoded::de::Error> {
        serde_urlencoded::from_str::<Vec<(String, String)>>(raw).map(QueryPairs)
    }

    /// First non-empty value for `key`.
    pub fn get<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        self.get_all(key).find(|v| !v.is_empty())
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.trim()))
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn into_inner(self) -> Vec<(String, String)> {
        self.0
    }
}

impl From<Vec<(String, String)>> for QueryPairs {
    fn from(value: Vec<(String, String)>) -> Self {
        QueryPairs(value)
    }
}

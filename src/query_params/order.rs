use super::QueryPairs;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetOrderBy {
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
    SalesMinUnitPriceInRefAsc,
    SalesMinUnitPriceInRefDesc,
}

impl AssetOrderBy {
    /// `orderBy` from the URL, defaulting to newest first.
    pub fn from_query(query: &QueryPairs) -> Self {
        query
            .get("orderBy")
            .and_then(|o| o.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for AssetOrderBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED_AT_DESC" => Ok(AssetOrderBy::CreatedAtDesc),
            "CREATED_AT_ASC" => Ok(AssetOrderBy::CreatedAtAsc),
            "SALES_MIN_UNIT_PRICE_IN_REF_ASC" => Ok(AssetOrderBy::SalesMinUnitPriceInRefAsc),
            "SALES_MIN_UNIT_PRICE_IN_REF_DESC" => Ok(AssetOrderBy::SalesMinUnitPriceInRefDesc),
            _ => Err(()),
        }
    }
}

impl Display for AssetOrderBy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetOrderBy::CreatedAtDesc => write!(f, "CREATED_AT_DESC"),
            AssetOrderBy::CreatedAtAsc => write!(f, "CREATED_AT_ASC"),
            AssetOrderBy::SalesMinUnitPriceInRefAsc => write!(f, "SALES_MIN_UNIT_PRICE_IN_REF_ASC"),
            AssetOrderBy::SalesMinUnitPriceInRefDesc => {
                write!(f, "SALES_MIN_UNIT_PRICE_IN_REF_DESC")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_order_falls_back_to_newest() {
        let query = QueryPairs::parse("orderBy=PRICE_HIGH").unwrap();
        assert_eq!(AssetOrderBy::from_query(&query), AssetOrderBy::CreatedAtDesc);
    }

    #[test]
    fn display_matches_graphql_enum() {
        for order in [
            AssetOrderBy::CreatedAtDesc,
            AssetOrderBy::CreatedAtAsc,
            AssetOrderBy::SalesMinUnitPriceInRefAsc,
            AssetOrderBy::SalesMinUnitPriceInRefDesc,
        ] {
            assert_eq!(order.to_string().parse::<AssetOrderBy>(), Ok(order));
            assert_eq!(
                serde_json::to_value(order).unwrap(),
                serde_json::Value::String(order.to_string())
            );
        }
    }
}

//! Explore-page filter state and its translation into the GraphQL
//! `AssetFilter` condition.

use super::QueryPairs;
use crate::currency::{parse_units, CurrencyDict};
use crate::graphql::OfferStatus;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

const TRAITS_PREFIX: &str = "traits[";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OfferFilter {
    Fixed,
    Bids,
}

impl FromStr for OfferFilter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fixed" => Ok(OfferFilter::Fixed),
            "bids" => Ok(OfferFilter::Bids),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for OfferFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferFilter::Fixed => write!(f, "fixed"),
            OfferFilter::Bids => write!(f, "bids"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct CurrencyFilter {
    pub id: String,
    pub decimals: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct TraitFilter {
    #[serde(rename = "type")]
    pub typ: String,
    pub values: Vec<String>,
}

/// `chainId-address` key identifying a collection across chains.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionKey {
    pub chain_id: u64,
    pub address: String,
}

impl CollectionKey {
    /// Splits on the last `-`. Anything without a numeric chain id and a
    /// non-empty address yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let (chain_id, address) = value.rsplit_once('-')?;
        if chain_id.is_empty() || address.is_empty() {
            return None;
        }
        let chain_id = chain_id.parse::<u64>().ok()?;
        Some(CollectionKey {
            chain_id,
            address: address.to_string(),
        })
    }
}

impl std::fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.chain_id, self.address)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub chains: Vec<u64>,
    pub search: Option<String>,
    #[schema(value_type = Option<String>)]
    pub min_price: Option<BigDecimal>,
    #[schema(value_type = Option<String>)]
    pub max_price: Option<BigDecimal>,
    pub collection: Option<String>,
    pub currency: Option<CurrencyFilter>,
    pub traits: Vec<TraitFilter>,
    pub offers: Option<OfferFilter>,
}

/// Plain non-negative decimal (`12`, `0.5`, `.5`). Exponents and signs are
/// refused so a query string cannot request an arbitrarily large scale.
fn parse_decimal(value: &str) -> Option<BigDecimal> {
    let value = value.trim();
    let mut seen_dot = false;
    let mut digits = 0;
    for c in value.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' if !seen_dot => seen_dot = true,
            _ => return None,
        }
    }
    if digits == 0 {
        return None;
    }
    let normalized = if value.starts_with('.') {
        format!("0{value}")
    } else {
        value.to_string()
    };
    BigDecimal::from_str(normalized.trim_end_matches('.')).ok()
}

fn trait_type(key: &str) -> Option<&str> {
    key.strip_prefix(TRAITS_PREFIX)?
        .strip_suffix(']')
        .filter(|t| !t.is_empty())
}

impl Filter {
    /// Reads the explore filter from URL parameters. Values that do not
    /// parse are dropped rather than rejected.
    pub fn from_query(query: &QueryPairs, currencies: &CurrencyDict) -> Self {
        let mut chains = Vec::new();
        for value in query.get_all("chains") {
            for part in value.split(',') {
                if let Ok(chain) = part.trim().parse::<u64>() {
                    if !chains.contains(&chain) {
                        chains.push(chain);
                    }
                }
            }
        }

        let collection = query
            .get("collection")
            .filter(|c| CollectionKey::parse(c).is_some())
            .map(String::from);

        let currency = query.get("currency").and_then(|id| {
            let decimals = query
                .get("decimals")
                .and_then(|d| d.parse::<u8>().ok())
                .map(u32::from)
                .or_else(|| currencies.decimals(id));
            match decimals {
                Some(decimals) => Some(CurrencyFilter {
                    id: id.to_string(),
                    decimals,
                }),
                None => {
                    log::debug!("unknown decimals for currency {id}, ignoring currency filter");
                    None
                }
            }
        });

        let mut traits: Vec<TraitFilter> = Vec::new();
        for (key, value) in query.iter() {
            let Some(typ) = trait_type(key) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match traits.iter_mut().find(|t| t.typ == typ) {
                Some(t) => {
                    if !t.values.iter().any(|v| v == value) {
                        t.values.push(value.to_string())
                    }
                }
                None => traits.push(TraitFilter {
                    typ: typ.to_string(),
                    values: vec![value.to_string()],
                }),
            }
        }

        Filter {
            chains,
            search: query.get("search").map(String::from),
            min_price: query.get("minPrice").and_then(parse_decimal),
            max_price: query.get("maxPrice").and_then(parse_decimal),
            collection,
            currency,
            traits,
            offers: query.get("offers").and_then(|o| o.parse().ok()),
        }
    }

    /// Renders the filter back into URL parameters, in the normalized form
    /// `from_query` produces: chains de-duplicated, search and trait values
    /// trimmed, blanks omitted.
    pub fn to_query(&self) -> QueryPairs {
        let mut query = QueryPairs::default();
        let mut chains: Vec<u64> = Vec::with_capacity(self.chains.len());
        for chain in &self.chains {
            if !chains.contains(chain) {
                chains.push(*chain);
                query.push("chains", chain.to_string());
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.push("search", search);
        }
        if let Some(min) = &self.min_price {
            query.push("minPrice", min.to_string());
        }
        if let Some(max) = &self.max_price {
            query.push("maxPrice", max.to_string());
        }
        if let Some(collection) = &self.collection {
            query.push("collection", collection.as_str());
        }
        if let Some(currency) = &self.currency {
            query.push("currency", currency.id.as_str());
            query.push("decimals", currency.decimals.to_string());
        }
        if let Some(offers) = &self.offers {
            query.push("offers", offers.to_string());
        }
        for t in &self.traits {
            let key = format!("{TRAITS_PREFIX}{}]", t.typ);
            let mut seen: Vec<&str> = Vec::with_capacity(t.values.len());
            for value in t.values.iter().map(|v| v.trim()) {
                if !value.is_empty() && !seen.contains(&value) {
                    seen.push(value);
                    query.push(key.as_str(), value);
                }
            }
        }
        query
    }

    pub fn is_empty(&self) -> bool {
        *self == Filter::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InFilter<T> {
    #[serde(rename = "in")]
    pub values: Vec<T>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EqualTo<T> {
    pub equal_to: T,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter {
    pub includes_insensitive: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub greater_than_or_equal_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub less_than_or_equal_to: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionCondition {
    pub chain_id: EqualTo<u64>,
    pub address: EqualTo<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_id: Option<EqualTo<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EqualTo<OfferStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<RangeFilter>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SomeOffer {
    pub some: OfferCondition,
}

impl SomeOffer {
    fn active() -> Self {
        SomeOffer {
            some: OfferCondition {
                status: Some(EqualTo {
                    equal_to: OfferStatus::Active,
                }),
                ..Default::default()
            },
        }
    }
}

/// Backend-shaped `AssetFilter`. Every key is optional and only emitted
/// when the matching filter field is populated.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<InFilter<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<InFilter<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<StringFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traits: Option<Vec<TraitFilter>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<CollectionCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales: Option<SomeOffer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bids: Option<SomeOffer>,
}

impl AssetCondition {
    pub fn with_ids(ids: Vec<String>) -> Self {
        AssetCondition {
            id: Some(InFilter { values: ids }),
            ..Default::default()
        }
    }
}

fn unit_price_range(filter: &Filter, decimals: u32) -> Option<RangeFilter> {
    let range = RangeFilter {
        greater_than_or_equal_to: filter
            .min_price
            .as_ref()
            .map(|p| parse_units(p, decimals).to_string()),
        less_than_or_equal_to: filter
            .max_price
            .as_ref()
            .map(|p| parse_units(p, decimals).to_string()),
    };
    if range == RangeFilter::default() {
        None
    } else {
        Some(range)
    }
}

/// Translates explore filter state into the GraphQL asset condition.
pub fn convert_filter_to_asset_filter(filter: &Filter) -> AssetCondition {
    let mut condition = AssetCondition::default();

    if !filter.chains.is_empty() {
        condition.chain_id = Some(InFilter {
            values: filter.chains.clone(),
        });
    }

    if let Some(search) = filter.search.as_ref().filter(|s| !s.is_empty()) {
        condition.name = Some(StringFilter {
            includes_insensitive: search.clone(),
        });
    }

    if !filter.traits.is_empty() {
        condition.traits = Some(filter.traits.clone());
    }

    if let Some(key) = filter.collection.as_deref().and_then(CollectionKey::parse) {
        condition.collection = Some(CollectionCondition {
            chain_id: EqualTo {
                equal_to: key.chain_id,
            },
            address: EqualTo {
                equal_to: key.address,
            },
        });
    }

    if let Some(currency) = &filter.currency {
        condition.sales = Some(SomeOffer {
            some: OfferCondition {
                currency_id: Some(EqualTo {
                    equal_to: currency.id.clone(),
                }),
                status: Some(EqualTo {
                    equal_to: OfferStatus::Active,
                }),
                unit_price: unit_price_range(filter, currency.decimals),
            },
        });
    }

    match filter.offers {
        Some(OfferFilter::Fixed) if condition.sales.is_none() => {
            condition.sales = Some(SomeOffer::active())
        }
        Some(OfferFilter::Bids) => condition.bids = Some(SomeOffer::active()),
        _ => {}
    }

    condition
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_decimal_accepts_plain_numbers_only() {
        assert_eq!(parse_decimal("1.5"), BigDecimal::from_str("1.5").ok());
        assert_eq!(parse_decimal(".5"), BigDecimal::from_str("0.5").ok());
        assert_eq!(parse_decimal("2."), BigDecimal::from_str("2").ok());
        assert_eq!(parse_decimal("1e999999"), None);
        assert_eq!(parse_decimal("-1"), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("1.2.3"), None);
    }

    #[test]
    fn trait_type_extracts_bracketed_name() {
        assert_eq!(trait_type("traits[Color]"), Some("Color"));
        assert_eq!(trait_type("traits[]"), None);
        assert_eq!(trait_type("traits"), None);
        assert_eq!(trait_type("other[Color]"), None);
    }

    #[test]
    fn collection_key_splits_on_last_dash() {
        assert_eq!(
            CollectionKey::parse("137-0xabc"),
            Some(CollectionKey {
                chain_id: 137,
                address: "0xabc".to_string()
            })
        );
        assert_eq!(CollectionKey::parse("1-2-0xabc"), None);
        assert_eq!(CollectionKey::parse("-0xabc"), None);
        assert_eq!(CollectionKey::parse("1-"), None);
        assert_eq!(CollectionKey::parse("abc-0xabc"), None);
    }
}

//! Tests for URL filter parsing and the GraphQL asset condition.

use bigdecimal::BigDecimal;
use marketplace_api::currency::{format_units, parse_units, CurrencyDict};
use marketplace_api::graphql::CurrencyNode;
use marketplace_api::query_params::{
    convert_filter_to_asset_filter, CollectionKey, CurrencyFilter, Filter, OfferFilter,
    QueryPairs, TraitFilter,
};
use serde_json::json;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn currencies() -> CurrencyDict {
    CurrencyDict::new(vec![CurrencyNode {
        id: "1-0xusdc".to_string(),
        chain_id: Some(1),
        address: Some("0xusdc".to_string()),
        decimals: 6,
        symbol: "USDC".to_string(),
        image: None,
    }])
}

fn filter(raw: &str) -> Filter {
    Filter::from_query(&QueryPairs::parse(raw).unwrap(), &currencies())
}

fn condition(filter: &Filter) -> serde_json::Value {
    serde_json::to_value(convert_filter_to_asset_filter(filter)).unwrap()
}

fn dec(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

// ---------------------------------------------------------------------------
// Condition building
// ---------------------------------------------------------------------------

#[test]
fn test_empty_filter_has_no_clauses() {
    assert_eq!(condition(&Filter::default()), json!({}));
}

#[test]
fn test_only_populated_fields_produce_clauses() {
    let f = Filter {
        chains: vec![1, 137],
        search: Some("punk".to_string()),
        ..Default::default()
    };
    assert_eq!(
        condition(&f),
        json!({
            "chainId": { "in": [1, 137] },
            "name": { "includesInsensitive": "punk" },
        })
    );
}

#[test]
fn test_empty_search_is_ignored() {
    let f = Filter {
        search: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(condition(&f), json!({}));
}

#[test]
fn test_traits_pass_through() {
    let f = Filter {
        traits: vec![TraitFilter {
            typ: "Background".to_string(),
            values: vec!["Blue".to_string(), "Red".to_string()],
        }],
        ..Default::default()
    };
    assert_eq!(
        condition(&f),
        json!({ "traits": [{ "type": "Background", "values": ["Blue", "Red"] }] })
    );
}

#[test]
fn test_collection_is_split_on_last_dash() {
    let f = Filter {
        collection: Some("80001-0xabc".to_string()),
        ..Default::default()
    };
    assert_eq!(
        condition(&f),
        json!({
            "collection": {
                "chainId": { "equalTo": 80001 },
                "address": { "equalTo": "0xabc" },
            }
        })
    );
}

#[test]
fn test_malformed_collection_is_omitted() {
    for collection in ["invalid", "abc-0x1", "-0x1", "1-"] {
        let f = Filter {
            collection: Some(collection.to_string()),
            ..Default::default()
        };
        assert_eq!(condition(&f), json!({}), "{}", collection);
    }
}

#[test]
fn test_price_range_uses_currency_decimals() {
    let f = Filter {
        min_price: Some(dec("1.5")),
        max_price: Some(dec("20")),
        currency: Some(CurrencyFilter {
            id: "1-0xweth".to_string(),
            decimals: 18,
        }),
        ..Default::default()
    };
    assert_eq!(
        condition(&f),
        json!({
            "sales": {
                "some": {
                    "currencyId": { "equalTo": "1-0xweth" },
                    "status": { "equalTo": "ACTIVE" },
                    "unitPrice": {
                        "greaterThanOrEqualTo": "1500000000000000000",
                        "lessThanOrEqualTo": "20000000000000000000",
                    },
                }
            }
        })
    );
}

#[test]
fn test_price_without_currency_is_ignored() {
    let f = Filter {
        min_price: Some(dec("1")),
        ..Default::default()
    };
    assert_eq!(condition(&f), json!({}));
}

#[test]
fn test_currency_without_prices_filters_listings_only() {
    let f = Filter {
        currency: Some(CurrencyFilter {
            id: "1-0xusdc".to_string(),
            decimals: 6,
        }),
        ..Default::default()
    };
    assert_eq!(
        condition(&f),
        json!({
            "sales": {
                "some": {
                    "currencyId": { "equalTo": "1-0xusdc" },
                    "status": { "equalTo": "ACTIVE" },
                }
            }
        })
    );
}

#[test]
fn test_fixed_offers_do_not_override_currency_listing() {
    let f = Filter {
        offers: Some(OfferFilter::Fixed),
        currency: Some(CurrencyFilter {
            id: "1-0xusdc".to_string(),
            decimals: 6,
        }),
        ..Default::default()
    };
    let value = condition(&f);
    assert_eq!(
        value["sales"]["some"]["currencyId"]["equalTo"],
        json!("1-0xusdc")
    );
    assert!(value.get("bids").is_none());
}

#[test]
fn test_offer_kinds() {
    let fixed = Filter {
        offers: Some(OfferFilter::Fixed),
        ..Default::default()
    };
    assert_eq!(
        condition(&fixed),
        json!({ "sales": { "some": { "status": { "equalTo": "ACTIVE" } } } })
    );

    let bids = Filter {
        offers: Some(OfferFilter::Bids),
        ..Default::default()
    };
    assert_eq!(
        condition(&bids),
        json!({ "bids": { "some": { "status": { "equalTo": "ACTIVE" } } } })
    );
}

// ---------------------------------------------------------------------------
// Unit conversion
// ---------------------------------------------------------------------------

#[test]
fn test_parse_units_is_exact() {
    assert_eq!(parse_units(&dec("1.5"), 18).to_string(), "1500000000000000000");
    assert_eq!(parse_units(&dec("1.5"), 6).to_string(), "1500000");
    assert_eq!(parse_units(&dec("0.00000001"), 8).to_string(), "1");
    assert_eq!(parse_units(&dec("42"), 0).to_string(), "42");
    assert_eq!(parse_units(&dec("0.5"), 0).to_string(), "1");
    assert_eq!(parse_units(&dec("0.1234567"), 6).to_string(), "123457");
}

#[test]
fn test_format_units() {
    assert_eq!(format_units(&dec("1500000000000000000"), 18), "1.5");
    assert_eq!(format_units(&dec("100000000"), 8), "1");
    assert_eq!(format_units(&dec("0"), 6), "0");
}

// ---------------------------------------------------------------------------
// URL parsing
// ---------------------------------------------------------------------------

#[test]
fn test_from_query_reads_every_parameter() {
    let f = filter(
        "chains=1&chains=137,1&search=ape&minPrice=1.5&maxPrice=10&collection=1-0xabc\
         &currency=1-0xweth&decimals=18&offers=bids\
         &traits%5BEyes%5D=Laser&traits%5BHat%5D=Cap&traits%5BEyes%5D=Sleepy&traits%5BEyes%5D=Laser",
    );
    assert_eq!(f.chains, vec![1, 137]);
    assert_eq!(f.search.as_deref(), Some("ape"));
    assert_eq!(f.min_price, Some(dec("1.5")));
    assert_eq!(f.max_price, Some(dec("10")));
    assert_eq!(f.collection.as_deref(), Some("1-0xabc"));
    assert_eq!(
        f.currency,
        Some(CurrencyFilter {
            id: "1-0xweth".to_string(),
            decimals: 18,
        })
    );
    assert_eq!(f.offers, Some(OfferFilter::Bids));
    assert_eq!(
        f.traits,
        vec![
            TraitFilter {
                typ: "Eyes".to_string(),
                values: vec!["Laser".to_string(), "Sleepy".to_string()],
            },
            TraitFilter {
                typ: "Hat".to_string(),
                values: vec!["Cap".to_string()],
            },
        ]
    );
}

#[test]
fn test_from_query_drops_unparseable_values() {
    let f = filter("chains=eth&minPrice=abc&collection=invalid&offers=all&currency=1-0xunknown");
    assert!(f.is_empty());
}

#[test]
fn test_currency_decimals_fall_back_to_dictionary() {
    let f = filter("currency=1-0xusdc&minPrice=2");
    assert_eq!(
        f.currency,
        Some(CurrencyFilter {
            id: "1-0xusdc".to_string(),
            decimals: 6,
        })
    );
    assert_eq!(
        condition(&f)["sales"]["some"]["unitPrice"]["greaterThanOrEqualTo"],
        json!("2000000")
    );
}

#[test]
fn test_to_query_round_trips() {
    let f = filter("chains=1&search=ape&maxPrice=0.25&currency=1-0xusdc&offers=fixed&traits%5BEyes%5D=Laser");
    let rendered = f.to_query();
    assert_eq!(Filter::from_query(&rendered, &currencies()), f);
}

#[test]
fn test_to_query_renders_normalized_filter() {
    let f = Filter {
        chains: vec![1, 1, 137],
        search: Some(" ape ".to_string()),
        traits: vec![TraitFilter {
            typ: "Eyes".to_string(),
            values: vec![" Laser".to_string(), "Laser ".to_string(), " ".to_string()],
        }],
        ..Filter::default()
    };
    let parsed = Filter::from_query(&f.to_query(), &currencies());
    assert_eq!(parsed.chains, vec![1, 137]);
    assert_eq!(parsed.search.as_deref(), Some("ape"));
    assert_eq!(parsed.traits[0].values, vec!["Laser".to_string()]);
    assert_eq!(Filter::from_query(&parsed.to_query(), &currencies()), parsed);

    let blank = Filter {
        search: Some("   ".to_string()),
        ..Filter::default()
    };
    assert!(blank.to_query().into_inner().is_empty());
}

#[test]
fn test_collection_key_parsing() {
    assert_eq!(
        CollectionKey::parse("1-0xabc"),
        Some(CollectionKey {
            chain_id: 1,
            address: "0xabc".to_string(),
        })
    );
    assert_eq!(CollectionKey::parse("invalid"), None);
}

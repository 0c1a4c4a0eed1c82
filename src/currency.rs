use crate::graphql::{CurrencyNode, GraphqlClient, GraphqlError, Queries};
use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use std::{collections::HashMap, sync::Arc};

/// Currencies known to the marketplace, keyed by currency id.
#[derive(Debug, Clone, Default)]
pub struct CurrencyDict(Arc<HashMap<String, CurrencyNode>>);

impl CurrencyDict {
    pub fn new(currencies: Vec<CurrencyNode>) -> Self {
        let mut map = HashMap::new();
        for currency in currencies {
            map.insert(currency.id.clone(), currency);
        }
        CurrencyDict(Arc::new(map))
    }

    pub async fn load(client: &GraphqlClient) -> Result<Self, GraphqlError> {
        let currencies = Queries::fetch_currencies(client).await?;
        log::info!("loaded {} currencies", currencies.len());
        Ok(Self::new(currencies))
    }

    pub fn get(&self, id: &str) -> Option<&CurrencyNode> {
        self.0.get(id)
    }

    pub fn decimals(&self, id: &str) -> Option<u32> {
        self.get(id).map(|c| c.decimals)
    }
}

fn ten_pow(decimals: u32) -> BigDecimal {
    BigDecimal::new(BigInt::from(1), -(decimals as i64))
}

/// Converts a human amount (`1.5`) into the currency's smallest unit
/// (`1500000000000000000` for 18 decimals), rounding half up to an integer.
pub fn parse_units(value: &BigDecimal, decimals: u32) -> BigDecimal {
    (value.clone() * ten_pow(decimals)).round(0).with_scale(0)
}

/// Inverse of [`parse_units`]: renders a smallest-unit integer as a
/// human amount with trailing zeros removed.
pub fn format_units(value: &BigDecimal, decimals: u32) -> String {
    let (int, scale) = value.as_bigint_and_exponent();
    BigDecimal::new(int, scale + decimals as i64)
        .normalized()
        .to_string()
}

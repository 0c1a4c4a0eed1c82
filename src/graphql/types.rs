use super::*;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Address = String;

/// Relay-style list wrapper returned by every list field of the API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Connection<T> {
    pub total_count: Option<i64>,
    #[serde(default)]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            total_count: None,
            nodes: Vec::new(),
        }
    }
}

impl<T> Connection<T> {
    pub fn total(&self) -> i64 {
        self.total_count.unwrap_or(self.nodes.len() as i64)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationNode {
    pub status: Option<VerificationStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNode {
    pub address: Address,
    pub name: Option<String>,
    pub image: Option<String>,
    pub cover: Option<String>,
    pub description: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub website: Option<String>,
    pub verification: Option<VerificationNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyNode {
    pub id: String,
    pub chain_id: Option<u64>,
    pub address: Option<Address>,
    pub decimals: u32,
    pub symbol: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferNode {
    pub id: String,
    #[serde(rename = "type")]
    pub typ: Option<OfferType>,
    pub unit_price: BigDecimal,
    pub available_quantity: Option<BigDecimal>,
    pub quantity: Option<BigDecimal>,
    pub status: Option<OfferStatus>,
    pub created_at: Option<DateTime<Utc>>,
    pub expired_at: Option<DateTime<Utc>>,
    pub maker_address: Option<Address>,
    pub maker: Option<AccountNode>,
    pub taker_address: Option<Address>,
    pub currency: Option<CurrencyNode>,
    pub asset: Option<Box<AssetNode>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionNode {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
    pub expire_at: Option<DateTime<Utc>>,
    pub reserve_price: Option<BigDecimal>,
    pub creator_address: Option<Address>,
    pub currency: Option<CurrencyNode>,
    pub bids: Option<Connection<OfferNode>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipNode {
    pub owner_address: Address,
    pub quantity: BigDecimal,
    pub owner: Option<AccountNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OwnedNode {
    pub quantity: BigDecimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryNode {
    pub action: HistoryAction,
    pub date: DateTime<Utc>,
    pub unit_price: Option<BigDecimal>,
    pub quantity: Option<BigDecimal>,
    pub from_address: Address,
    pub from: Option<AccountNode>,
    pub to_address: Option<Address>,
    pub to: Option<AccountNode>,
    pub transaction_hash: Option<String>,
    pub currency: Option<CurrencyNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeNode {
    pub transaction_hash: String,
    pub timestamp: DateTime<Utc>,
    pub unit_price: Option<BigDecimal>,
    pub quantity: BigDecimal,
    pub buyer_address: Address,
    pub buyer: Option<AccountNode>,
    pub seller_address: Address,
    pub seller: Option<AccountNode>,
    pub currency: Option<CurrencyNode>,
    pub asset: Option<Box<AssetNode>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoyaltyNode {
    pub account: Address,
    /// Basis points.
    pub value: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnlockedContentNode {
    pub url: String,
    pub mimetype: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraitNode {
    #[serde(rename = "type")]
    pub typ: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTraitValueNode {
    pub value: String,
    pub number_of_assets: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionTraitNode {
    #[serde(rename = "type")]
    pub typ: String,
    pub values: Option<Connection<CollectionTraitValueNode>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInRefNode {
    pub value_in_ref: BigDecimal,
    pub ref_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionNode {
    pub chain_id: u64,
    pub address: Address,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub cover: Option<String>,
    pub standard: Option<CollectionStandard>,
    pub twitter: Option<String>,
    pub discord: Option<String>,
    pub website: Option<String>,
    pub deployer_address: Option<Address>,
    pub deployer: Option<AccountNode>,
    pub floor_price: Option<PriceInRefNode>,
    pub total_volume: Option<PriceInRefNode>,
    pub number_of_owners: Option<i64>,
    pub supply: Option<BigDecimal>,
    pub traits: Option<Connection<CollectionTraitNode>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetNode {
    pub id: String,
    pub chain_id: u64,
    pub collection_address: Address,
    pub token_id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_mimetype: Option<String>,
    pub animation_url: Option<String>,
    pub unlocked_content: Option<UnlockedContentNode>,
    pub has_unlockable_content: Option<bool>,
    pub quantity: Option<BigDecimal>,
    pub collection: Option<CollectionNode>,
    pub creator: Option<AccountNode>,
    pub royalties: Option<Vec<RoyaltyNode>>,
    pub owned: Option<OwnedNode>,
    pub ownerships: Option<Connection<OwnershipNode>>,
    /// Quantities of every ownership, unpaged.
    pub supplies: Option<Connection<OwnedNode>>,
    pub sales: Option<Connection<OfferNode>>,
    pub bids: Option<Connection<OfferNode>>,
    pub auctions: Option<Connection<AuctionNode>>,
    pub histories: Option<Connection<HistoryNode>>,
    pub traits: Option<Connection<TraitNode>>,
}

use crate::graphql::{
    AccountNode, AssetNode, AuctionNode, CollectionNode, CollectionStandard, Connection,
    CurrencyNode, HistoryAction, HistoryNode, OfferNode, OfferStatus, OwnershipNode,
    PriceInRefNode, RoyaltyNode, TradeNode, VerificationNode, VerificationStatus,
};
use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Currency {
    pub id: String,
    pub decimals: u32,
    pub symbol: String,
    pub image: Option<String>,
}

impl Currency {
    pub fn from_graphql(node: &CurrencyNode) -> Self {
        Currency {
            id: node.id.clone(),
            decimals: node.decimals,
            symbol: node.symbol.clone(),
            image: node.image.clone(),
        }
    }
}

fn is_verified(verification: &Option<VerificationNode>) -> bool {
    matches!(
        verification,
        Some(VerificationNode {
            status: Some(VerificationStatus::Validated)
        })
    )
}

/// Offer that can still be taken: ACTIVE (or without a status) and not past
/// its expiry.
fn is_live(offer: &OfferNode, now: DateTime<Utc>) -> bool {
    matches!(offer.status, None | Some(OfferStatus::Active))
        && offer.expired_at.map_or(true, |expired_at| expired_at > now)
}

fn lowest_price<'a>(offers: &'a [OfferNode], now: DateTime<Utc>) -> Option<&'a OfferNode> {
    offers
        .iter()
        .filter(|o| is_live(o, now))
        .min_by(|a, b| a.unit_price.cmp(&b.unit_price))
}

fn highest_price<'a>(offers: &'a [OfferNode], now: DateTime<Utc>) -> Option<&'a OfferNode> {
    offers
        .iter()
        .filter(|o| is_live(o, now))
        .max_by(|a, b| a.unit_price.cmp(&b.unit_price))
}

fn timestamp(date: &Option<DateTime<Utc>>) -> Option<i64> {
    date.as_ref().map(DateTime::timestamp)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub address: String,
    pub name: Option<String>,
    pub image: Option<String>,
    pub verified: bool,
}

impl User {
    pub fn from_graphql(node: &AccountNode) -> Self {
        User {
            address: node.address.clone(),
            name: node.name.clone(),
            image: node.image.clone(),
            verified: is_verified(&node.verification),
        }
    }

    /// Account known only by its address.
    pub fn from_address(address: &str) -> Self {
        User {
            address: address.to_string(),
            name: None,
            image: None,
            verified: false,
        }
    }

    /// Prefers the resolved account and falls back to the bare address.
    pub fn from_parts(account: &Option<AccountNode>, address: &str) -> Self {
        match account {
            Some(account) => Self::from_graphql(account),
            None => Self::from_address(address),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FullUser {
    #[serde(flatten)]
    pub user: User,
    pub cover: Option<String>,
    pub description: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
    pub website: Option<String>,
}

impl FullUser {
    pub fn from_graphql(node: &AccountNode) -> Self {
        FullUser {
            user: User::from_graphql(node),
            cover: node.cover.clone(),
            description: node.description.clone(),
            twitter: node.twitter.clone(),
            instagram: node.instagram.clone(),
            website: node.website.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ownership {
    #[serde(flatten)]
    pub owner: User,
    #[schema(value_type = String)]
    pub quantity: BigDecimal,
}

impl Ownership {
    pub fn from_graphql(node: &OwnershipNode) -> Self {
        Ownership {
            owner: User::from_parts(&node.owner, &node.owner_address),
            quantity: node.quantity.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Royalty {
    pub account: String,
    #[schema(value_type = String)]
    pub percent: BigDecimal,
}

impl Royalty {
    pub fn from_graphql(node: &RoyaltyNode) -> Self {
        Royalty {
            account: node.account.clone(),
            percent: (BigDecimal::from(node.value) / BigDecimal::from(100)).normalized(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetSummary {
    pub id: String,
    pub chain_id: u64,
    pub collection_address: String,
    pub token_id: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

impl AssetSummary {
    pub fn from_graphql(node: &AssetNode) -> Self {
        AssetSummary {
            id: node.id.clone(),
            chain_id: node.chain_id,
            collection_address: node.collection_address.clone(),
            token_id: node.token_id.clone(),
            name: node.name.clone(),
            image: node.image.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    #[schema(value_type = String)]
    pub unit_price: BigDecimal,
    #[schema(value_type = String)]
    pub available_quantity: BigDecimal,
    pub created_at: Option<i64>,
    pub expired_at: Option<i64>,
    pub currency: Option<Currency>,
    pub maker: User,
}

impl Sale {
    pub fn from_graphql(node: &OfferNode) -> Self {
        Sale {
            id: node.id.clone(),
            unit_price: node.unit_price.clone(),
            available_quantity: node.available_quantity.clone().unwrap_or_default(),
            created_at: timestamp(&node.created_at),
            expired_at: timestamp(&node.expired_at),
            currency: node.currency.as_ref().map(Currency::from_graphql),
            maker: User::from_parts(&node.maker, node.maker_address.as_deref().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleFull {
    #[serde(flatten)]
    pub sale: Sale,
    pub status: Option<OfferStatus>,
    #[schema(value_type = Option<String>)]
    pub quantity: Option<BigDecimal>,
    pub asset: Option<AssetSummary>,
}

impl SaleFull {
    pub fn from_graphql(node: &OfferNode) -> Self {
        SaleFull {
            sale: Sale::from_graphql(node),
            status: node.status.clone(),
            quantity: node.quantity.clone(),
            asset: node.asset.as_deref().map(AssetSummary::from_graphql),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: String,
    #[schema(value_type = String)]
    pub unit_price: BigDecimal,
    #[schema(value_type = String)]
    pub available_quantity: BigDecimal,
    /// `unit_price * available_quantity`, in the currency's smallest unit.
    #[schema(value_type = String)]
    pub amount: BigDecimal,
    pub created_at: Option<i64>,
    pub expired_at: Option<i64>,
    pub currency: Option<Currency>,
    pub maker: User,
}

impl Bid {
    pub fn from_graphql(node: &OfferNode) -> Self {
        let available_quantity = node.available_quantity.clone().unwrap_or_default();
        Bid {
            id: node.id.clone(),
            amount: &node.unit_price * &available_quantity,
            unit_price: node.unit_price.clone(),
            available_quantity,
            created_at: timestamp(&node.created_at),
            expired_at: timestamp(&node.expired_at),
            currency: node.currency.as_ref().map(Currency::from_graphql),
            maker: User::from_parts(&node.maker, node.maker_address.as_deref().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Auction {
    pub id: String,
    pub created_at: Option<i64>,
    pub end_at: Option<i64>,
    pub expire_at: Option<i64>,
    #[schema(value_type = Option<String>)]
    pub reserve_price: Option<BigDecimal>,
    pub currency: Option<Currency>,
    pub creator: Option<User>,
    pub best_bid: Option<Bid>,
    pub reserve_price_met: bool,
    pub ended: bool,
}

impl Auction {
    /// Converts an auction together with its highest live bid. Cancelled,
    /// filled and expired bids never count towards the reserve price.
    pub fn from_graphql(node: &AuctionNode, now: DateTime<Utc>) -> Self {
        let best_bid = node
            .bids
            .as_ref()
            .and_then(|bids| highest_price(&bids.nodes, now))
            .map(Bid::from_graphql);

        let reserve_price_met = match (&best_bid, &node.reserve_price) {
            (Some(bid), Some(reserve)) => bid.unit_price >= *reserve,
            (Some(_), None) => true,
            (None, _) => false,
        };

        Auction {
            id: node.id.clone(),
            created_at: timestamp(&node.created_at),
            end_at: timestamp(&node.end_at),
            expire_at: timestamp(&node.expire_at),
            reserve_price: node.reserve_price.clone(),
            currency: node.currency.as_ref().map(Currency::from_graphql),
            creator: node.creator_address.as_deref().map(User::from_address),
            best_bid,
            reserve_price_met,
            ended: node.end_at.map_or(false, |end| end <= now),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub action: HistoryAction,
    pub date: i64,
    #[schema(value_type = Option<String>)]
    pub unit_price: Option<BigDecimal>,
    #[schema(value_type = Option<String>)]
    pub quantity: Option<BigDecimal>,
    pub from: User,
    pub to: Option<User>,
    pub transaction_hash: Option<String>,
    pub currency: Option<Currency>,
}

impl History {
    pub fn from_graphql(node: &HistoryNode) -> Self {
        History {
            action: node.action.clone(),
            date: node.date.timestamp(),
            unit_price: node.unit_price.clone(),
            quantity: node.quantity.clone(),
            from: User::from_parts(&node.from, &node.from_address),
            to: node
                .to_address
                .as_deref()
                .map(|address| User::from_parts(&node.to, address)),
            transaction_hash: node.transaction_hash.clone(),
            currency: node.currency.as_ref().map(Currency::from_graphql),
        }
    }
}

pub fn convert_histories(nodes: &[HistoryNode]) -> Vec<History> {
    nodes.iter().map(History::from_graphql).collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub transaction_hash: String,
    pub timestamp: i64,
    #[schema(value_type = Option<String>)]
    pub unit_price: Option<BigDecimal>,
    #[schema(value_type = String)]
    pub quantity: BigDecimal,
    #[schema(value_type = Option<String>)]
    pub amount: Option<BigDecimal>,
    pub buyer: User,
    pub seller: User,
    pub currency: Option<Currency>,
    pub asset: Option<AssetSummary>,
}

impl Trade {
    pub fn from_graphql(node: &TradeNode) -> Self {
        Trade {
            transaction_hash: node.transaction_hash.clone(),
            timestamp: node.timestamp.timestamp(),
            unit_price: node.unit_price.clone(),
            quantity: node.quantity.clone(),
            amount: node.unit_price.as_ref().map(|price| price * &node.quantity),
            buyer: User::from_parts(&node.buyer, &node.buyer_address),
            seller: User::from_parts(&node.seller, &node.seller_address),
            currency: node.currency.as_ref().map(Currency::from_graphql),
            asset: node.asset.as_deref().map(AssetSummary::from_graphql),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceInRef {
    #[schema(value_type = String)]
    pub value: BigDecimal,
    pub ref_code: String,
}

impl PriceInRef {
    pub fn from_graphql(node: &PriceInRefNode) -> Self {
        PriceInRef {
            value: node.value_in_ref.clone(),
            ref_code: node.ref_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTrait {
    #[serde(rename = "type")]
    pub typ: String,
    pub values: Vec<CollectionTraitValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CollectionTraitValue {
    pub value: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub chain_id: u64,
    pub address: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub cover: Option<String>,
    pub standard: Option<CollectionStandard>,
    pub twitter: Option<String>,
    pub discord: Option<String>,
    pub website: Option<String>,
    pub deployer: Option<User>,
    pub floor_price: Option<PriceInRef>,
    pub total_volume: Option<PriceInRef>,
    pub owners_count: i64,
    #[schema(value_type = String)]
    pub supply: BigDecimal,
    pub traits: Vec<CollectionTrait>,
}

impl Collection {
    pub fn from_graphql(node: &CollectionNode) -> Self {
        let deployer = match (&node.deployer, &node.deployer_address) {
            (Some(account), _) => Some(User::from_graphql(account)),
            (None, Some(address)) => Some(User::from_address(address)),
            (None, None) => None,
        };
        let traits = node
            .traits
            .as_ref()
            .map(|traits| {
                traits
                    .nodes
                    .iter()
                    .map(|t| CollectionTrait {
                        typ: t.typ.clone(),
                        values: t
                            .values
                            .as_ref()
                            .map(|values| {
                                values
                                    .nodes
                                    .iter()
                                    .map(|v| CollectionTraitValue {
                                        value: v.value.clone(),
                                        count: v.number_of_assets.unwrap_or_default(),
                                    })
                                    .collect()
                            })
                            .unwrap_or_default(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Collection {
            chain_id: node.chain_id,
            address: node.address.clone(),
            name: node.name.clone(),
            description: node.description.clone(),
            image: node.image.clone(),
            cover: node.cover.clone(),
            standard: node.standard.clone(),
            twitter: node.twitter.clone(),
            discord: node.discord.clone(),
            website: node.website.clone(),
            deployer,
            floor_price: node.floor_price.as_ref().map(PriceInRef::from_graphql),
            total_volume: node.total_volume.as_ref().map(PriceInRef::from_graphql),
            owners_count: node.number_of_owners.unwrap_or_default(),
            supply: node.supply.clone().unwrap_or_default(),
            traits,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnlockedContent {
    pub url: String,
    pub mimetype: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub chain_id: u64,
    pub collection_address: String,
    pub token_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_mimetype: Option<String>,
    pub animation_url: Option<String>,
    pub unlocked_content: Option<UnlockedContent>,
    pub has_unlockable_content: bool,
    pub collection: Option<Collection>,
    pub creator: Option<User>,
    pub royalties: Vec<Royalty>,
    #[schema(value_type = String)]
    pub owned: BigDecimal,
    /// Unknown when neither a declared quantity nor every ownership is
    /// available.
    #[schema(value_type = Option<String>)]
    pub total_supply: Option<BigDecimal>,
    #[schema(value_type = String)]
    pub sale_supply: BigDecimal,
    pub owners_count: i64,
    pub sales_count: i64,
    pub bids_count: i64,
    pub best_sale: Option<Sale>,
    pub best_bid: Option<Bid>,
    pub auction: Option<Auction>,
}

impl Asset {
    pub fn from_graphql(node: &AssetNode, now: DateTime<Utc>) -> Self {
        let ownerships = node.ownerships.clone().unwrap_or_default();
        let sales = node.sales.clone().unwrap_or_default();
        let bids = node.bids.clone().unwrap_or_default();

        let total_supply = match (&node.quantity, &node.supplies) {
            (Some(quantity), _) => Some(quantity.clone()),
            (None, Some(supplies)) => {
                Some(supplies.nodes.iter().map(|o| o.quantity.clone()).sum())
            }
            // a truncated page would under-count
            (None, None) if ownerships.total() > ownerships.nodes.len() as i64 => None,
            (None, None) => Some(ownerships.nodes.iter().map(|o| o.quantity.clone()).sum()),
        };
        let sale_supply: BigDecimal = sales
            .nodes
            .iter()
            .filter(|s| is_live(s, now))
            .filter_map(|s| s.available_quantity.clone())
            .sum();

        let best_sale = lowest_price(&sales.nodes, now).map(Sale::from_graphql);
        let best_bid = highest_price(&bids.nodes, now).map(Bid::from_graphql);

        let auction = node
            .auctions
            .as_ref()
            .and_then(|a| a.nodes.first())
            .map(|a| Auction::from_graphql(a, now));

        Asset {
            id: node.id.clone(),
            chain_id: node.chain_id,
            collection_address: node.collection_address.clone(),
            token_id: node.token_id.clone(),
            name: node.name.clone().unwrap_or_default(),
            description: node.description.clone(),
            image: node.image.clone(),
            image_mimetype: node.image_mimetype.clone(),
            animation_url: node.animation_url.clone(),
            unlocked_content: node.unlocked_content.as_ref().map(|c| UnlockedContent {
                url: c.url.clone(),
                mimetype: c.mimetype.clone(),
            }),
            has_unlockable_content: node.has_unlockable_content.unwrap_or(false),
            collection: node.collection.as_ref().map(Collection::from_graphql),
            creator: node.creator.as_ref().map(User::from_graphql),
            royalties: node
                .royalties
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(Royalty::from_graphql)
                .collect(),
            owned: node
                .owned
                .as_ref()
                .map(|o| o.quantity.clone())
                .unwrap_or_else(BigDecimal::zero),
            total_supply,
            sale_supply,
            owners_count: ownerships.total(),
            sales_count: sales.total(),
            bids_count: bids.total(),
            best_sale,
            best_bid,
            auction,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Trait {
    #[serde(rename = "type")]
    pub typ: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssetDetails {
    #[serde(flatten)]
    pub asset: Asset,
    pub sales: Vec<Sale>,
    pub bids: Vec<Bid>,
    pub ownerships: Vec<Ownership>,
    pub histories: Vec<History>,
    pub traits: Vec<Trait>,
}

impl AssetDetails {
    pub fn from_graphql(node: &AssetNode, now: DateTime<Utc>) -> Self {
        let nodes = |c: &Option<Connection<OfferNode>>| {
            c.as_ref().map(|c| c.nodes.clone()).unwrap_or_default()
        };
        AssetDetails {
            asset: Asset::from_graphql(node, now),
            sales: nodes(&node.sales).iter().map(Sale::from_graphql).collect(),
            bids: nodes(&node.bids).iter().map(Bid::from_graphql).collect(),
            ownerships: node
                .ownerships
                .as_ref()
                .map(|o| o.nodes.iter().map(Ownership::from_graphql).collect())
                .unwrap_or_default(),
            histories: node
                .histories
                .as_ref()
                .map(|h| convert_histories(&h.nodes))
                .unwrap_or_default(),
            traits: node
                .traits
                .as_ref()
                .map(|t| {
                    t.nodes
                        .iter()
                        .map(|t| Trait {
                            typ: t.typ.clone(),
                            value: t.value.clone(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

use super::*;
use crate::currency::CurrencyDict;
use crate::query_params::{AssetCondition, AssetOrderBy, CollectionKey};
use chrono::{DateTime, Utc};
use serde_json::json;

/// Sales and bids fetched per asset in lists; only the best of each is shown.
const SUMMARY_OFFERS_LIMIT: usize = 1;
const SUMMARY_OWNERSHIPS_LIMIT: usize = 5;
const DETAILS_OWNERSHIPS_LIMIT: usize = 100;

macro_rules! account_fields {
    () => {
        r#"
fragment AccountFields on Account {
  address
  name
  image
  verification { status }
}
"#
    };
}

macro_rules! currency_fields {
    () => {
        r#"
fragment CurrencyFields on Currency {
  id
  chainId
  address
  decimals
  symbol
  image
}
"#
    };
}

macro_rules! offer_fields {
    () => {
        r#"
fragment OfferFields on Offer {
  id
  type
  unitPrice
  availableQuantity
  quantity
  status
  createdAt
  expiredAt
  makerAddress
  maker { ...AccountFields }
  takerAddress
  currency { ...CurrencyFields }
}
"#
    };
}

macro_rules! collection_fields {
    () => {
        r#"
fragment CollectionFields on Collection {
  chainId
  address
  name
  description
  image
  cover
  standard
  twitter
  discord
  website
  deployerAddress
  deployer { ...AccountFields }
  floorPrice { valueInRef refCode }
  totalVolume { valueInRef refCode }
  numberOfOwners
  supply
}
"#
    };
}

macro_rules! asset_fields {
    () => {
        r#"
fragment AssetFields on Asset {
  id
  chainId
  collectionAddress
  tokenId
  name
  image
  imageMimetype
  animationUrl
  unlockedContent { url mimetype }
  hasUnlockableContent
  quantity
  collection { ...CollectionFields }
  creator { ...AccountFields }
  royalties { account value }
  owned: ownership(ownerAddress: $account) { quantity }
  ownerships(first: $ownershipsLimit, orderBy: [QUANTITY_DESC]) {
    totalCount
    nodes { ownerAddress quantity owner { ...AccountFields } }
  }
  supplies: ownerships { nodes { quantity } }
  sales: offers(
    first: $offersLimit
    orderBy: [UNIT_PRICE_IN_REF_ASC, CREATED_AT_ASC]
    filter: { type: { equalTo: SALE }, status: { equalTo: ACTIVE }, expiredAt: { greaterThan: $now } }
  ) {
    totalCount
    nodes { ...OfferFields }
  }
  bids: offers(
    first: $offersLimit
    orderBy: [UNIT_PRICE_IN_REF_DESC, CREATED_AT_ASC]
    filter: { type: { equalTo: BUY }, status: { equalTo: ACTIVE }, expiredAt: { greaterThan: $now } }
  ) {
    totalCount
    nodes { ...OfferFields }
  }
  auctions(first: 1, orderBy: [CREATED_AT_DESC], filter: { expireAt: { greaterThan: $now } }) {
    nodes {
      id
      createdAt
      endAt
      expireAt
      reservePrice
      creatorAddress
      currency { ...CurrencyFields }
      bids: offers(
        orderBy: [UNIT_PRICE_IN_REF_DESC, CREATED_AT_ASC]
        filter: { type: { equalTo: BUY }, status: { equalTo: ACTIVE }, expiredAt: { greaterThan: $now } }
      ) {
        nodes { ...OfferFields }
      }
    }
  }
}
"#
    };
}

macro_rules! asset_fragments {
    () => {
        concat!(
            asset_fields!(),
            collection_fields!(),
            offer_fields!(),
            account_fields!(),
            currency_fields!()
        )
    };
}

pub const FETCH_ASSETS: &str = concat!(
    r#"
query FetchAssets($filter: AssetFilter!, $orderBy: [AssetsOrderBy!], $limit: Int!, $offset: Int!, $now: Datetime!, $account: Address, $offersLimit: Int, $ownershipsLimit: Int) {
  assets(filter: $filter, orderBy: $orderBy, first: $limit, offset: $offset) {
    totalCount
    nodes { ...AssetFields }
  }
}
"#,
    asset_fragments!()
);

pub const FETCH_ASSET: &str = concat!(
    r#"
query FetchAsset($chainId: Int!, $collectionAddress: Address!, $tokenId: String!, $now: Datetime!, $account: Address, $offersLimit: Int, $ownershipsLimit: Int) {
  asset(chainId: $chainId, collectionAddress: $collectionAddress, tokenId: $tokenId) {
    ...AssetFields
    description
    traits { nodes { type value } }
    histories(orderBy: [DATE_DESC]) {
      nodes {
        action
        date
        unitPrice
        quantity
        fromAddress
        from { ...AccountFields }
        toAddress
        to { ...AccountFields }
        transactionHash
        currency { ...CurrencyFields }
      }
    }
  }
}
"#,
    asset_fragments!()
);

pub const FETCH_COLLECTION: &str = concat!(
    r#"
query FetchCollection($chainId: Int!, $address: Address!) {
  collection(chainId: $chainId, address: $address) {
    ...CollectionFields
    traits(orderBy: [TYPE_ASC]) {
      nodes {
        type
        values(orderBy: [NUMBER_OF_ASSETS_DESC]) { nodes { value numberOfAssets } }
      }
    }
  }
}
"#,
    collection_fields!(),
    account_fields!()
);

pub const FETCH_COLLECTIONS_BY_KEYS: &str = concat!(
    r#"
query FetchCollectionsByKeys($filter: [CollectionFilter!]!) {
  collections(filter: { or: $filter }) {
    nodes { ...CollectionFields }
  }
}
"#,
    collection_fields!(),
    account_fields!()
);

pub const FETCH_ACCOUNT: &str = r#"
query FetchAccount($address: Address!) {
  account(address: $address) {
    address
    name
    image
    cover
    description
    twitter
    instagram
    website
    verification { status }
  }
}
"#;

pub const FETCH_ACCOUNTS: &str = concat!(
    r#"
query FetchAccounts($addresses: [Address!]!) {
  accounts(filter: { address: { in: $addresses } }) {
    nodes { ...AccountFields }
  }
}
"#,
    account_fields!()
);

pub const FETCH_TRADES: &str = concat!(
    r#"
query FetchTrades($address: Address!, $limit: Int!, $offset: Int!) {
  trades(
    first: $limit
    offset: $offset
    orderBy: [TIMESTAMP_DESC]
    filter: { or: [{ buyerAddress: { equalTo: $address } }, { sellerAddress: { equalTo: $address } }] }
  ) {
    totalCount
    nodes {
      transactionHash
      timestamp
      unitPrice
      quantity
      buyerAddress
      buyer { ...AccountFields }
      sellerAddress
      seller { ...AccountFields }
      currency { ...CurrencyFields }
      asset { id chainId collectionAddress tokenId name image }
    }
  }
}
"#,
    account_fields!(),
    currency_fields!()
);

pub const FETCH_CURRENCIES: &str = concat!(
    r#"
query FetchCurrencies {
  currencies(orderBy: [CHAIN_ID_ASC, DECIMALS_ASC]) {
    nodes { ...CurrencyFields }
  }
}
"#,
    currency_fields!()
);

#[derive(Deserialize)]
struct AssetsData {
    assets: Connection<AssetNode>,
}

#[derive(Deserialize)]
struct AssetData {
    asset: Option<AssetNode>,
}

#[derive(Deserialize)]
struct CollectionData {
    collection: Option<CollectionNode>,
}

#[derive(Deserialize)]
struct CollectionsData {
    collections: Connection<CollectionNode>,
}

#[derive(Deserialize)]
struct AccountData {
    account: Option<AccountNode>,
}

#[derive(Deserialize)]
struct AccountsData {
    accounts: Connection<AccountNode>,
}

#[derive(Deserialize)]
struct TradesData {
    trades: Connection<TradeNode>,
}

#[derive(Deserialize)]
struct CurrenciesData {
    currencies: Connection<CurrencyNode>,
}

/// Typed access to the marketplace GraphQL API.
#[derive(Debug, Clone)]
pub struct Queries {
    client: GraphqlClient,
    pub currencies: CurrencyDict,
}

impl Queries {
    pub fn new(client: GraphqlClient, currencies: CurrencyDict) -> Self {
        Self { client, currencies }
    }

    pub async fn fetch_currencies(client: &GraphqlClient) -> Result<Vec<CurrencyNode>, GraphqlError> {
        let data: CurrenciesData = client.query(FETCH_CURRENCIES, json!({})).await?;
        Ok(data.currencies.nodes)
    }

    pub async fn fetch_assets(
        &self,
        filter: &AssetCondition,
        order: AssetOrderBy,
        limit: usize,
        offset: usize,
        account: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Connection<AssetNode>, GraphqlError> {
        let variables = json!({
            "filter": filter,
            "orderBy": [order],
            "limit": limit,
            "offset": offset,
            "now": now,
            "account": account,
            "offersLimit": SUMMARY_OFFERS_LIMIT,
            "ownershipsLimit": SUMMARY_OWNERSHIPS_LIMIT,
        });
        let data: AssetsData = self.client.query(FETCH_ASSETS, variables).await?;
        Ok(data.assets)
    }

    pub async fn fetch_asset(
        &self,
        chain_id: u64,
        collection_address: &str,
        token_id: &str,
        account: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Option<AssetNode>, GraphqlError> {
        let variables = json!({
            "chainId": chain_id,
            "collectionAddress": collection_address,
            "tokenId": token_id,
            "now": now,
            "account": account,
            "offersLimit": None::<usize>,
            "ownershipsLimit": DETAILS_OWNERSHIPS_LIMIT,
        });
        let data: AssetData = self.client.query(FETCH_ASSET, variables).await?;
        Ok(data.asset)
    }

    /// Assets in no particular order; callers restore the order they need.
    pub async fn fetch_assets_by_ids(
        &self,
        ids: &[String],
        account: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<AssetNode>, GraphqlError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let filter = AssetCondition::with_ids(ids.to_vec());
        let assets = self
            .fetch_assets(&filter, AssetOrderBy::default(), ids.len(), 0, account, now)
            .await?;
        Ok(assets.nodes)
    }

    pub async fn fetch_collection(
        &self,
        chain_id: u64,
        address: &str,
    ) -> Result<Option<CollectionNode>, GraphqlError> {
        let variables = json!({ "chainId": chain_id, "address": address });
        let data: CollectionData = self.client.query(FETCH_COLLECTION, variables).await?;
        Ok(data.collection)
    }

    pub async fn fetch_collections(
        &self,
        keys: &[CollectionKey],
    ) -> Result<Vec<CollectionNode>, GraphqlError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let filter: Vec<_> = keys
            .iter()
            .map(|key| {
                json!({
                    "chainId": { "equalTo": key.chain_id },
                    "address": { "equalTo": key.address },
                })
            })
            .collect();
        let data: CollectionsData = self
            .client
            .query(FETCH_COLLECTIONS_BY_KEYS, json!({ "filter": filter }))
            .await?;
        Ok(data.collections.nodes)
    }

    pub async fn fetch_account(&self, address: &str) -> Result<Option<AccountNode>, GraphqlError> {
        let data: AccountData = self
            .client
            .query(FETCH_ACCOUNT, json!({ "address": address }))
            .await?;
        Ok(data.account)
    }

    pub async fn fetch_accounts(&self, addresses: &[String]) -> Result<Vec<AccountNode>, GraphqlError> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }
        let data: AccountsData = self
            .client
            .query(FETCH_ACCOUNTS, json!({ "addresses": addresses }))
            .await?;
        Ok(data.accounts.nodes)
    }

    pub async fn fetch_trades(
        &self,
        address: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Connection<TradeNode>, GraphqlError> {
        let variables = json!({ "address": address, "limit": limit, "offset": offset });
        let data: TradesData = self.client.query(FETCH_TRADES, variables).await?;
        Ok(data.trades)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment_names(document: &str) -> Vec<&str> {
        document
            .lines()
            .filter_map(|line| line.trim().strip_prefix("fragment "))
            .filter_map(|rest| rest.split_whitespace().next())
            .collect()
    }

    #[test]
    fn documents_define_every_spread_fragment() {
        for document in [
            FETCH_ASSETS,
            FETCH_ASSET,
            FETCH_COLLECTION,
            FETCH_COLLECTIONS_BY_KEYS,
            FETCH_ACCOUNTS,
            FETCH_TRADES,
            FETCH_CURRENCIES,
        ] {
            let defined = fragment_names(document);
            for spread in document.split("...").skip(1) {
                let name: String = spread
                    .chars()
                    .take_while(|c| c.is_ascii_alphanumeric())
                    .collect();
                assert!(defined.contains(&name.as_str()), "{name} is not defined");
            }
        }
    }

    #[test]
    fn asset_documents_declare_fragment_variables() {
        for document in [FETCH_ASSETS, FETCH_ASSET] {
            assert!(document.contains("$now: Datetime!"));
            assert!(document.contains("$account: Address"));
            assert!(document.contains("$offersLimit: Int"));
        }
    }

    #[test]
    fn every_offer_list_keeps_only_live_offers() {
        let fields = asset_fields!();
        let offer_lists: Vec<&str> = fields
            .split("offers(")
            .skip(1)
            .map(|rest| rest.split(')').next().unwrap_or_default())
            .collect();
        assert_eq!(offer_lists.len(), 3);
        for arguments in offer_lists {
            assert!(arguments.contains("status: { equalTo: ACTIVE }"), "{arguments}");
            assert!(arguments.contains("expiredAt: { greaterThan: $now }"), "{arguments}");
        }
    }

    #[test]
    fn supply_is_read_from_unpaged_ownerships() {
        assert!(asset_fields!().contains("supplies: ownerships { nodes { quantity } }"));
    }
}

use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::graphql::{CollectionStandard, HistoryAction, OfferStatus};
use crate::handlers::asset::ApiDocAddon as AssetApiDoc;
use crate::handlers::collection::ApiDocAddon as CollectionApiDoc;
use crate::handlers::errors::ApiDocAddon as ErrorsApiDoc;
use crate::handlers::explore::ApiDocAddon as ExploreApiDoc;
use crate::handlers::home::ApiDocAddon as HomeApiDoc;
use crate::handlers::step::ApiDocAddon as StepApiDoc;
use crate::handlers::user::ApiDocAddon as UserApiDoc;
use crate::model::{
    Asset, AssetSummary, Auction, Bid, Collection, CollectionTrait, CollectionTraitValue,
    Currency, History, Ownership, PriceInRef, Royalty, Sale, SaleFull, Trade, Trait,
    UnlockedContent, User,
};
use crate::query_params::{CurrencyFilter, OfferFilter, Pagination, PaginationParams, TraitFilter};

/// One page of a paginated list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(AssetPage = Page<Asset>, TradePage = Page<Trade>)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u64,
    pub page: u64,
    pub limit: u64,
    pub page_count: u64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: i64, params: PaginationParams) -> Self {
        let total_count = total_count.max(0) as u64;
        let pagination = Pagination::new(params.page as u64, params.limit as u64, total_count);
        Page {
            total_count,
            page: pagination.page,
            limit: pagination.limit,
            page_count: pagination.page_count(),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HomeData {
    pub assets: Vec<Asset>,
    pub collections: Vec<Collection>,
    pub users: Vec<User>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Marketplace API",
        description = "Marketplace pages data, shaped for the web frontend"
    ),
    components(schemas(
        AssetPage,
        TradePage,
        HomeData,
        AssetSummary,
        Auction,
        Bid,
        CollectionStandard,
        CollectionTrait,
        CollectionTraitValue,
        Currency,
        CurrencyFilter,
        History,
        HistoryAction,
        OfferFilter,
        OfferStatus,
        Ownership,
        PriceInRef,
        Royalty,
        Sale,
        SaleFull,
        Trait,
        TraitFilter,
        UnlockedContent,
        User,
    )),
    modifiers(
        &ExploreApiDoc,
        &AssetApiDoc,
        &CollectionApiDoc,
        &UserApiDoc,
        &HomeApiDoc,
        &StepApiDoc,
        &ErrorsApiDoc,
    )
)]
pub struct ApiDoc;

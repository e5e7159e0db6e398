use {
    super::{
        entities,
        service::{
            add_auction::AddAuctionInput,
            get_auction::GetAuctionInput,
            get_auctions::GetAuctionsInput,
        },
    },
    crate::{
        api::{
            RestError,
            WrappedRouter,
        },
        state::Store,
    },
    axum::{
        extract::{
            Path,
            Query,
            State,
        },
        routing::{
            get,
            post,
        },
        Json,
        Router,
    },
    marketplace_api_types::{
        auction::{
            Auction,
            AuctionCreate,
            AuctionIdParams,
            AuctionStatus,
            Auctions,
            GetAuctionsQueryParams,
            ProductCondition,
            Route,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

/// Open a new auction.
///
/// The auction accepts bids from now until its deadline, which is set by the server.
#[utoipa::path(post, path = "/v1/auctions", request_body = AuctionCreate, responses(
    (status = 200, description = "Auction was opened successfully", body = Auction),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn post_auction(
    State(store): State<Arc<Store>>,
    Json(auction_create): Json<AuctionCreate>,
) -> Result<Json<Auction>, RestError> {
    if auction_create.product_name.trim().is_empty() {
        return Err(RestError::BadParameters(
            "product_name must not be empty".to_string(),
        ));
    }
    let auction = store
        .auction_service
        .add_auction(AddAuctionInput {
            auction_create: auction_create.into(),
        })
        .await?;
    Ok(Json(auction.into()))
}

/// List auctions, oldest first.
#[utoipa::path(get, path = "/v1/auctions", params(GetAuctionsQueryParams), responses(
    (status = 200, description = "Auctions matching the filter", body = Auctions),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn get_auctions(
    State(store): State<Arc<Store>>,
    Query(query): Query<GetAuctionsQueryParams>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = store
        .auction_service
        .get_auctions(GetAuctionsInput {
            filter: query.into(),
        })
        .await?;
    Ok(Json(Auctions {
        items: auctions.into_iter().map(Into::into).collect(),
    }))
}

/// Query a specific auction.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}", params(AuctionIdParams), responses(
    (status = 200, description = "The auction as stored", body = Auction),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "Auction was not found", body = ErrorBodyResponse),
),)]
pub async fn get_auction(
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdParams>,
) -> Result<Json<Auction>, RestError> {
    let auction = store
        .auction_service
        .get_auction(GetAuctionInput {
            auction_id: params.auction_id,
        })
        .await?;
    Ok(Json(auction.into()))
}

pub fn get_routes() -> Router<Arc<Store>> {
    WrappedRouter::new()
        .route(Route::PostAuction, post(post_auction))
        .route(Route::GetAuctions, get(get_auctions))
        .route(Route::GetAuction, get(get_auction))
        .route(
            Route::GetAuctionBids,
            get(crate::bid::api::get_auction_bids),
        )
        .route(
            Route::GetAuctionWinner,
            get(crate::bid::api::get_auction_winner),
        )
        .router
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Closed => AuctionStatus::Closed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Closed => entities::AuctionStatus::Closed,
        }
    }
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

impl From<AuctionCreate> for entities::AuctionCreate {
    fn from(auction_create: AuctionCreate) -> Self {
        Self {
            product_name: auction_create.product_name,
            category:     auction_create.category,
            description:  auction_create.description,
            condition:    auction_create.condition.into(),
        }
    }
}

impl From<entities::Auction> for Auction {
    fn from(auction: entities::Auction) -> Self {
        Self {
            id:            auction.id,
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time,
            deadline:      auction.deadline,
        }
    }
}

impl From<GetAuctionsQueryParams> for entities::AuctionFilter {
    fn from(query: GetAuctionsQueryParams) -> Self {
        Self {
            status:       query.status.map(Into::into),
            category:     query.category,
            product_name: query.product_name,
        }
    }
}

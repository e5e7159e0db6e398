use {
    super::{
        entities,
        service::{
            get_bids::GetBidsInput,
            get_winner::GetWinnerInput,
            handle_bids::HandleBidsInput,
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
            State,
        },
        routing::post,
        Json,
        Router,
    },
    marketplace_api_types::{
        auction::AuctionIdParams,
        bid::{
            Bid,
            BidCreate,
            BidResult,
            BidResults,
            Bids,
            Route,
        },
        ErrorBodyResponse,
    },
    std::sync::Arc,
};

/// Bid on one or more auctions.
///
/// Bids are processed in the given order and each gets its own result. A bid on an auction that
/// no longer accepts bids is rejected and not stored.
#[utoipa::path(post, path = "/v1/bids", request_body = Vec<BidCreate>, responses(
    (status = 200, description = "Result of every submitted bid, in order", body = BidResults),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn post_bids(
    State(store): State<Arc<Store>>,
    Json(bid_creates): Json<Vec<BidCreate>>,
) -> Result<Json<BidResults>, RestError> {
    let results = store
        .bid_service
        .handle_bids(HandleBidsInput {
            bid_creates: bid_creates.into_iter().map(Into::into).collect(),
        })
        .await;
    Ok(Json(BidResults {
        items: results.into_iter().map(to_bid_result).collect(),
    }))
}

/// List the bids of an auction, oldest first.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}/bids", params(AuctionIdParams), responses(
    (status = 200, description = "Bids placed on the auction", body = Bids),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn get_auction_bids(
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdParams>,
) -> Result<Json<Bids>, RestError> {
    let bids = store
        .bid_service
        .get_bids(GetBidsInput {
            auction_id: params.auction_id,
        })
        .await?;
    Ok(Json(Bids {
        items: bids.into_iter().map(Into::into).collect(),
    }))
}

/// Query the highest bid of an auction.
///
/// Among bids with the same amount the earliest one wins. The auction is not required to be closed.
#[utoipa::path(get, path = "/v1/auctions/{auction_id}/winner", params(AuctionIdParams), responses(
    (status = 200, description = "The winning bid", body = Bid),
    (status = 400, response = ErrorBodyResponse),
    (status = 404, description = "The auction has no bids", body = ErrorBodyResponse),
),)]
pub async fn get_auction_winner(
    State(store): State<Arc<Store>>,
    Path(params): Path<AuctionIdParams>,
) -> Result<Json<Bid>, RestError> {
    let bid = store
        .bid_service
        .get_winner(GetWinnerInput {
            auction_id: params.auction_id,
        })
        .await?;
    Ok(Json(bid.into()))
}

pub fn get_routes() -> Router<Arc<Store>> {
    WrappedRouter::new()
        .route(Route::PostBids, post(post_bids))
        .router
}

fn to_bid_result(result: Result<entities::BidAdmission, RestError>) -> BidResult {
    match result {
        Ok(entities::BidAdmission::Accepted(bid)) => BidResult::Accepted { bid: bid.into() },
        Ok(entities::BidAdmission::Rejected(reason)) => BidResult::Rejected {
            reason: reason.to_string(),
        },
        Err(error) => BidResult::Failed {
            error: error.to_status_and_message().1,
        },
    }
}

impl From<BidCreate> for entities::BidCreate {
    fn from(bid_create: BidCreate) -> Self {
        Self {
            auction_id: bid_create.auction_id,
            user_id:    bid_create.user_id,
            amount:     bid_create.amount,
        }
    }
}

impl From<entities::Bid> for Bid {
    fn from(bid: entities::Bid) -> Self {
        Self {
            id:            bid.id,
            auction_id:    bid.auction_id,
            user_id:       bid.user_id,
            amount:        bid.amount,
            creation_time: bid.creation_time,
        }
    }
}

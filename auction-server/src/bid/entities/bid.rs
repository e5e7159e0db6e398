use {
    crate::{
        auction::entities::AuctionId,
        kernel::db::now_in_store_precision,
    },
    sqlx::types::BigDecimal,
    std::fmt::{
        Display,
        Formatter,
    },
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type BidId = Uuid;
pub type UserId = Uuid;

#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub id:            BidId,
    pub auction_id:    AuctionId,
    pub user_id:       UserId,
    pub amount:        BigDecimal,
    pub creation_time: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BidCreate {
    pub auction_id: AuctionId,
    pub user_id:    UserId,
    pub amount:     BigDecimal,
}

impl Bid {
    pub fn new(bid_create: BidCreate) -> Self {
        Self {
            id:            Uuid::new_v4(),
            auction_id:    bid_create.auction_id,
            user_id:       bid_create.user_id,
            amount:        bid_create.amount,
            creation_time: now_in_store_precision(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BidRejectionReason {
    AuctionCompleted,
}

impl Display for BidRejectionReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BidRejectionReason::AuctionCompleted => write!(f, "auction completed"),
        }
    }
}

/// Outcome of admitting a single bid. Store trouble is not an outcome, it is returned as an error.
#[derive(Clone, Debug, PartialEq)]
pub enum BidAdmission {
    Accepted(Bid),
    Rejected(BidRejectionReason),
}

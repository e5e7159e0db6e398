use {
    super::{
        Auction,
        AuctionStatus,
    },
    time::OffsetDateTime,
};

/// Last-known lifecycle state of an auction as seen by this process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lifecycle {
    pub status:     AuctionStatus,
    pub deadline:   OffsetDateTime,
    pub fetched_at: OffsetDateTime,
}

impl Lifecycle {
    pub fn new(status: AuctionStatus, deadline: OffsetDateTime) -> Self {
        Self {
            status,
            deadline,
            fetched_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
        now > self.deadline
    }

    /// Status to act on at `now`. An active auction past its deadline is treated as closed
    /// without waiting for the store to be updated.
    pub fn status_at(&self, now: OffsetDateTime) -> AuctionStatus {
        match self.status {
            AuctionStatus::Active if self.is_expired_at(now) => AuctionStatus::Closed,
            status => status,
        }
    }

    pub fn closed(self) -> Self {
        Self {
            status: AuctionStatus::Closed,
            ..self
        }
    }
}

impl From<&Auction> for Lifecycle {
    fn from(auction: &Auction) -> Self {
        Self::new(auction.status, auction.deadline)
    }
}

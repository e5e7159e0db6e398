use {
    crate::{
        api::RestError,
        auction::{
            self,
            entities::AuctionId,
            repository::Database as AuctionDatabase,
        },
        bid::{
            self,
            repository::Database as BidDatabase,
        },
        kernel::db::to_primitive,
    },
    axum::async_trait,
    std::{
        collections::HashMap,
        sync::{
            Arc,
            Mutex,
        },
    },
    time::OffsetDateTime,
    tokio::sync::Notify,
};

#[derive(Debug, Default)]
struct State {
    auctions:            HashMap<AuctionId, auction::repository::Auction>,
    bids:                Vec<bid::repository::Bid>,
    failing_bid_inserts: usize,
}

/// Store fake backing both the auction and the bid `Database` traits with the same semantics as
/// the postgres queries. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDatabase {
    state:              Arc<Mutex<State>>,
    close_expired_gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

impl InMemoryDatabase {
    /// Makes every bulk close notify `started` and then wait on `release` before touching state.
    pub fn with_close_expired_gate(mut self, started: Arc<Notify>, release: Arc<Notify>) -> Self {
        self.close_expired_gate = Some((started, release));
        self
    }

    pub fn insert_auction(&self, auction: auction::entities::Auction) {
        self.state
            .lock()
            .unwrap()
            .auctions
            .insert(auction.id, (&auction).into());
    }

    pub fn auction(&self, auction_id: AuctionId) -> Option<auction::entities::Auction> {
        self.state
            .lock()
            .unwrap()
            .auctions
            .get(&auction_id)
            .cloned()
            .map(Into::into)
    }

    /// Bids of an auction in insertion order.
    pub fn bids(&self, auction_id: AuctionId) -> Vec<bid::entities::Bid> {
        self.state
            .lock()
            .unwrap()
            .bids
            .iter()
            .filter(|bid| bid.auction_id == auction_id)
            .cloned()
            .map(Into::into)
            .collect()
    }

    /// The next `count` bid inserts fail as if the store was unreachable.
    pub fn fail_next_bid_inserts(&self, count: usize) {
        self.state.lock().unwrap().failing_bid_inserts = count;
    }
}

#[async_trait]
impl AuctionDatabase for InMemoryDatabase {
    async fn add_auction(&self, auction: &auction::repository::Auction) -> Result<(), RestError> {
        let mut state = self.state.lock().unwrap();
        if state.auctions.contains_key(&auction.id) {
            return Err(RestError::Conflict(format!(
                "Auction {} already exists",
                auction.id
            )));
        }
        state.auctions.insert(auction.id, auction.clone());
        Ok(())
    }

    async fn get_auction(
        &self,
        auction_id: AuctionId,
    ) -> Result<auction::repository::Auction, RestError> {
        self.state
            .lock()
            .unwrap()
            .auctions
            .get(&auction_id)
            .cloned()
            .ok_or(RestError::AuctionNotFound)
    }

    async fn get_auctions(
        &self,
        filter: &auction::entities::AuctionFilter,
    ) -> Result<Vec<auction::repository::Auction>, RestError> {
        let status = filter.status.map(auction::repository::AuctionStatus::from);
        let product_name = filter.product_name.as_ref().map(|name| name.to_lowercase());
        let mut auctions: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .auctions
            .values()
            .filter(|auction| status.map_or(true, |status| auction.status == status))
            .filter(|auction| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |category| &auction.category == category)
            })
            .filter(|auction| {
                product_name.as_ref().map_or(true, |name| {
                    auction.product_name.to_lowercase().contains(name.as_str())
                })
            })
            .cloned()
            .collect();
        auctions.sort_by_key(|auction| auction.creation_time);
        auctions.truncate(auction::repository::AUCTION_PAGE_SIZE_CAP);
        Ok(auctions)
    }

    async fn close_expired_auctions(
        &self,
        cutoff: OffsetDateTime,
    ) -> anyhow::Result<Vec<AuctionId>> {
        if let Some((started, release)) = &self.close_expired_gate {
            started.notify_one();
            release.notified().await;
        }
        let cutoff = to_primitive(cutoff);
        let mut state = self.state.lock().unwrap();
        let mut closed = vec![];
        for auction in state.auctions.values_mut() {
            if auction.status == auction::repository::AuctionStatus::Active
                && auction.deadline < cutoff
            {
                auction.status = auction::repository::AuctionStatus::Closed;
                closed.push(auction.id);
            }
        }
        Ok(closed)
    }

    async fn close_auction(&self, auction_id: AuctionId) -> anyhow::Result<bool> {
        let mut state = self.state.lock().unwrap();
        match state.auctions.get_mut(&auction_id) {
            Some(auction) if auction.status == auction::repository::AuctionStatus::Active => {
                auction.status = auction::repository::AuctionStatus::Closed;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl BidDatabase for InMemoryDatabase {
    async fn add_bid(&self, bid: &bid::repository::Bid) -> Result<(), RestError> {
        let mut state = self.state.lock().unwrap();
        if state.failing_bid_inserts > 0 {
            state.failing_bid_inserts -= 1;
            return Err(RestError::TemporarilyUnavailable);
        }
        if !state.auctions.contains_key(&bid.auction_id) {
            return Err(RestError::AuctionNotFound);
        }
        if state.bids.iter().any(|existing| existing.id == bid.id) {
            return Err(RestError::Conflict(format!("Bid {} already exists", bid.id)));
        }
        state.bids.push(bid.clone());
        Ok(())
    }

    async fn get_bids(&self, auction_id: AuctionId) -> Result<Vec<bid::repository::Bid>, RestError> {
        let mut bids: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .bids
            .iter()
            .filter(|bid| bid.auction_id == auction_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| {
            a.creation_time
                .cmp(&b.creation_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(bids)
    }

    async fn get_winning_bid(
        &self,
        auction_id: AuctionId,
    ) -> Result<Option<bid::repository::Bid>, RestError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .bids
            .iter()
            .filter(|bid| bid.auction_id == auction_id)
            .min_by(|a, b| {
                b.amount
                    .cmp(&a.amount)
                    .then_with(|| a.creation_time.cmp(&b.creation_time))
                    .then_with(|| a.id.cmp(&b.id))
            })
            .cloned())
    }
}

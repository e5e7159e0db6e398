use {
    super::{
        handle_bid::HandleBidInput,
        Service,
    },
    crate::{
        api::RestError,
        bid::entities,
    },
};

pub struct HandleBidsInput {
    pub bid_creates: Vec<entities::BidCreate>,
}

impl Service {
    /// Admits a batch of bids one by one, in order. A failed bid does not stop the rest of the
    /// batch, every bid gets its own result.
    #[tracing::instrument(skip_all, fields(count = input.bid_creates.len()))]
    pub async fn handle_bids(
        &self,
        input: HandleBidsInput,
    ) -> Vec<Result<entities::BidAdmission, RestError>> {
        let mut results = Vec::with_capacity(input.bid_creates.len());
        for bid_create in input.bid_creates {
            results.push(self.handle_bid(HandleBidInput { bid_create }).await);
        }
        results
    }
}

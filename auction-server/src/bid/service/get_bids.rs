use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        bid::entities,
        kernel::db::with_store_timeout,
    },
};

pub struct GetBidsInput {
    pub auction_id: AuctionId,
}

impl Service {
    pub async fn get_bids(&self, input: GetBidsInput) -> Result<Vec<entities::Bid>, RestError> {
        with_store_timeout(
            self.config.store_timeout,
            "get_bids",
            self.repo.get_bids(input.auction_id),
        )
        .await
    }
}

use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
        kernel::db::with_store_timeout,
    },
};

pub struct GetAuctionInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    pub async fn get_auction(
        &self,
        input: GetAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        with_store_timeout(
            self.config.store_timeout,
            "get_auction",
            self.repo.get_auction(input.auction_id),
        )
        .await
    }
}

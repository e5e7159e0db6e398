use {
    super::{
        entities,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities::AuctionId,
    },
};

impl Repository {
    pub async fn get_winning_bid(
        &self,
        auction_id: AuctionId,
    ) -> Result<Option<entities::Bid>, RestError> {
        Ok(self.db.get_winning_bid(auction_id).await?.map(Into::into))
    }
}

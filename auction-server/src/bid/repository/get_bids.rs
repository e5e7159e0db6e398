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
    pub async fn get_bids(&self, auction_id: AuctionId) -> Result<Vec<entities::Bid>, RestError> {
        let bids = self.db.get_bids(auction_id).await?;
        Ok(bids.into_iter().map(Into::into).collect())
    }
}

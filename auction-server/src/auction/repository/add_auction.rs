use {
    super::{
        models,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    // NOTE: Do not call this function directly. Instead call `add_auction` from `Service`.
    pub async fn add_auction(
        &self,
        auction: entities::Auction,
    ) -> Result<entities::Auction, RestError> {
        self.db
            .add_auction(&models::Auction::from(&auction))
            .await?;
        self.in_memory_store
            .lifecycles
            .insert(auction.id, entities::Lifecycle::from(&auction));
        Ok(auction)
    }
}

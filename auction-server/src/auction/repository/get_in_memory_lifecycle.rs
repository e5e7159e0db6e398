use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Repository {
    /// Returns the cached lifecycle of an auction, reading the auction from the store on a miss.
    pub async fn get_or_populate_in_memory_lifecycle(
        &self,
        auction_id: entities::AuctionId,
    ) -> Result<entities::Lifecycle, RestError> {
        self.in_memory_store
            .lifecycles
            .get_or_populate(auction_id, || async {
                let auction = self.get_auction(auction_id).await?;
                Ok::<_, RestError>(entities::Lifecycle::from(&auction))
            })
            .await
    }
}

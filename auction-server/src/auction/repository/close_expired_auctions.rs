use {
    super::Repository,
    crate::auction::entities,
    time::OffsetDateTime,
};

impl Repository {
    /// Runs one bulk close against the store. Returns `None` without touching the store when
    /// another sweep is still in progress.
    pub async fn close_expired_auctions(
        &self,
        cutoff: OffsetDateTime,
    ) -> anyhow::Result<Option<Vec<entities::AuctionId>>> {
        let Ok(_guard) = self.sweep_lock.try_lock() else {
            return Ok(None);
        };
        let auction_ids = self.db.close_expired_auctions(cutoff).await?;
        for auction_id in auction_ids.iter() {
            self.mark_in_memory_lifecycle_closed(auction_id);
        }
        Ok(Some(auction_ids))
    }
}

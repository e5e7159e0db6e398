use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
        kernel::db::with_store_timeout,
    },
    time::OffsetDateTime,
};

pub struct GetLifecycleInput {
    pub auction_id: entities::AuctionId,
}

impl Service {
    /// Resolves the status an auction should be treated with right now.
    ///
    /// The first lookup of an auction reads it from the store, later lookups are served from the
    /// lifecycle cache. An active auction past its deadline is reported, and cached, as closed
    /// even if the sweeper has not closed it in the store yet. Store failures are returned as is,
    /// no status is guessed.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id))]
    pub async fn get_lifecycle(
        &self,
        input: GetLifecycleInput,
    ) -> Result<entities::Lifecycle, RestError> {
        let lifecycle = with_store_timeout(
            self.config.store_timeout,
            "get_auction_lifecycle",
            self.repo
                .get_or_populate_in_memory_lifecycle(input.auction_id),
        )
        .await?;

        if lifecycle.status_at(OffsetDateTime::now_utc()) != lifecycle.status {
            tracing::debug!(
                deadline = %lifecycle.deadline,
                fetched_at = %lifecycle.fetched_at,
                "Auction deadline passed"
            );
            self.repo.mark_in_memory_lifecycle_closed(&input.auction_id);
            return Ok(lifecycle.closed());
        }
        Ok(lifecycle)
    }
}

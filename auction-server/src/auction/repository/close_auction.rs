use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    #[tracing::instrument(skip_all, name = "close_auction_repo", fields(auction_id))]
    pub async fn close_auction(&self, auction_id: entities::AuctionId) -> anyhow::Result<bool> {
        tracing::Span::current().record("auction_id", auction_id.to_string());
        let closed = self.db.close_auction(auction_id).await?;
        self.mark_in_memory_lifecycle_closed(&auction_id);
        Ok(closed)
    }
}

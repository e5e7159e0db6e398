use {
    super::Repository,
    crate::auction::entities,
};

impl Repository {
    pub fn mark_in_memory_lifecycle_closed(&self, auction_id: &entities::AuctionId) {
        self.in_memory_store.lifecycles.mark_closed(auction_id);
    }
}

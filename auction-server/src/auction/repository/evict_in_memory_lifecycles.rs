use {
    super::Repository,
    time::OffsetDateTime,
};

impl Repository {
    pub fn evict_in_memory_lifecycles_expired_before(&self, cutoff: OffsetDateTime) -> usize {
        self.in_memory_store.lifecycles.evict_expired_before(cutoff)
    }
}

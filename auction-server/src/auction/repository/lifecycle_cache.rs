use {
    crate::auction::entities::{
        AuctionId,
        Lifecycle,
    },
    dashmap::{
        mapref::entry::Entry,
        DashMap,
    },
    std::future::Future,
    time::OffsetDateTime,
};

/// In-process memo of auction lifecycles.
///
/// Entries are only ever moved from active to closed, and dropped once their deadline is far
/// enough behind. Shard guards are held for map
/// operations only, store reads happen outside of them.
#[derive(Debug, Default)]
pub struct LifecycleCache {
    entries: DashMap<AuctionId, Lifecycle>,
}

impl LifecycleCache {
    fn get(&self, auction_id: &AuctionId) -> Option<Lifecycle> {
        self.entries.get(auction_id).map(|entry| *entry)
    }

    /// Stores a lifecycle read from the store. If another caller already cached the auction as
    /// closed, the closed entry is kept and returned.
    fn populate(&self, auction_id: AuctionId, lifecycle: Lifecycle) -> Lifecycle {
        match self.entries.entry(auction_id) {
            Entry::Occupied(mut entry) => {
                if entry.get().status.is_closed() {
                    *entry.get()
                } else {
                    entry.insert(lifecycle);
                    lifecycle
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(lifecycle);
                lifecycle
            }
        }
    }

    /// Returns the cached lifecycle, or runs `fetch` and caches its result.
    ///
    /// Two concurrent misses on the same auction may both fetch. A failed fetch leaves the
    /// cache untouched.
    pub async fn get_or_populate<F, Fut, E>(
        &self,
        auction_id: AuctionId,
        fetch: F,
    ) -> Result<Lifecycle, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Lifecycle, E>>,
    {
        if let Some(lifecycle) = self.get(&auction_id) {
            return Ok(lifecycle);
        }
        let lifecycle = fetch().await?;
        Ok(self.populate(auction_id, lifecycle))
    }

    /// Seeds the cache with an auction this process just created.
    pub fn insert(&self, auction_id: AuctionId, lifecycle: Lifecycle) {
        self.populate(auction_id, lifecycle);
    }

    /// Marks a cached auction as closed. Auctions that are not cached are left alone, the next
    /// lookup reads their status from the store.
    pub fn mark_closed(&self, auction_id: &AuctionId) -> bool {
        match self.entries.get_mut(auction_id) {
            Some(mut entry) => {
                *entry = entry.closed();
                true
            }
            None => false,
        }
    }

    /// Drops every entry whose deadline is before `cutoff` and returns how many were dropped.
    /// Such an auction is closed or about to be read as closed, a later lookup gets its status
    /// from the store again.
    pub fn evict_expired_before(&self, cutoff: OffsetDateTime) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, lifecycle| lifecycle.deadline >= cutoff);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

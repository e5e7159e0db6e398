use {
    super::entities,
    axum_prometheus::metrics,
    tokio::sync::Mutex,
};

mod add_auction;
mod close_auction;
mod close_expired_auctions;
mod evict_in_memory_lifecycles;
mod get_auction;
mod get_auctions;
mod get_in_memory_lifecycle;
mod lifecycle_cache;
mod mark_in_memory_lifecycle_closed;
mod models;

pub use {
    lifecycle_cache::LifecycleCache,
    models::*,
};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub lifecycles: LifecycleCache,
}

#[derive(Debug)]
pub struct Repository {
    pub in_memory_store: InMemoryStore,
    pub db:              Box<dyn Database>,
    sweep_lock:          Mutex<()>,
}

impl Repository {
    pub fn new(db: impl Database) -> Self {
        Self {
            in_memory_store: InMemoryStore::default(),
            db:              Box::new(db),
            sweep_lock:      Mutex::new(()),
        }
    }

    pub(super) async fn update_metrics(&self) {
        metrics::gauge!("in_memory_auction_lifecycles")
            .set(self.in_memory_store.lifecycles.len() as f64);
    }
}

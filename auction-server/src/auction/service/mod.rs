use {
    super::repository::{
        Database,
        Repository,
    },
    std::{
        sync::Arc,
        time::Duration,
    },
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

pub mod add_auction;
pub mod close_auction;
pub mod close_expired_auctions;
pub mod get_auction;
pub mod get_auctions;
pub mod get_lifecycle;
pub mod workers;

#[derive(Clone, Debug)]
pub struct Config {
    /// How long a new auction accepts bids.
    pub auction_duration: Duration,
    /// Interval between two runs of the closure sweeper.
    pub sweep_interval:   Duration,
    /// Upper bound for a single store call.
    pub store_timeout:    Duration,
}

pub struct ServiceInner {
    config:             Config,
    repo:               Arc<Repository>,
    task_tracker:       TaskTracker,
    cancellation_token: CancellationToken,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);
impl std::ops::Deref for Service {
    type Target = ServiceInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        db: impl Database,
        config: Config,
        task_tracker: TaskTracker,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            config,
            repo: Arc::new(Repository::new(db)),
            task_tracker,
            cancellation_token,
        }))
    }
}

use {
    super::repository::{
        Database,
        Repository,
    },
    crate::auction,
    std::{
        sync::Arc,
        time::Duration,
    },
};

pub mod get_bids;
pub mod get_winner;
pub mod handle_bid;
pub mod handle_bids;

#[derive(Clone, Debug)]
pub struct Config {
    /// Upper bound for a single store call.
    pub store_timeout: Duration,
}

pub struct ServiceInner {
    config:          Config,
    repo:            Arc<Repository>,
    auction_service: auction::service::Service,
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
        auction_service: auction::service::Service,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            config,
            repo: Arc::new(Repository::new(db)),
            auction_service,
        }))
    }
}

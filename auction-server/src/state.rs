use crate::{
    auction,
    bid,
};

/// Services shared by every request handler.
pub struct Store {
    pub auction_service: auction::service::Service,
    pub bid_service:     bid::service::Service,
}

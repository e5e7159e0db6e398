use {
    super::{
        entities,
        models,
        Repository,
    },
    crate::api::RestError,
};

impl Repository {
    pub async fn add_bid(&self, bid: entities::Bid) -> Result<entities::Bid, RestError> {
        self.db.add_bid(&models::Bid::from(&bid)).await?;
        Ok(bid)
    }
}

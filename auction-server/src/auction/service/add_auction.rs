use {
    super::{
        close_auction::CloseAuctionAtDeadlineInput,
        Service,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::db::with_store_timeout,
    },
};

pub struct AddAuctionInput {
    pub auction_create: entities::AuctionCreate,
}

impl Service {
    #[tracing::instrument(skip_all, fields(auction_id))]
    pub async fn add_auction(
        &self,
        input: AddAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let auction = entities::Auction::new(input.auction_create, self.config.auction_duration)
            .ok_or_else(|| {
                tracing::error!(
                    duration = ?self.config.auction_duration,
                    "Auction duration does not give a valid deadline"
                );
                RestError::TemporarilyUnavailable
            })?;
        tracing::Span::current().record("auction_id", auction.id.to_string());
        let auction = with_store_timeout(
            self.config.store_timeout,
            "add_auction",
            self.repo.add_auction(auction),
        )
        .await?;

        self.task_tracker.spawn({
            let service = self.clone();
            let input = CloseAuctionAtDeadlineInput {
                auction_id: auction.id,
                deadline:   auction.deadline,
            };
            async move {
                service.close_auction_at_deadline(input).await;
            }
        });
        Ok(auction)
    }
}

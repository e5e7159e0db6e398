use {
    super::Service,
    crate::auction::entities,
    std::time::Duration,
    time::OffsetDateTime,
};

pub struct CloseAuctionAtDeadlineInput {
    pub auction_id: entities::AuctionId,
    pub deadline:   OffsetDateTime,
}

impl Service {
    /// Closes a single auction as soon as its deadline passes.
    ///
    /// Only shortens the time an expired auction stays active in the store. A timer lost to a
    /// restart is covered by the closure sweeper.
    #[tracing::instrument(skip_all, fields(auction_id = %input.auction_id))]
    pub async fn close_auction_at_deadline(&self, input: CloseAuctionAtDeadlineInput) {
        let wait: Duration = (input.deadline - OffsetDateTime::now_utc())
            .try_into()
            .unwrap_or(Duration::ZERO);
        tokio::select! {
            _ = self.cancellation_token.cancelled() => {
                return;
            }
            _ = tokio::time::sleep(wait) => {}
        }

        match tokio::time::timeout(
            self.config.store_timeout,
            self.repo.close_auction(input.auction_id),
        )
        .await
        {
            Ok(Ok(true)) => tracing::info!("Auction closed at deadline"),
            Ok(Ok(false)) => tracing::debug!("Auction was already closed"),
            Ok(Err(err)) => {
                tracing::warn!(error = ?err, "Failed to close auction at deadline, leaving it to the sweeper")
            }
            Err(_) => tracing::warn!("Closing auction at deadline timed out, leaving it to the sweeper"),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::{
            repository::MockDatabase,
            service::get_lifecycle::GetLifecycleInput,
        },
        uuid::Uuid,
    };

    #[tokio::test]
    async fn test_cancelled_timer_does_not_touch_store() {
        let mut db = MockDatabase::default();
        db.expect_close_auction().never();
        let service = Service::new_with_mocks(db);
        service.cancellation_token.cancel();

        service
            .close_auction_at_deadline(CloseAuctionAtDeadlineInput {
                auction_id: Uuid::new_v4(),
                deadline:   OffsetDateTime::now_utc() + time::Duration::minutes(1),
            })
            .await;
    }

    #[tokio::test]
    async fn test_store_failure_is_tolerated() {
        let mut db = MockDatabase::default();
        db.expect_close_auction()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("connection reset")));
        let service = Service::new_with_mocks(db);

        service
            .close_auction_at_deadline(CloseAuctionAtDeadlineInput {
                auction_id: Uuid::new_v4(),
                deadline:   OffsetDateTime::now_utc() - time::Duration::seconds(1),
            })
            .await;
    }

    #[tokio::test]
    async fn test_closing_marks_cached_lifecycle() {
        let auction = crate::auction::service::tests::auction_with_deadline(
            entities::AuctionStatus::Active,
            OffsetDateTime::now_utc() + time::Duration::minutes(1),
        );
        let (service, db) = crate::auction::service::tests::service_with_auctions(vec![
            auction.clone(),
        ]);
        service
            .get_lifecycle(GetLifecycleInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();

        service
            .repo
            .close_auction(auction.id)
            .await
            .unwrap();

        let lifecycle = service
            .get_lifecycle(GetLifecycleInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert_eq!(lifecycle.status, entities::AuctionStatus::Closed);
        assert_eq!(db.auction(auction.id).unwrap().status, entities::AuctionStatus::Closed);
    }
}

use {
    super::Service,
    crate::{
        api::RestError,
        auction::service::get_lifecycle::GetLifecycleInput,
        bid::entities,
        kernel::db::with_store_timeout,
    },
    axum_prometheus::metrics,
    sqlx::types::BigDecimal,
};

pub struct HandleBidInput {
    pub bid_create: entities::BidCreate,
}

fn record_admission(result: &'static str) {
    metrics::counter!("bid_admissions_total", "result" => result).increment(1);
}

impl Service {
    /// Admits a single bid.
    ///
    /// A bid on a closed auction, or on an active one past its deadline, is rejected and never
    /// stored. Any positive amount is admitted on an open auction, ranking happens when the
    /// winner is resolved.
    #[tracing::instrument(skip_all, fields(auction_id = %input.bid_create.auction_id, bid_id))]
    pub async fn handle_bid(
        &self,
        input: HandleBidInput,
    ) -> Result<entities::BidAdmission, RestError> {
        if input.bid_create.amount <= BigDecimal::from(0) {
            record_admission("invalid");
            return Err(RestError::BadParameters(
                "Bid amount must be positive".to_string(),
            ));
        }

        let lifecycle = self
            .auction_service
            .get_lifecycle(GetLifecycleInput {
                auction_id: input.bid_create.auction_id,
            })
            .await
            .inspect_err(|_| record_admission("failed"))?;
        if lifecycle.status.is_closed() {
            tracing::debug!("Rejecting bid on completed auction");
            record_admission("rejected");
            return Ok(entities::BidAdmission::Rejected(
                entities::BidRejectionReason::AuctionCompleted,
            ));
        }

        let bid = entities::Bid::new(input.bid_create);
        tracing::Span::current().record("bid_id", bid.id.to_string());
        let bid = with_store_timeout(
            self.config.store_timeout,
            "add_bid",
            self.repo.add_bid(bid),
        )
        .await
        .inspect_err(|_| record_admission("failed"))?;
        record_admission("accepted");
        Ok(entities::BidAdmission::Accepted(bid))
    }
}

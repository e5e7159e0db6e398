use {
    super::Service,
    axum_prometheus::metrics,
    time::OffsetDateTime,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepOutcome {
    /// The bulk update ran and closed this many auctions.
    Closed(usize),
    /// A previous sweep was still running.
    Skipped,
    /// The bulk update failed or timed out. The next run retries.
    Failed,
}

impl Service {
    /// Runs one closure sweep: every active auction whose deadline is before now becomes closed.
    #[tracing::instrument(skip_all)]
    pub async fn close_expired_auctions(&self) -> SweepOutcome {
        let cutoff = OffsetDateTime::now_utc();
        let result = tokio::time::timeout(
            self.config.store_timeout,
            self.repo.close_expired_auctions(cutoff),
        )
        .await;
        match result {
            Ok(Ok(Some(auction_ids))) => {
                metrics::histogram!("auction_sweep_closed_count").record(auction_ids.len() as f64);
                if !auction_ids.is_empty() {
                    tracing::info!(count = auction_ids.len(), "Closed expired auctions");
                }
                SweepOutcome::Closed(auction_ids.len())
            }
            Ok(Ok(None)) => {
                tracing::warn!("Previous closure sweep is still running, skipping this run");
                SweepOutcome::Skipped
            }
            Ok(Err(err)) => {
                tracing::error!(error = ?err, "Error closing expired auctions");
                SweepOutcome::Failed
            }
            Err(_) => {
                tracing::error!(
                    timeout = ?self.config.store_timeout,
                    "Closing expired auctions timed out"
                );
                SweepOutcome::Failed
            }
        }
    }
}

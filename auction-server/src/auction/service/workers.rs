use {
    super::Service,
    anyhow::Result,
    time::OffsetDateTime,
    tokio::time::MissedTickBehavior,
    tokio_util::sync::CancellationToken,
};

/// How long a cached lifecycle is kept once its deadline has passed.
const EXPIRED_LIFECYCLE_RETENTION: time::Duration = time::Duration::minutes(10);

impl Service {
    /// Runs the closure sweeper every `sweep_interval` until `cancellation_token` is cancelled.
    ///
    /// The first sweep runs immediately so auctions that expired while the process was down are
    /// closed on startup. Sweeps run one after another on this task, ticks missed by a slow sweep
    /// are skipped.
    pub async fn run_closure_sweeper_loop(
        &self,
        cancellation_token: CancellationToken,
    ) -> Result<()> {
        tracing::info!(
            interval = ?self.config.sweep_interval,
            "Starting auction closure sweeper..."
        );
        let mut sweep_interval = tokio::time::interval(self.config.sweep_interval);
        sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = cancellation_token.cancelled() => break,
                _ = sweep_interval.tick() => self.sweep_once().await,
            }
        }
        tracing::info!("Shutting down auction closure sweeper...");
        Ok(())
    }

    async fn sweep_once(&self) {
        self.close_expired_auctions().await;
        let evicted = self.repo.evict_in_memory_lifecycles_expired_before(
            OffsetDateTime::now_utc() - EXPIRED_LIFECYCLE_RETENTION,
        );
        if evicted > 0 {
            tracing::debug!(evicted, "Evicted expired auction lifecycles");
        }
        self.repo.update_metrics().await;
    }
}

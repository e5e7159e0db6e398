use {
    crate::{
        api,
        auction,
        bid,
        config::RunOptions,
        metrics_api::start_metrics,
        state::Store,
    },
    anyhow::anyhow,
    axum_prometheus::PrometheusMetricLayer,
    sqlx::postgres::PgPoolOptions,
    std::sync::Arc,
    tokio_util::{
        sync::CancellationToken,
        task::TaskTracker,
    },
};

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    let cancellation_token = CancellationToken::new();
    tokio::spawn({
        let cancellation_token = cancellation_token.clone();
        async move {
            tracing::info!("Registered shutdown signal handler...");
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = ?err, "Failed to listen for shut down signal");
            }
            tracing::info!("Shut down signal received, waiting for tasks...");
            cancellation_token.cancel();
        }
    });

    let pool = PgPoolOptions::new()
        .max_connections(run_options.server.database_max_connections)
        .connect(&run_options.server.database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to database: {:?}", err))?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|err| anyhow!("Failed to run migrations: {:?}", err))?;

    let auction_config = auction::service::Config {
        auction_duration: run_options.auction.auction_duration(),
        sweep_interval:   run_options.auction.auction_interval(),
        store_timeout:    run_options.auction.store_timeout(),
    };
    tracing::info!(config = ?auction_config, "Loaded auction config");

    let task_tracker = TaskTracker::new();
    let auction_service = auction::service::Service::new(
        pool.clone(),
        auction_config.clone(),
        task_tracker.clone(),
        cancellation_token.clone(),
    );
    let bid_service = bid::service::Service::new(
        pool,
        bid::service::Config {
            store_timeout: auction_config.store_timeout,
        },
        auction_service.clone(),
    );
    let store = Arc::new(Store {
        auction_service: auction_service.clone(),
        bid_service,
    });

    let (metric_layer, metric_handle) = PrometheusMetricLayer::pair();
    let sweeper = {
        let cancellation_token = cancellation_token.clone();
        async move {
            auction_service
                .run_closure_sweeper_loop(cancellation_token)
                .await
        }
    };
    let result = tokio::try_join!(
        sweeper,
        api::start_api(
            run_options.clone(),
            store,
            metric_layer,
            cancellation_token.clone(),
        ),
        start_metrics(run_options, metric_handle, cancellation_token.clone()),
    );
    if result.is_err() {
        cancellation_token.cancel();
    }

    task_tracker.close();
    task_tracker.wait().await;
    result.map(|_| ())
}

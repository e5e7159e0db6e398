use {
    crate::{
        auction,
        bid,
        config::RunOptions,
        state::Store,
    },
    anyhow::Result,
    axum::{
        http::StatusCode,
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            get,
            MethodRouter,
        },
        Json,
        Router,
    },
    axum_prometheus::PrometheusMetricLayer,
    clap::crate_version,
    marketplace_api_types::{
        self as api_types,
        ErrorBodyResponse,
        RouteTrait,
    },
    std::sync::Arc,
    tokio_util::sync::CancellationToken,
    tower_http::cors::CorsLayer,
    utoipa::OpenApi,
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

async fn root() -> String {
    format!("Marketplace Auction Server API {}", crate_version!())
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestError {
    /// The request contained invalid parameters
    BadParameters(String),
    /// The auction was not found
    AuctionNotFound,
    /// The bid was not found
    BidNotFound,
    /// A record with the same id already exists
    Conflict(String),
    /// Internal error occurred during processing the request
    TemporarilyUnavailable,
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::AuctionNotFound => (
                StatusCode::NOT_FOUND,
                "Auction with the specified id was not found".to_string(),
            ),
            RestError::BidNotFound => (
                StatusCode::NOT_FOUND,
                "Bid with the specified id was not found".to_string(),
            ),
            RestError::Conflict(msg) => (StatusCode::CONFLICT, format!("Conflict: {}", msg)),
            RestError::TemporarilyUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "This service is temporarily unavailable".to_string(),
            ),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (status, Json(ErrorBodyResponse { error: msg })).into_response()
    }
}

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

pub struct WrappedRouter {
    pub router: Router<Arc<Store>>,
}

impl WrappedRouter {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
        }
    }

    pub fn route(self, path: impl RouteTrait, method_router: MethodRouter<Arc<Store>>) -> Self {
        Self {
            router: self.router.route(&path.full_path(), method_router),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auction::api::post_auction,
        auction::api::get_auctions,
        auction::api::get_auction,
        bid::api::get_auction_bids,
        bid::api::get_auction_winner,
        bid::api::post_bids,
    ),
    components(
        schemas(
            api_types::auction::AuctionCreate,
            api_types::auction::Auction,
            api_types::auction::Auctions,
            api_types::auction::AuctionStatus,
            api_types::auction::ProductCondition,
            api_types::bid::BidCreate,
            api_types::bid::Bid,
            api_types::bid::Bids,
            api_types::bid::BidResult,
            api_types::bid::BidResults,
            ErrorBodyResponse,
        ),
        responses(ErrorBodyResponse),
    ),
    tags(
        (name = "Marketplace Auction Server", description = "Opens timed auctions, admits bids while \
        they are open and resolves the winner once they close.")
    )
)]
struct ApiDoc;

pub fn get_routes() -> Router<Arc<Store>> {
    Router::new()
        .merge(auction::api::get_routes())
        .merge(bid::api::get_routes())
        .route(api_types::Route::Root.as_ref(), get(root))
        .route(api_types::Route::Liveness.as_ref(), get(live))
}

pub async fn start_api(
    run_options: RunOptions,
    store: Arc<Store>,
    metric_layer: PrometheusMetricLayer<'static>,
    cancellation_token: CancellationToken,
) -> Result<()> {
    let app: Router<()> = Router::new()
        .merge(Redoc::with_url(
            api_types::Route::Docs.as_ref().to_string(),
            ApiDoc::openapi(),
        ))
        .merge(get_routes())
        .layer(CorsLayer::permissive())
        .layer(metric_layer)
        .with_state(store);

    tracing::info!(addr = %run_options.server.listen_addr, "Starting API server...");
    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancellation_token.cancelled().await;
            tracing::info!("Shutting down RPC server...");
        })
        .await?;
    Ok(())
}

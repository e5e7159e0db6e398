#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        kernel::db::{
            to_primitive,
            DB,
        },
    },
    axum::async_trait,
    sqlx::{
        types::BigDecimal,
        FromRow,
    },
    std::fmt::Debug,
    time::{
        PrimitiveDateTime,
        UtcOffset,
    },
    tracing::instrument,
};

#[derive(Clone, FromRow, Debug, PartialEq)]
pub struct Bid {
    pub id:            entities::BidId,
    pub auction_id:    AuctionId,
    pub user_id:       entities::UserId,
    pub amount:        BigDecimal,
    pub creation_time: PrimitiveDateTime,
}

impl From<&entities::Bid> for Bid {
    fn from(bid: &entities::Bid) -> Self {
        Self {
            id:            bid.id,
            auction_id:    bid.auction_id,
            user_id:       bid.user_id,
            amount:        bid.amount.clone(),
            creation_time: to_primitive(bid.creation_time),
        }
    }
}

impl From<Bid> for entities::Bid {
    fn from(bid: Bid) -> Self {
        Self {
            id:            bid.id,
            auction_id:    bid.auction_id,
            user_id:       bid.user_id,
            amount:        bid.amount,
            creation_time: bid.creation_time.assume_offset(UtcOffset::UTC),
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_bid(&self, bid: &Bid) -> Result<(), RestError>;
    /// Bids of an auction, oldest first.
    async fn get_bids(&self, auction_id: AuctionId) -> Result<Vec<Bid>, RestError>;
    /// Highest bid of an auction. Equal amounts are ordered by creation time, then by id.
    async fn get_winning_bid(&self, auction_id: AuctionId) -> Result<Option<Bid>, RestError>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_add_bid",
        fields(
            category = "db_queries",
            result = "success",
            name = "add_bid",
            tracing_enabled
        ),
        skip_all
    )]
    async fn add_bid(&self, bid: &Bid) -> Result<(), RestError> {
        sqlx::query(
            "INSERT INTO bid (id, auction_id, user_id, amount, creation_time) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(bid.id)
        .bind(bid.auction_id)
        .bind(bid.user_id)
        .bind(&bid.amount)
        .bind(bid.creation_time)
        .execute(self)
        .await
        .map_err(|e| {
            tracing::Span::current().record("result", "error");
            match e {
                sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
                    RestError::Conflict(format!("Bid {} already exists", bid.id))
                }
                sqlx::Error::Database(ref db_error) if db_error.is_foreign_key_violation() => {
                    RestError::AuctionNotFound
                }
                _ => {
                    tracing::error!(error = e.to_string(), bid = ?bid, "DB: Failed to insert bid");
                    RestError::TemporarilyUnavailable
                }
            }
        })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_bids",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_bids",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_bids(&self, auction_id: AuctionId) -> Result<Vec<Bid>, RestError> {
        sqlx::query_as("SELECT * FROM bid WHERE auction_id = $1 ORDER BY creation_time ASC, id ASC")
            .bind(auction_id)
            .fetch_all(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(
                    error = e.to_string(),
                    auction_id = auction_id.to_string(),
                    "DB: Failed to fetch bids"
                );
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(
        target = "metrics",
        name = "db_get_winning_bid",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_winning_bid",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_winning_bid(&self, auction_id: AuctionId) -> Result<Option<Bid>, RestError> {
        sqlx::query_as(
            "SELECT * FROM bid WHERE auction_id = $1 ORDER BY amount DESC, creation_time ASC, id ASC LIMIT 1",
        )
        .bind(auction_id)
        .fetch_optional(self)
        .await
        .map_err(|e| {
            tracing::Span::current().record("result", "error");
            tracing::error!(
                error = e.to_string(),
                auction_id = auction_id.to_string(),
                "DB: Failed to fetch winning bid"
            );
            RestError::TemporarilyUnavailable
        })
    }
}

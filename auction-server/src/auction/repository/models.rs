#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        kernel::db::{
            to_primitive,
            DB,
        },
    },
    axum::async_trait,
    sqlx::{
        FromRow,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::{
        OffsetDateTime,
        PrimitiveDateTime,
        UtcOffset,
    },
    tracing::instrument,
};

pub const AUCTION_PAGE_SIZE_CAP: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "lowercase")]
pub enum AuctionStatus {
    Active,
    Closed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "product_condition", rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, FromRow, Debug, PartialEq)]
pub struct Auction {
    pub id:            entities::AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: PrimitiveDateTime,
    pub deadline:      PrimitiveDateTime,
}

impl From<entities::AuctionStatus> for AuctionStatus {
    fn from(status: entities::AuctionStatus) -> Self {
        match status {
            entities::AuctionStatus::Active => AuctionStatus::Active,
            entities::AuctionStatus::Closed => AuctionStatus::Closed,
        }
    }
}

impl From<AuctionStatus> for entities::AuctionStatus {
    fn from(status: AuctionStatus) -> Self {
        match status {
            AuctionStatus::Active => entities::AuctionStatus::Active,
            AuctionStatus::Closed => entities::AuctionStatus::Closed,
        }
    }
}

impl From<entities::ProductCondition> for ProductCondition {
    fn from(condition: entities::ProductCondition) -> Self {
        match condition {
            entities::ProductCondition::New => ProductCondition::New,
            entities::ProductCondition::Used => ProductCondition::Used,
            entities::ProductCondition::Refurbished => ProductCondition::Refurbished,
        }
    }
}

impl From<ProductCondition> for entities::ProductCondition {
    fn from(condition: ProductCondition) -> Self {
        match condition {
            ProductCondition::New => entities::ProductCondition::New,
            ProductCondition::Used => entities::ProductCondition::Used,
            ProductCondition::Refurbished => entities::ProductCondition::Refurbished,
        }
    }
}

impl From<&entities::Auction> for Auction {
    fn from(auction: &entities::Auction) -> Self {
        Self {
            id:            auction.id,
            product_name:  auction.product_name.clone(),
            category:      auction.category.clone(),
            description:   auction.description.clone(),
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: to_primitive(auction.creation_time),
            deadline:      to_primitive(auction.deadline),
        }
    }
}

impl From<Auction> for entities::Auction {
    fn from(auction: Auction) -> Self {
        Self {
            id:            auction.id,
            product_name:  auction.product_name,
            category:      auction.category,
            description:   auction.description,
            condition:     auction.condition.into(),
            status:        auction.status.into(),
            creation_time: auction.creation_time.assume_offset(UtcOffset::UTC),
            deadline:      auction.deadline.assume_offset(UtcOffset::UTC),
        }
    }
}

fn escape_like_pattern(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &Auction) -> Result<(), RestError>;
    async fn get_auction(&self, auction_id: entities::AuctionId) -> Result<Auction, RestError>;
    async fn get_auctions(&self, filter: &entities::AuctionFilter)
        -> Result<Vec<Auction>, RestError>;
    /// Closes every active auction whose deadline is before `cutoff` and returns their ids.
    async fn close_expired_auctions(
        &self,
        cutoff: OffsetDateTime,
    ) -> anyhow::Result<Vec<entities::AuctionId>>;
    /// Closes a single auction if it is still active. Returns whether a row changed.
    async fn close_auction(&self, auction_id: entities::AuctionId) -> anyhow::Result<bool>;
}

#[async_trait]
impl Database for DB {
    #[instrument(
        target = "metrics",
        name = "db_add_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "add_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn add_auction(&self, auction: &Auction) -> Result<(), RestError> {
        sqlx::query(
            "INSERT INTO auction (id, product_name, category, description, condition, status, creation_time, deadline) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(auction.id)
        .bind(&auction.product_name)
        .bind(&auction.category)
        .bind(&auction.description)
        .bind(auction.condition)
        .bind(auction.status)
        .bind(auction.creation_time)
        .bind(auction.deadline)
        .execute(self)
        .await
        .map_err(|e| {
            tracing::Span::current().record("result", "error");
            match e {
                sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
                    RestError::Conflict(format!("Auction {} already exists", auction.id))
                }
                _ => {
                    tracing::error!(error = e.to_string(), auction = ?auction, "DB: Failed to insert auction");
                    RestError::TemporarilyUnavailable
                }
            }
        })?;
        Ok(())
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auction(&self, auction_id: entities::AuctionId) -> Result<Auction, RestError> {
        sqlx::query_as("SELECT * FROM auction WHERE id = $1")
            .bind(auction_id)
            .fetch_one(self)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => RestError::AuctionNotFound,
                _ => {
                    tracing::Span::current().record("result", "error");
                    tracing::error!(
                        error = e.to_string(),
                        auction_id = auction_id.to_string(),
                        "Failed to get auction from db"
                    );
                    RestError::TemporarilyUnavailable
                }
            })
    }

    #[instrument(
        target = "metrics",
        name = "db_get_auctions",
        fields(
            category = "db_queries",
            result = "success",
            name = "get_auctions",
            tracing_enabled
        ),
        skip_all
    )]
    async fn get_auctions(
        &self,
        filter: &entities::AuctionFilter,
    ) -> Result<Vec<Auction>, RestError> {
        let mut query = QueryBuilder::new("SELECT * FROM auction WHERE TRUE");
        if let Some(status) = filter.status {
            query.push(" AND status = ");
            query.push_bind(AuctionStatus::from(status));
        }
        if let Some(category) = &filter.category {
            query.push(" AND category = ");
            query.push_bind(category.clone());
        }
        if let Some(product_name) = &filter.product_name {
            query.push(" AND product_name ILIKE ");
            query.push_bind(format!("%{}%", escape_like_pattern(product_name)));
        }
        query.push(" ORDER BY creation_time ASC LIMIT ");
        query.push_bind(AUCTION_PAGE_SIZE_CAP as i64);
        query
            .build_query_as()
            .fetch_all(self)
            .await
            .map_err(|e| {
                tracing::Span::current().record("result", "error");
                tracing::error!(error = e.to_string(), filter = ?filter, "DB: Failed to fetch auctions");
                RestError::TemporarilyUnavailable
            })
    }

    #[instrument(
        target = "metrics",
        name = "db_close_expired_auctions",
        fields(
            category = "db_queries",
            result = "success",
            name = "close_expired_auctions",
            tracing_enabled
        ),
        skip_all
    )]
    async fn close_expired_auctions(
        &self,
        cutoff: OffsetDateTime,
    ) -> anyhow::Result<Vec<entities::AuctionId>> {
        let ids = sqlx::query_scalar(
            "UPDATE auction SET status = $1 WHERE status = $2 AND deadline < $3 RETURNING id",
        )
        .bind(AuctionStatus::Closed)
        .bind(AuctionStatus::Active)
        .bind(to_primitive(cutoff))
        .fetch_all(self)
        .await
        .inspect_err(|_| {
            tracing::Span::current().record("result", "error");
        })?;
        Ok(ids)
    }

    #[instrument(
        target = "metrics",
        name = "db_close_auction",
        fields(
            category = "db_queries",
            result = "success",
            name = "close_auction",
            tracing_enabled
        ),
        skip_all
    )]
    async fn close_auction(&self, auction_id: entities::AuctionId) -> anyhow::Result<bool> {
        let result = sqlx::query("UPDATE auction SET status = $1 WHERE id = $2 AND status = $3")
            .bind(AuctionStatus::Closed)
            .bind(auction_id)
            .bind(AuctionStatus::Active)
            .execute(self)
            .await
            .inspect_err(|_| {
                tracing::Span::current().record("result", "error");
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        time::Duration,
        uuid::Uuid,
    };

    #[test]
    fn test_model_round_trip_keeps_utc_times() {
        let auction = entities::Auction {
            id:            Uuid::new_v4(),
            product_name:  "Lamp".to_string(),
            category:      "home".to_string(),
            description:   "Brass desk lamp".to_string(),
            condition:     entities::ProductCondition::Used,
            status:        entities::AuctionStatus::Active,
            creation_time: OffsetDateTime::UNIX_EPOCH,
            deadline:      OffsetDateTime::UNIX_EPOCH + Duration::minutes(10),
        };
        let model = Auction::from(&auction);
        assert_eq!(model.status, AuctionStatus::Active);
        assert_eq!(model.condition, ProductCondition::Used);
        assert_eq!(entities::Auction::from(model), auction);
    }

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("100%_off"), "100\\%\\_off");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}

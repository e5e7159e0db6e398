use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
        kernel::db::with_store_timeout,
    },
};

pub struct GetAuctionsInput {
    pub filter: entities::AuctionFilter,
}

impl Service {
    pub async fn get_auctions(
        &self,
        input: GetAuctionsInput,
    ) -> Result<Vec<entities::Auction>, RestError> {
        with_store_timeout(
            self.config.store_timeout,
            "get_auctions",
            self.repo.get_auctions(&input.filter),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::auction::service::tests::{
            auction_with_deadline,
            service_with_auctions,
        },
        time::{
            Duration,
            OffsetDateTime,
        },
    };

    #[tokio::test]
    async fn test_filters_by_status_and_product_name() {
        let now = OffsetDateTime::now_utc();
        let mut closed = auction_with_deadline(entities::AuctionStatus::Closed, now);
        closed.product_name = "Film Camera".to_string();
        let mut active = auction_with_deadline(
            entities::AuctionStatus::Active,
            now + Duration::minutes(5),
        );
        active.product_name = "Camera strap".to_string();
        let mut other = active.clone();
        other.id = uuid::Uuid::new_v4();
        other.product_name = "Tripod".to_string();
        let (service, _db) = service_with_auctions(vec![closed, active.clone(), other]);

        let auctions = service
            .get_auctions(GetAuctionsInput {
                filter: entities::AuctionFilter {
                    status:       Some(entities::AuctionStatus::Active),
                    category:     None,
                    product_name: Some("camera".to_string()),
                },
            })
            .await
            .unwrap();
        assert_eq!(auctions, vec![active]);
    }
}

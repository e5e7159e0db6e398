use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        bid::entities,
        kernel::db::with_store_timeout,
    },
};

pub struct GetWinnerInput {
    pub auction_id: AuctionId,
}

impl Service {
    /// Returns the highest bid of an auction, the earliest one if several share the top amount.
    ///
    /// The auction is not required to be closed, callers that need a final result check the
    /// lifecycle first.
    pub async fn get_winner(&self, input: GetWinnerInput) -> Result<entities::Bid, RestError> {
        with_store_timeout(
            self.config.store_timeout,
            "get_winning_bid",
            self.repo.get_winning_bid(input.auction_id),
        )
        .await?
        .ok_or(RestError::BidNotFound)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::{
                entities::AuctionStatus,
                service::{
                    add_auction::AddAuctionInput,
                    tests::{
                        auction_with_deadline,
                        test_config,
                    },
                },
            },
            bid::service::{
                get_bids::GetBidsInput,
                handle_bid::HandleBidInput,
                tests::{
                    bid_create,
                    services_with_store,
                },
            },
        },
        sqlx::types::BigDecimal,
        std::time::Duration,
        time::OffsetDateTime,
    };

    fn accepted(admission: entities::BidAdmission) -> entities::Bid {
        match admission {
            entities::BidAdmission::Accepted(bid) => bid,
            admission => panic!("expected accepted bid, got {:?}", admission),
        }
    }

    #[tokio::test]
    async fn test_no_bids_is_not_found() {
        let (_auction_service, bid_service, db) = services_with_store(test_config());
        let auction = auction_with_deadline(
            AuctionStatus::Closed,
            OffsetDateTime::now_utc(),
        );
        db.insert_auction(auction.clone());

        let result = bid_service
            .get_winner(GetWinnerInput {
                auction_id: auction.id,
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::BidNotFound);
    }

    #[tokio::test]
    async fn test_equal_amounts_resolve_to_earliest_bid() {
        let (_auction_service, bid_service, db) = services_with_store(test_config());
        let auction = auction_with_deadline(
            AuctionStatus::Active,
            OffsetDateTime::now_utc() + time::Duration::minutes(5),
        );
        db.insert_auction(auction.clone());

        let mut accepted_bids = vec![];
        for amount in [4, 9, 9, 2] {
            let admission = bid_service
                .handle_bid(HandleBidInput {
                    bid_create: bid_create(auction.id, amount),
                })
                .await
                .unwrap();
            accepted_bids.push(accepted(admission));
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let winner = bid_service
            .get_winner(GetWinnerInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert_eq!(winner, accepted_bids[1]);
    }

    #[tokio::test]
    async fn test_late_bid_is_rejected_and_early_bid_wins() {
        let mut config = test_config();
        config.auction_duration = Duration::from_secs(1);
        let (auction_service, bid_service, db) = services_with_store(config);
        let auction = auction_service
            .add_auction(AddAuctionInput {
                auction_create: crate::auction::entities::AuctionCreate {
                    product_name: "Desk".to_string(),
                    category:     "furniture".to_string(),
                    description:  "Oak, 140cm".to_string(),
                    condition:    crate::auction::entities::ProductCondition::Used,
                },
            })
            .await
            .unwrap();

        let early = accepted(
            bid_service
                .handle_bid(HandleBidInput {
                    bid_create: bid_create(auction.id, 10),
                })
                .await
                .unwrap(),
        );
        tokio::time::sleep(Duration::from_secs(2)).await;
        let late = bid_service
            .handle_bid(HandleBidInput {
                bid_create: bid_create(auction.id, 20),
            })
            .await
            .unwrap();
        assert_eq!(
            late,
            entities::BidAdmission::Rejected(entities::BidRejectionReason::AuctionCompleted)
        );

        let winner = bid_service
            .get_winner(GetWinnerInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert_eq!(winner, early);
        assert_eq!(winner.amount, BigDecimal::from(10));
        assert_eq!(db.bids(auction.id).len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_bids_are_both_accepted() {
        let (_auction_service, bid_service, db) = services_with_store(test_config());
        let auction = auction_with_deadline(
            AuctionStatus::Active,
            OffsetDateTime::now_utc() + time::Duration::minutes(5),
        );
        db.insert_auction(auction.clone());
        let auction_id = auction.id;

        let handles = [5, 7].map(|amount| {
            let bid_service = bid_service.clone();
            tokio::spawn(async move {
                bid_service
                    .handle_bid(HandleBidInput {
                        bid_create: bid_create(auction_id, amount),
                    })
                    .await
            })
        });
        for handle in handles {
            assert!(matches!(
                handle.await.unwrap(),
                Ok(entities::BidAdmission::Accepted(_))
            ));
        }

        let bids = bid_service
            .get_bids(GetBidsInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert_eq!(bids.len(), 2);
        let winner = bid_service
            .get_winner(GetWinnerInput {
                auction_id: auction.id,
            })
            .await
            .unwrap();
        assert_eq!(winner.amount, BigDecimal::from(7));
    }
}

use {
    crate::{
        auction::AuctionId,
        RouteTrait,
    },
    bigdecimal::BigDecimal,
    serde::{
        Deserialize,
        Serialize,
    },
    serde_with::{
        serde_as,
        DisplayFromStr,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type BidId = Uuid;
pub type UserId = Uuid;

#[serde_as]
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct BidCreate {
    /// The auction this bid is placed on.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub auction_id: AuctionId,
    /// The user placing the bid.
    #[schema(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub user_id:    UserId,
    /// Amount offered, as a decimal string.
    #[schema(example = "10.50", value_type = String)]
    #[serde_as(as = "DisplayFromStr")]
    pub amount:     BigDecimal,
}

#[serde_as]
#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug, PartialEq)]
pub struct Bid {
    /// The unique id for the bid.
    #[schema(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:            BidId,
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub auction_id:    AuctionId,
    #[schema(example = "0b03ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub user_id:       UserId,
    #[schema(example = "10.50", value_type = String)]
    #[serde_as(as = "DisplayFromStr")]
    pub amount:        BigDecimal,
    /// The time server received the bid formatted in rfc3339.
    #[schema(example = "2024-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct Bids {
    pub items: Vec<Bid>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BidResult {
    /// The bid was stored.
    #[schema(title = "Accepted")]
    Accepted { bid: Bid },
    /// The auction no longer accepts bids, nothing was stored.
    #[schema(title = "Rejected")]
    Rejected { reason: String },
    /// The bid could not be processed.
    #[schema(title = "Failed")]
    Failed { error: String },
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct BidResults {
    pub items: Vec<BidResult>,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostBids,
}

impl RouteTrait for Route {
    fn full_path(&self) -> String {
        let path = format!(
            "{}{}{}",
            crate::Route::V1.as_ref(),
            crate::Route::Bid.as_ref(),
            self.as_ref()
        );
        path.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::str::FromStr,
    };

    #[test]
    fn test_bid_create_amount_is_decimal_string() {
        let bid_create: BidCreate = serde_json::from_str(
            r#"{
                "auction_id": "beedbeed-58cc-4372-a567-0e02b2c3d479",
                "user_id": "0b03ee3e-58cc-4372-a567-0e02b2c3d479",
                "amount": "10.50"
            }"#,
        )
        .unwrap();
        assert_eq!(bid_create.amount, BigDecimal::from_str("10.5").unwrap());
    }

    #[test]
    fn test_bid_result_is_tagged_by_status() {
        let value = serde_json::to_value(BidResult::Rejected {
            reason: "auction completed".to_string(),
        })
        .unwrap();
        assert_eq!(value["status"], "rejected");
        assert_eq!(value["reason"], "auction completed");
    }

    #[test]
    fn test_post_bids_path() {
        assert_eq!(Route::PostBids.full_path(), "/v1/bids");
    }
}

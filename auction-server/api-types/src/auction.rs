use {
    crate::RouteTrait,
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
    uuid::Uuid,
};

pub type AuctionId = Uuid;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    /// The auction accepts bids until its deadline.
    Active,
    /// The auction no longer accepts bids.
    Closed,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

/// Parameters needed to open a new auction.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct AuctionCreate {
    #[schema(example = "Mechanical keyboard")]
    pub product_name: String,
    #[schema(example = "electronics")]
    pub category:     String,
    #[schema(example = "Brown switches, barely used")]
    pub description:  String,
    pub condition:    ProductCondition,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, Debug, PartialEq)]
pub struct Auction {
    /// The unique id for the auction.
    #[schema(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:            AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    /// The time the auction was opened formatted in rfc3339.
    #[schema(example = "2024-05-23T21:26:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub creation_time: OffsetDateTime,
    /// The time after which no bid is accepted, formatted in rfc3339.
    #[schema(example = "2024-05-23T21:36:57.329954Z", value_type = String)]
    #[serde(with = "time::serde::rfc3339")]
    pub deadline:      OffsetDateTime,
}

#[derive(Serialize, Deserialize, ToResponse, ToSchema, Clone, Debug)]
pub struct Auctions {
    pub items: Vec<Auction>,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
#[into_params(parameter_in = Path)]
pub struct AuctionIdParams {
    /// The id of the auction.
    #[param(example = "beedbeed-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub auction_id: AuctionId,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug, Default)]
#[into_params(parameter_in = Query)]
pub struct GetAuctionsQueryParams {
    /// Only return auctions with this status.
    pub status:       Option<AuctionStatus>,
    /// Only return auctions in this category.
    #[param(example = "electronics")]
    pub category:     Option<String>,
    /// Only return auctions whose product name contains this text, ignoring case.
    #[param(example = "keyboard")]
    pub product_name: Option<String>,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "")]
    PostAuction,
    #[strum(serialize = "")]
    GetAuctions,
    #[strum(serialize = ":auction_id")]
    GetAuction,
    #[strum(serialize = ":auction_id/bids")]
    GetAuctionBids,
    #[strum(serialize = ":auction_id/winner")]
    GetAuctionWinner,
}

impl RouteTrait for Route {
    fn full_path(&self) -> String {
        let path = format!(
            "{}{}{}",
            crate::Route::V1.as_ref(),
            crate::Route::Auction.as_ref(),
            self.as_ref()
        );
        path.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::RouteTrait,
    };

    #[test]
    fn test_full_paths() {
        assert_eq!(Route::PostAuction.full_path(), "/v1/auctions");
        assert_eq!(Route::GetAuction.full_path(), "/v1/auctions/:auction_id");
        assert_eq!(
            Route::GetAuctionWinner.full_path(),
            "/v1/auctions/:auction_id/winner"
        );
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&AuctionStatus::Closed).unwrap(),
            "\"closed\""
        );
        let condition: ProductCondition = serde_json::from_str("\"refurbished\"").unwrap();
        assert_eq!(condition, ProductCondition::Refurbished);
    }
}

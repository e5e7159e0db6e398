use {
    crate::kernel::db::now_in_store_precision,
    std::time::Duration,
    time::OffsetDateTime,
    uuid::Uuid,
};

pub type AuctionId = Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuctionStatus {
    Active,
    Closed,
}

impl AuctionStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, AuctionStatus::Closed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Auction {
    pub id:            AuctionId,
    pub product_name:  String,
    pub category:      String,
    pub description:   String,
    pub condition:     ProductCondition,
    pub status:        AuctionStatus,
    pub creation_time: OffsetDateTime,
    pub deadline:      OffsetDateTime,
}

#[derive(Clone, Debug)]
pub struct AuctionCreate {
    pub product_name: String,
    pub category:     String,
    pub description:  String,
    pub condition:    ProductCondition,
}

impl Auction {
    /// Opens a new auction that stays active for `duration` from now. Returns `None` when the
    /// deadline is not representable.
    pub fn new(auction_create: AuctionCreate, duration: Duration) -> Option<Self> {
        let creation_time = now_in_store_precision();
        let deadline = time::Duration::try_from(duration)
            .ok()
            .and_then(|duration| creation_time.checked_add(duration))?;
        Some(Self {
            id: Uuid::new_v4(),
            product_name: auction_create.product_name,
            category: auction_create.category,
            description: auction_create.description,
            condition: auction_create.condition,
            status: AuctionStatus::Active,
            creation_time,
            deadline,
        })
    }
}

/// Filter for scanning the auction store. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuctionFilter {
    pub status:       Option<AuctionStatus>,
    pub category:     Option<String>,
    /// Case-insensitive substring of the product name.
    pub product_name: Option<String>,
}

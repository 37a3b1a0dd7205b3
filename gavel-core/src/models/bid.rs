use crate::ClientId;
use time::OffsetDateTime;

/// An offer to buy a product, in whole dollars.
///
/// Bids are owned by the product they were placed on and are never modified
/// once recorded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bid {
    /// Offered price in whole dollars
    pub amount: i64,
    /// The client making the offer
    pub bidder: ClientId,
    /// Whether the bidder wants the item shipped instead of collected
    pub home_delivery: bool,
    /// Submission time
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub placed_on: OffsetDateTime,
}

impl Bid {
    /// Create a bid stamped with the current time
    pub fn new(amount: i64, bidder: ClientId, home_delivery: bool) -> Self {
        Self {
            amount,
            bidder,
            home_delivery,
            placed_on: OffsetDateTime::now_utc(),
        }
    }

    /// Project this bid for a viewer, keeping or dropping the bidder
    pub fn view(&self, reveal_bidder: bool) -> VisibleBid {
        VisibleBid {
            amount: self.amount,
            bidder: reveal_bidder.then_some(self.bidder),
            home_delivery: self.home_delivery,
            placed_on: self.placed_on,
        }
    }
}

/// A bid as shown to a particular viewer.
///
/// Only the seller of the product sees who placed the bid; for everyone else
/// `bidder` is `None`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VisibleBid {
    /// Offered price in whole dollars
    pub amount: i64,
    /// The bidder, if the viewer may know it
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub bidder: Option<ClientId>,
    /// Home delivery requested
    pub home_delivery: bool,
    /// Submission time
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub placed_on: OffsetDateTime,
}

impl VisibleBid {
    /// Whether the bidder has been withheld from this view
    pub fn is_redacted(&self) -> bool {
        self.bidder.is_none()
    }
}

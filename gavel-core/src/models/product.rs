use super::Bid;
use crate::{ClientId, ProductId, store::Entity};
use time::OffsetDateTime;

/// The product type used when a seller leaves the type blank
pub const UNCATEGORISED: &str = "Uncategorised";

/// An item offered for sale.
///
/// The bid list is append-only and private; it is only reachable through the
/// [`ProductCatalog`](crate::catalog::ProductCatalog), which applies the
/// visibility rules. A product is sold exactly when it has a winning bid.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Product {
    pub(crate) id: ProductId,
    /// Free-text description
    pub description: String,
    /// Free-text product type
    pub kind: String,
    /// Starting price in whole dollars
    pub initial_cost: i64,
    /// The client selling the product
    pub seller: ClientId,
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub(crate) listed_on: OffsetDateTime,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) bids: Vec<Bid>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) winning_bid: Option<Bid>,
}

impl Product {
    /// Create an unlisted product. A blank `kind` becomes [`UNCATEGORISED`].
    pub fn new(
        description: impl Into<String>,
        kind: impl Into<String>,
        initial_cost: i64,
        seller: ClientId,
    ) -> Self {
        let kind = kind.into();
        let kind = if kind.trim().is_empty() {
            UNCATEGORISED.to_owned()
        } else {
            kind
        };

        Self {
            id: ProductId::generate(),
            description: description.into(),
            kind,
            initial_cost,
            seller,
            listed_on: OffsetDateTime::now_utc(),
            bids: Vec::new(),
            winning_bid: None,
        }
    }

    /// The catalog identifier
    pub fn id(&self) -> ProductId {
        self.id
    }

    /// When the product entered the catalog
    pub fn listed_on(&self) -> OffsetDateTime {
        self.listed_on
    }

    /// Number of bids received so far
    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    /// Whether any bids have been received
    pub fn has_bids(&self) -> bool {
        !self.bids.is_empty()
    }

    /// The bid chosen at settlement
    pub fn winning_bid(&self) -> Option<&Bid> {
        self.winning_bid.as_ref()
    }

    /// A product is sold once it has a winning bid
    pub fn is_sold(&self) -> bool {
        self.winning_bid.is_some()
    }

    /// The highest bid, preferring the earliest submitted among equal amounts
    pub fn highest_bid(&self) -> Option<&Bid> {
        self.bids.iter().fold(None, |best: Option<&Bid>, bid| match best {
            Some(best) if best.amount >= bid.amount => Some(best),
            _ => Some(bid),
        })
    }

    /// The highest bid amount, or the initial cost when nobody has bid
    pub fn highest_bid_amount(&self) -> i64 {
        self.highest_bid()
            .map(|bid| bid.amount)
            .unwrap_or(self.initial_cost)
    }
}

impl Entity for Product {
    type Id = ProductId;
    const KIND: &'static str = "product";

    fn id(&self) -> ProductId {
        self.id
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[fixture]
    fn product() -> Product {
        Product::new("Wide fit", "Pants", 50, ClientId::generate())
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_blank_kind_is_uncategorised(#[case] kind: &str) {
        let product = Product::new("Stretchy", kind, 10, ClientId::generate());
        assert_eq!(product.kind, UNCATEGORISED);
        assert_eq!(product.to_string(), "Stretchy (Uncategorised)");
    }

    #[rstest]
    fn test_highest_without_bids(product: Product) {
        assert!(product.highest_bid().is_none());
        assert_eq!(product.highest_bid_amount(), 50);
        assert!(!product.is_sold());
    }

    #[rstest]
    fn test_highest_prefers_earliest_on_ties(mut product: Product) {
        let early = ClientId::generate();
        let late = ClientId::generate();
        product.bids.push(Bid::new(60, ClientId::generate(), false));
        product.bids.push(Bid::new(80, early, true));
        product.bids.push(Bid::new(80, late, false));

        let best = product.highest_bid().unwrap();
        assert_eq!(best.bidder, early);
        assert_eq!(product.highest_bid_amount(), 80);
    }
}

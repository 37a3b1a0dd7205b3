use super::{Bid, Product};
use std::ops::{Add, Sub};

/// The largest starting cost or bid, in whole dollars, the catalog accepts.
pub const MAX_DOLLARS: i64 = i32::MAX as i64;

/// A signed amount of money in cents.
///
/// Bids and costs are whole dollars, but taxes are percentages, so everything
/// derived at settlement is carried in cents to stay exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Amount(pub i64);

impl Amount {
    /// No money
    pub const ZERO: Self = Self(0);

    /// Convert whole dollars into cents, saturating at the `i64` bounds
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars.saturating_mul(100))
    }

    /// The raw number of cents
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// The amount as fractional dollars
    pub fn as_dollars(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// `bps` basis points of this amount, truncated to the cent
    pub fn basis_points(self, bps: u32) -> Self {
        let cents = i128::from(self.0) * i128::from(bps) / 10_000;
        Self(i64::try_from(cents).unwrap_or(if cents < 0 { i64::MIN } else { i64::MAX }))
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

// Renders as "$1,234.56", with a leading minus for losses
impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        let dollars = (cents / 100).to_string();

        let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
        for (i, digit) in dollars.chars().enumerate() {
            if i > 0 && (dollars.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        write!(f, "{sign}${grouped}.{:02}", cents % 100)
    }
}

/// The taxes and house fees applied when a product is sold.
///
/// Monetary fields are whole dollars; the government tax is expressed in basis
/// points of the winning bid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FeeSchedule {
    /// Charged to the buyer for home delivery, and remitted as tax
    pub home_delivery_fee: i64,
    /// Government tax on the winning bid, in basis points
    pub government_tax_bps: u32,
    /// Auction house cut when the buyer chose home delivery
    pub home_delivery_deduction: i64,
    /// Auction house cut when the buyer collects in person
    pub click_and_collect_deduction: i64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            home_delivery_fee: 5,
            government_tax_bps: 1_500,
            home_delivery_deduction: 20,
            click_and_collect_deduction: 10,
        }
    }
}

/// The financial breakdown of a completed sale.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Settlement {
    /// The bid that won the product
    pub winning_bid: Bid,
    /// What the buyer pays, including the delivery fee
    pub total_paid: Amount,
    /// Tax arising from home delivery
    pub home_delivery_tax: Amount,
    /// Government tax on the bid
    pub government_tax: Amount,
    /// Sum of both taxes
    pub total_tax: Amount,
    /// The auction house's cut
    pub auction_house_deduction: Amount,
    /// `(total_paid - initial_cost) - (total_tax + auction_house_deduction)`
    pub net_profit: Amount,
}

impl Settlement {
    /// Compute the breakdown of selling at `winning_bid` an item that started at `initial_cost`.
    pub fn compute(initial_cost: i64, winning_bid: &Bid, fees: &FeeSchedule) -> Self {
        let bid = Amount::from_dollars(winning_bid.amount);
        let delivery = winning_bid.home_delivery;

        let home_delivery_tax = if delivery {
            Amount::from_dollars(fees.home_delivery_fee)
        } else {
            Amount::ZERO
        };
        let total_paid = bid + home_delivery_tax;
        let government_tax = bid.basis_points(fees.government_tax_bps);
        let total_tax = home_delivery_tax + government_tax;
        let auction_house_deduction = Amount::from_dollars(if delivery {
            fees.home_delivery_deduction
        } else {
            fees.click_and_collect_deduction
        });
        let net_profit = (total_paid - Amount::from_dollars(initial_cost))
            - (total_tax + auction_house_deduction);

        Self {
            winning_bid: winning_bid.clone(),
            total_paid,
            home_delivery_tax,
            government_tax,
            total_tax,
            auction_house_deduction,
            net_profit,
        }
    }

    /// The breakdown for a sold product, or `None` if it has not been settled
    pub fn for_product(product: &Product, fees: &FeeSchedule) -> Option<Self> {
        product
            .winning_bid()
            .map(|bid| Self::compute(product.initial_cost, bid, fees))
    }
}

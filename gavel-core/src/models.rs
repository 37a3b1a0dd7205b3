mod bid;
mod client;
mod product;
mod settlement;

pub use bid::{Bid, VisibleBid};
pub use client::{Client, ClientDraft};
pub use product::{Product, UNCATEGORISED};
pub use settlement::{Amount, FeeSchedule, MAX_DOLLARS, Settlement};

pub use crate::{ClientId, ProductId};

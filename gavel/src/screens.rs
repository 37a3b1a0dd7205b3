//! The two menus of the auction house and the actions behind them.
//!
//! A logged out user sees the [`AuthAction`] menu; once logged in the
//! [`MarketAction`] menu replaces it until the client logs out.

use crate::{
    app::{ActionError, App},
    console::{Console, Tone},
};
use gavel_core::models::Amount;
use time::{OffsetDateTime, macros::format_description};

mod authentication;
pub use authentication::AuthAction;

mod marketplace;
pub use marketplace::MarketAction;

const RULE: &str = "====================================";

/// Whole dollars rendered as currency, e.g. `$1,250.00`
pub(crate) fn dollars(amount: i64) -> String {
    Amount::from_dollars(amount).to_string()
}

/// Timestamps are shown in UTC to the second
pub(crate) fn timestamp(at: OffsetDateTime) -> String {
    at.format(format_description!(
        "[day]/[month]/[year] [hour]:[minute]:[second]"
    ))
    .unwrap_or_else(|_| at.to_string())
}

impl<C: Console> App<C> {
    pub(crate) fn greeting(&mut self) -> Result<(), ActionError> {
        self.console.say(Tone::Warning, RULE)?;
        self.console.say(Tone::Warning, "Welcome to Gavel!")?;
        self.console.say(
            Tone::Warning,
            &format!("Version {}", env!("CARGO_PKG_VERSION")),
        )?;
        self.console.say(Tone::Warning, RULE)?;
        Ok(())
    }

    pub(crate) fn farewell(&mut self) -> Result<(), ActionError> {
        self.console.say(Tone::Warning, RULE)?;
        self.console.say(Tone::Warning, "Goodbye :)")?;
        self.console.say(Tone::Warning, RULE)?;
        Ok(())
    }
}

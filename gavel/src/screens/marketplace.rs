use super::{dollars, timestamp};
use crate::{
    app::{ActionError, App},
    console::{Console, Tone},
    menu::{Menu, MenuItem},
    table::Table,
};
use gavel_core::{
    ClientId, ProductId,
    catalog::CatalogError,
    models::{Bid, Client, MAX_DOLLARS, Product, Settlement, UNCATEGORISED},
    store::FilterMode,
};
use tracing::{Level, event};

/// What a logged in client can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarketAction {
    /// List a new product for sale
    RegisterItem,
    /// Show the client's unsold products
    ListMine,
    /// Search other sellers' products by type
    Search,
    /// Bid on another seller's product
    PlaceBid,
    /// Show the bids on one of the client's products
    ListBids,
    /// Sell one of the client's products to its highest bidder
    Sell,
    /// Return to the authentication menu
    Logout,
}

impl MarketAction {
    /// The marketplace menu, with Logout pinned last.
    pub fn menu() -> Menu<Self> {
        Menu::new(
            [
                MenuItem::new(999, "Logout", Self::Logout),
                MenuItem::new(1, "Register item for sale", Self::RegisterItem),
                MenuItem::new(2, "List my items", Self::ListMine),
                MenuItem::new(3, "Search for items", Self::Search),
                MenuItem::new(4, "Place a bid on an item", Self::PlaceBid),
                MenuItem::new(5, "List bids received for my items", Self::ListBids),
                MenuItem::new(
                    6,
                    "Sell one of my items to the highest bidder",
                    Self::Sell,
                ),
            ],
            true,
        )
    }
}

/// A product picked from a numbered table.
struct Pick {
    number: usize,
    id: ProductId,
    label: String,
}

impl<C: Console> App<C> {
    pub(crate) fn marketplace_turn(&mut self) -> Result<(), ActionError> {
        self.select(&MarketAction::menu(), |app, action| match action {
            MarketAction::RegisterItem => app.register_item(),
            MarketAction::ListMine => app.list_my_items(),
            MarketAction::Search => app.search_items(),
            MarketAction::PlaceBid => app.place_bid(),
            MarketAction::ListBids => app.list_bids(),
            MarketAction::Sell => app.sell_to_highest_bidder(),
            MarketAction::Logout => app.logout(),
        })
    }

    fn register_item(&mut self) -> Result<(), ActionError> {
        let seller = self.current_client_id()?;

        let kind = self.console.text("Type", true)?;
        if kind.is_empty() {
            self.console.say(Tone::Plain, &format!("    | {UNCATEGORISED}"))?;
        }
        let description = self.console.text("Description", false)?;
        let initial_cost = self.console.integer("Initial bid", 0, MAX_DOLLARS)?;

        let product = Product::new(description, kind, initial_cost, seller);
        let listed = format!("{}, {}", product.kind, product.description);
        match self.catalog.list(product) {
            Ok(_) => self.notify(Tone::Success, &format!("{listed} was listed successfully!")),
            Err(error) => {
                event!(Level::ERROR, error = %error, "failed to list product");
                self.notify(
                    Tone::Error,
                    "There was an error listing your product, try again.",
                )
            }
        }
    }

    fn list_my_items(&mut self) -> Result<(), ActionError> {
        let client = self.current_client()?;
        let owner = client.full_name();

        let mut table = Table::new([
            "Description",
            "Type",
            "Starting Cost",
            "Bids",
            "Highest Bid",
            "Listed On",
        ]);
        for product in self
            .catalog
            .query_by_seller([client.id()], FilterMode::Include)
        {
            let highest = if product.has_bids() {
                dollars(product.highest_bid_amount())
            } else {
                "N/A".to_owned()
            };
            table.row([
                product.description.clone(),
                product.kind.clone(),
                dollars(product.initial_cost),
                product.bid_count().to_string(),
                highest,
                timestamp(product.listed_on()),
            ]);
        }

        if table.is_empty() {
            return self.notify(Tone::Error, &format!("{owner} has no items for sale."));
        }
        self.console
            .say(Tone::Plain, &format!("Items owned by {owner}:"))?;
        self.console.table(&table)?;
        Ok(())
    }

    fn search_items(&mut self) -> Result<(), ActionError> {
        let viewer = self.current_client_id()?;
        let fragment = self.console.text("Type", false)?;

        let table = self.offers_table(&fragment, viewer, false).0;
        if table.is_empty() {
            return self.notify(
                Tone::Error,
                &format!("No products were found containing the query {fragment}."),
            );
        }
        self.console.say(
            Tone::Plain,
            &format!("Found {} results for '{fragment}':", table.len()),
        )?;
        self.console.table(&table)?;
        Ok(())
    }

    fn place_bid(&mut self) -> Result<(), ActionError> {
        let bidder = self.current_client_id()?;
        let fragment = self.console.text("Type", false)?;

        let (table, picks) = self.offers_table(&fragment, bidder, true);
        if picks.is_empty() {
            return self.notify(
                Tone::Error,
                &format!("No products were found containing the word {fragment}."),
            );
        }
        self.console.say(
            Tone::Plain,
            &format!("Found {} results for '{fragment}':", picks.len()),
        )?;
        self.console.table(&table)?;

        let Some(pick) = self.pick(picks)? else {
            return Ok(());
        };
        self.console.say(
            Tone::Plain,
            &format!("Bidding on item {} - {}", pick.number, pick.label),
        )?;

        let amount = self.console.integer("Amount ($)", 0, MAX_DOLLARS)?;
        let home_delivery = self.console.boolean("Home Delivery")?;

        self.console.blank()?;
        self.console.say(
            Tone::Warning,
            &format!("Are you sure you want to bid on {}?", pick.label),
        )?;
        if !self.console.boolean("Proceed?")? {
            return self.notify(Tone::Critical, "Bid discarded! No action has been made.");
        }

        self.catalog
            .record_bid(pick.id, Bid::new(amount, bidder, home_delivery))?;
        self.notify(
            Tone::Success,
            &format!("Your bid of {} was placed successfully!", dollars(amount)),
        )
    }

    fn list_bids(&mut self) -> Result<(), ActionError> {
        let seller = self.current_client_id()?;

        let mut table = Table::new(["Item #", "Description", "Type", "Listed On"]);
        let picks = self.my_items(seller, |number, product| {
            table.row([
                number.to_string(),
                product.description.clone(),
                product.kind.clone(),
                timestamp(product.listed_on()),
            ]);
        });
        if picks.is_empty() {
            return self.notify(Tone::Error, "You have no items for sale.");
        }
        self.console
            .say(Tone::Plain, "Please choose one of the following:")?;
        self.console.table(&table)?;

        let Some(pick) = self.pick(picks)? else {
            return Ok(());
        };

        let mut bids = Table::new(["Bidder Name", "Bidder Email", "Amount", "Home Delivery"]);
        for bid in self.catalog.visible_bids(pick.id, Some(seller))? {
            let bidder = bid.bidder.and_then(|id| self.registry.get(id));
            bids.row([
                bidder.map(Client::full_name).unwrap_or_default(),
                bidder.map(|client| client.email.clone()).unwrap_or_default(),
                dollars(bid.amount),
                if bid.home_delivery { "Yes" } else { "No" }.to_owned(),
            ]);
        }

        if bids.is_empty() {
            return self.notify(
                Tone::Error,
                &format!("There are no bids yet on item {}.", pick.number),
            );
        }
        self.console
            .say(Tone::Plain, &format!("Bids received on item {}:", pick.number))?;
        self.console.table(&bids)?;
        Ok(())
    }

    fn sell_to_highest_bidder(&mut self) -> Result<(), ActionError> {
        let seller = self.current_client_id()?;

        let mut table = Table::new([
            "Item #",
            "Description",
            "Type",
            "Bids",
            "Current Price",
            "Listed On",
        ]);
        let picks = self.my_items(seller, |number, product| {
            table.row([
                number.to_string(),
                product.description.clone(),
                product.kind.clone(),
                product.bid_count().to_string(),
                dollars(product.highest_bid_amount()),
                timestamp(product.listed_on()),
            ]);
        });
        if picks.is_empty() {
            return self.notify(Tone::Error, "You have no items for sale.");
        }
        self.console
            .say(Tone::Plain, "Please choose one of the following to sell:")?;
        self.console.table(&table)?;

        let Some(pick) = self.pick(picks)? else {
            return Ok(());
        };

        let winner = match self.catalog.settle(pick.id) {
            Ok(winner) => winner,
            Err(CatalogError::NoBids(_)) => {
                return self.notify(Tone::Error, "This item has no bids.");
            }
            Err(error) => return Err(error.into()),
        };
        self.notify(Tone::Warning, "Commencing sale of product")?;

        let settlement = self
            .catalog
            .get(pick.id)
            .and_then(|product| Settlement::for_product(product, &self.fees))
            .ok_or(CatalogError::NotFound(pick.id))?;
        let buyer = self.describe_client(winner.bidder)?;
        let address = self
            .registry
            .get(winner.bidder)
            .map(|client| client.address.clone())
            .unwrap_or_default();

        self.print_settlement(&settlement)?;

        self.notify(
            Tone::Success,
            &format!(
                "{buyer} has paid a total of {} including total tax of {}.",
                settlement.total_paid, settlement.total_tax
            ),
        )?;
        let requested = if winner.home_delivery {
            format!(
                "Home Delivery for an additional {}.",
                dollars(self.fees.home_delivery_fee)
            )
        } else {
            "Click & Collect from the auction house.".to_owned()
        };
        self.notify(
            Tone::Success,
            &format!(
                "{} has been sold to {buyer} for {} and has requested {requested}",
                pick.label,
                dollars(winner.amount)
            ),
        )?;
        if winner.home_delivery {
            self.notify(
                Tone::Success,
                &format!("You must ship the item to: {address}"),
            )?;
        }
        Ok(())
    }

    fn print_settlement(&mut self, settlement: &Settlement) -> Result<(), ActionError> {
        let delivery = settlement.winning_bid.home_delivery;
        let (home_delivery_cut, collect_cut) = if delivery {
            (settlement.auction_house_deduction, Default::default())
        } else {
            (Default::default(), settlement.auction_house_deduction)
        };
        let rate = f64::from(self.fees.government_tax_bps) / 100.0;

        let lines = [
            format!("Total Paid: {}", settlement.total_paid),
            String::new(),
            "Tax".to_owned(),
            format!("  Home Delivery Tax: {}", settlement.home_delivery_tax),
            format!("  Government ({rate}%): {}", settlement.government_tax),
            format!(" Total: {}", settlement.total_tax),
            String::new(),
            "Auction House Deductions".to_owned(),
            format!("  Home Delivery: {home_delivery_cut}"),
            format!("  Click & Collect: {collect_cut}"),
            format!(" Total: {}", settlement.auction_house_deduction),
            String::new(),
            format!("Net Profit: {}", settlement.net_profit),
            String::new(),
        ];
        for line in lines {
            self.console.say(Tone::Plain, &line)?;
        }
        Ok(())
    }

    fn logout(&mut self) -> Result<(), ActionError> {
        let client = self.current_client()?.to_string();
        self.notify(Tone::Warning, &format!("!! Logging out {client} !!"))?;
        self.session.logout();
        self.notify(Tone::Success, &format!("{client} has been logged out!"))
    }

    /// Build the table of unsold products from other sellers whose type
    /// contains `fragment`, optionally numbering them for selection.
    fn offers_table(
        &self,
        fragment: &str,
        viewer: ClientId,
        numbered: bool,
    ) -> (Table, Vec<Pick>) {
        let mut headers = vec![
            "Description",
            "Type",
            "Listed By",
            "Bids",
            "Current Price",
            "Listed On",
        ];
        if numbered {
            headers.insert(0, "Item #");
        }
        let mut table = Table::new(headers);
        let mut picks = Vec::new();

        for (product, number) in self.catalog.search(fragment, viewer).into_iter().zip(1..) {
            let seller = self
                .registry
                .get(product.seller)
                .map(Client::full_name)
                .unwrap_or_default();

            let mut cells = vec![
                product.description.clone(),
                product.kind.clone(),
                seller,
                product.bid_count().to_string(),
                dollars(product.highest_bid_amount()),
                timestamp(product.listed_on()),
            ];
            if numbered {
                cells.insert(0, number.to_string());
            }
            table.row(cells);
            picks.push(Pick {
                number,
                id: product.id(),
                label: product.to_string(),
            });
        }
        (table, picks)
    }

    /// The seller's unsold products, numbered from 1, with `row` called on each.
    fn my_items(
        &self,
        seller: ClientId,
        mut row: impl FnMut(usize, &Product),
    ) -> Vec<Pick> {
        self.catalog
            .query_by_seller([seller], FilterMode::Include)
            .into_iter()
            .zip(1..)
            .map(|(product, number)| {
                row(number, product);
                Pick {
                    number,
                    id: product.id(),
                    label: product.to_string(),
                }
            })
            .collect()
    }

    fn pick(&mut self, picks: Vec<Pick>) -> Result<Option<Pick>, ActionError> {
        let Some(choice) = self.console.choice(picks.len(), "Item #")? else {
            return Ok(None);
        };
        self.console.blank()?;
        Ok(picks.into_iter().nth(choice - 1))
    }
}

//! Generated marketplace contents for trying the program out.
//!
//! Every demo client shares the configured password and logs in with
//! `<first name>@email.com`. Once the list of first names is exhausted the
//! client's index is appended to keep emails unique.

use crate::DemoConfig;
use gavel_core::{
    ClientId,
    catalog::{CatalogError, ProductCatalog},
    models::{Bid, ClientDraft, MAX_DOLLARS, Product},
    registry::{ClientRegistry, RegistryError},
};
use rand::{Rng, seq::IndexedRandom as _};
use tracing::{Level, event};

const FIRST_NAMES: &[&str] = &[
    "Bob", "Jane", "Mark", "Sally", "Zoe", "Zac", "Fiona", "David",
];
const LAST_NAMES: &[&str] = &[
    "Adams",
    "Freeman",
    "Edwards",
    "Eagles",
    "Parascos",
    "Silverman",
];
const KINDS: &[&str] = &["Dress", "Shirt", "Pants", "Underwear"];
const DESCRIPTIONS: &[&str] = &[
    "Best dress",
    "Double pair",
    "You'll love this",
    "Wide fit",
    "Very loose",
    "Little room",
    "Stretchy",
];

/// Seeding stopped because a store refused the generated data.
#[derive(thiserror::Error, Debug)]
pub enum SeedError {
    /// A generated client was rejected
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A generated product or bid was rejected
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Register the demo clients, then list their products and bids.
pub fn seed(
    registry: &mut ClientRegistry,
    catalog: &mut ProductCatalog,
    config: &DemoConfig,
    rng: &mut impl Rng,
) -> Result<(), SeedError> {
    let clients = seed_clients(registry, config, rng)?;
    let bids = seed_products(catalog, &clients, config, rng)?;

    event!(
        Level::INFO,
        clients = clients.len(),
        products = catalog.len(),
        bids,
        "seeded demo marketplace"
    );
    Ok(())
}

fn seed_clients(
    registry: &mut ClientRegistry,
    config: &DemoConfig,
    rng: &mut impl Rng,
) -> Result<Vec<ClientId>, RegistryError> {
    (0..config.clients)
        .map(|i| {
            let first_name = FIRST_NAMES[i % FIRST_NAMES.len()];
            let email = if i < FIRST_NAMES.len() {
                format!("{}@email.com", first_name.to_lowercase())
            } else {
                format!("{}{i}@email.com", first_name.to_lowercase())
            };

            registry.register(ClientDraft {
                first_name: first_name.to_owned(),
                last_name: pick(LAST_NAMES, rng).to_owned(),
                email,
                password: config.password.clone(),
                address: format!("{i} Demo Street, Brisbane QLD 4000, Australia"),
            })
        })
        .collect()
}

fn seed_products(
    catalog: &mut ProductCatalog,
    clients: &[ClientId],
    config: &DemoConfig,
    rng: &mut impl Rng,
) -> Result<usize, CatalogError> {
    let mut bids = 0;

    for _ in 0..clients.len() * config.products_per_client {
        let Some(&seller) = clients.choose(rng) else {
            break;
        };
        let cost = rng.random_range(0..config.max_initial_cost.clamp(1, MAX_DOLLARS + 1));
        let product = Product::new(pick(DESCRIPTIONS, rng), pick(KINDS, rng), cost, seller);
        let product_id = catalog.list(product)?;

        let bidders = clients
            .iter()
            .copied()
            .filter(|client| *client != seller)
            .collect::<Vec<_>>();
        let count = rng.random_range(0..config.max_bids_per_product.max(1));
        for _ in 0..count {
            let Some(&bidder) = bidders.choose(rng) else {
                break;
            };
            let amount = rng.random_range(cost..config.max_bid.clamp(cost + 1, MAX_DOLLARS + 1));
            catalog.record_bid(product_id, Bid::new(amount, bidder, rng.random_bool(0.5)))?;
            bids += 1;
        }
    }
    Ok(bids)
}

fn pick<'a>(options: &[&'a str], rng: &mut impl Rng) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

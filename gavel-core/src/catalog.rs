use crate::{
    ClientId, ProductId,
    models::{Bid, MAX_DOLLARS, Product, VisibleBid},
    store::{EntityStore, FilterMode, StoreError, filter_set},
};
use time::OffsetDateTime;
use tracing::{Level, event};

/// Failures when bidding on or settling products.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// The product is not part of this catalog
    #[error("product {0} does not exist in this catalog")]
    NotFound(ProductId),
    /// The product already has a winning bid
    #[error("product {0} has already been sold")]
    AlreadySold(ProductId),
    /// Settlement needs at least one bid
    #[error("product {0} has no bids")]
    NoBids(ProductId),
    /// A starting cost or bid outside `0..=MAX_DOLLARS`
    #[error("${0} is not an amount between $0 and ${max}", max = MAX_DOLLARS)]
    AmountOutOfRange(i64),
    /// The underlying store refused the change
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The owner of every [`Product`] and the bids placed on them.
///
/// Queries only ever surface unsold products. Bids are exposed through
/// [`visible_bids`](Self::visible_bids), which hides bidders from everyone
/// but the seller.
#[derive(Debug, Default)]
pub struct ProductCatalog {
    store: EntityStore<Product>,
}

impl std::ops::Deref for ProductCatalog {
    type Target = EntityStore<Product>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product, stamping it with the time it entered the catalog.
    pub fn list(&mut self, mut product: Product) -> Result<ProductId, CatalogError> {
        check_amount(product.initial_cost)?;
        product.listed_on = OffsetDateTime::now_utc();
        let id = product.id;
        let seller = product.seller;
        self.store.add(product)?;

        event!(Level::INFO, product_id = %id, seller_id = %seller, "listed product");
        Ok(id)
    }

    /// Unsold products whose seller is excluded from or restricted to `sellers`,
    /// most recently listed first.
    pub fn query_by_seller(
        &self,
        sellers: impl IntoIterator<Item = ClientId>,
        mode: FilterMode,
    ) -> Vec<&Product> {
        let sellers = filter_set(sellers);
        self.unsold_where(|product| mode.admits(sellers.contains(&product.seller)))
    }

    /// Unsold products excluded from or restricted to `products`, most
    /// recently listed first.
    pub fn query_by_products(
        &self,
        products: impl IntoIterator<Item = ProductId>,
        mode: FilterMode,
    ) -> Vec<&Product> {
        let products = filter_set(products);
        self.unsold_where(|product| mode.admits(products.contains(&product.id)))
    }

    /// Unsold products offered by anyone but `viewer` whose type contains
    /// `fragment`, ignoring case.
    pub fn search(&self, fragment: &str, viewer: ClientId) -> Vec<&Product> {
        let fragment = fragment.to_lowercase();
        self.unsold_where(|product| {
            product.seller != viewer && product.kind.to_lowercase().contains(&fragment)
        })
    }

    fn unsold_where(&self, predicate: impl Fn(&Product) -> bool) -> Vec<&Product> {
        let mut products = self
            .store
            .all()
            .filter(|product| !product.is_sold() && predicate(product))
            .collect::<Vec<_>>();

        // stable, so products listed in the same instant keep listing order
        products.sort_by(|a, b| b.listed_on.cmp(&a.listed_on));
        products
    }

    /// Append a bid to an unsold product.
    pub fn record_bid(&mut self, product_id: ProductId, bid: Bid) -> Result<(), CatalogError> {
        check_amount(bid.amount)?;
        let product = self
            .store
            .get_mut(product_id)
            .ok_or(CatalogError::NotFound(product_id))?;

        if product.is_sold() {
            event!(Level::WARN, product_id = %product_id, "rejected bid on sold product");
            return Err(CatalogError::AlreadySold(product_id));
        }

        event!(
            Level::INFO,
            product_id = %product_id,
            bidder_id = %bid.bidder,
            amount = bid.amount,
            "recorded bid"
        );
        product.bids.push(bid);
        Ok(())
    }

    /// The bids on a product, highest first, as `viewer` may see them.
    ///
    /// Bidders are revealed only when `viewer` is the product's seller.
    pub fn visible_bids(
        &self,
        product_id: ProductId,
        viewer: Option<ClientId>,
    ) -> Result<Vec<VisibleBid>, CatalogError> {
        let product = self
            .store
            .get(product_id)
            .ok_or(CatalogError::NotFound(product_id))?;

        let reveal = viewer == Some(product.seller);
        let mut bids = product
            .bids
            .iter()
            .map(|bid| bid.view(reveal))
            .collect::<Vec<_>>();

        bids.sort_by(|a, b| b.amount.cmp(&a.amount));
        Ok(bids)
    }

    /// Sell a product to its highest bidder.
    ///
    /// Among equal bids the earliest submitted wins. A product can only be
    /// settled once; later attempts fail and leave the winner unchanged.
    pub fn settle(&mut self, product_id: ProductId) -> Result<Bid, CatalogError> {
        let product = self
            .store
            .get_mut(product_id)
            .ok_or(CatalogError::NotFound(product_id))?;

        if product.is_sold() {
            return Err(CatalogError::AlreadySold(product_id));
        }

        let winner = product
            .highest_bid()
            .cloned()
            .ok_or(CatalogError::NoBids(product_id))?;
        product.winning_bid = Some(winner.clone());

        event!(
            Level::INFO,
            product_id = %product_id,
            bidder_id = %winner.bidder,
            amount = winner.amount,
            "settled product"
        );
        Ok(winner)
    }
}

fn check_amount(dollars: i64) -> Result<(), CatalogError> {
    if (0..=MAX_DOLLARS).contains(&dollars) {
        Ok(())
    } else {
        Err(CatalogError::AmountOutOfRange(dollars))
    }
}

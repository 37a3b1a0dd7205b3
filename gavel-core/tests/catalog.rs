use gavel_core::{
    ClientId, ProductId,
    catalog::{CatalogError, ProductCatalog},
    models::{Bid, FeeSchedule, Product, Settlement},
    store::FilterMode,
};
use rstest::*;

struct Market {
    catalog: ProductCatalog,
    seller: ClientId,
    bidders: [ClientId; 2],
    // listed in this order: dress, shirt, pants
    products: Vec<ProductId>,
}

#[fixture]
fn market() -> Market {
    let mut catalog = ProductCatalog::new();
    let seller = ClientId::generate();
    let other_seller = ClientId::generate();
    let bidders = [ClientId::generate(), ClientId::generate()];

    let products = [
        Product::new("Best dress", "Dress", 50, seller),
        Product::new("Very loose", "Shirt", 20, seller),
        Product::new("Wide fit", "Pants", 30, other_seller),
    ]
    .into_iter()
    .map(|product| catalog.list(product).unwrap())
    .collect();

    Market {
        catalog,
        seller,
        bidders,
        products,
    }
}

#[rstest]
fn seller_filter_is_inclusive_or_exclusive(market: Market) {
    let mine = market
        .catalog
        .query_by_seller([market.seller], FilterMode::Include);
    let theirs = market
        .catalog
        .query_by_seller([market.seller], FilterMode::Exclude);

    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|p| p.seller == market.seller));
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].description, "Wide fit");
}

#[rstest]
fn queries_are_newest_first(market: Market) {
    let listed = market
        .catalog
        .query_by_products(Vec::<ProductId>::new(), FilterMode::Exclude)
        .into_iter()
        .map(|p| p.listed_on())
        .collect::<Vec<_>>();

    assert_eq!(listed.len(), 3);
    assert!(listed.windows(2).all(|w| w[0] >= w[1]));
}

#[rstest]
fn sold_products_are_never_listed(mut market: Market) {
    let dress = market.products[0];
    market
        .catalog
        .record_bid(dress, Bid::new(60, market.bidders[0], false))
        .unwrap();
    market.catalog.settle(dress).unwrap();

    for mode in [FilterMode::Include, FilterMode::Exclude] {
        let by_seller = market.catalog.query_by_seller([market.seller], mode);
        let by_product = market.catalog.query_by_products([dress], mode);
        assert!(by_seller.iter().chain(by_product.iter()).all(|p| !p.is_sold()));
        assert!(by_seller.iter().all(|p| p.id() != dress));
        assert!(by_product.iter().all(|p| p.id() != dress));
    }
    assert!(market.catalog.search("dress", market.bidders[0]).is_empty());

    // still held by the catalog, just not offered
    assert!(market.catalog.contains(dress));
}

#[rstest]
fn bids_are_redacted_for_everyone_but_the_seller(mut market: Market) {
    let shirt = market.products[1];
    for (amount, bidder) in [
        (25, market.bidders[0]),
        (40, market.bidders[1]),
        (30, market.bidders[0]),
    ] {
        market
            .catalog
            .record_bid(shirt, Bid::new(amount, bidder, false))
            .unwrap();
    }

    let public = market.catalog.visible_bids(shirt, None).unwrap();
    let bidder_view = market
        .catalog
        .visible_bids(shirt, Some(market.bidders[1]))
        .unwrap();
    let seller_view = market
        .catalog
        .visible_bids(shirt, Some(market.seller))
        .unwrap();

    assert!(public.iter().all(|bid| bid.is_redacted()));
    assert!(bidder_view.iter().all(|bid| bid.is_redacted()));
    assert!(seller_view.iter().all(|bid| !bid.is_redacted()));

    let amounts = seller_view.iter().map(|bid| bid.amount).collect::<Vec<_>>();
    assert_eq!(amounts, vec![40, 30, 25]);
    assert_eq!(seller_view[0].bidder, Some(market.bidders[1]));
}

#[rstest]
fn settlement_picks_the_earliest_of_equal_bids(mut market: Market) {
    let pants = market.products[2];
    let [first, second] = market.bidders;
    market
        .catalog
        .record_bid(pants, Bid::new(45, second, false))
        .unwrap();
    market
        .catalog
        .record_bid(pants, Bid::new(70, first, true))
        .unwrap();
    market
        .catalog
        .record_bid(pants, Bid::new(70, second, false))
        .unwrap();

    let winner = market.catalog.settle(pants).unwrap();
    assert_eq!(winner.bidder, first);
    assert_eq!(winner.amount, 70);
    assert_eq!(market.catalog.get(pants).unwrap().winning_bid(), Some(&winner));
}

#[rstest]
fn settled_products_cannot_be_resettled_or_bid_on(mut market: Market) {
    let dress = market.products[0];
    market
        .catalog
        .record_bid(dress, Bid::new(80, market.bidders[0], false))
        .unwrap();
    let winner = market.catalog.settle(dress).unwrap();

    assert_eq!(
        market
            .catalog
            .record_bid(dress, Bid::new(500, market.bidders[1], false)),
        Err(CatalogError::AlreadySold(dress))
    );
    assert_eq!(market.catalog.settle(dress), Err(CatalogError::AlreadySold(dress)));

    let product = market.catalog.get(dress).unwrap();
    assert_eq!(product.winning_bid(), Some(&winner));
    assert_eq!(product.bid_count(), 1);
}

#[rstest]
fn settling_without_bids_fails(mut market: Market) {
    let shirt = market.products[1];
    assert_eq!(market.catalog.settle(shirt), Err(CatalogError::NoBids(shirt)));
    assert!(!market.catalog.get(shirt).unwrap().is_sold());
}

#[rstest]
fn settlement_of_a_sold_product(mut market: Market) {
    let dress = market.products[0];
    market
        .catalog
        .record_bid(dress, Bid::new(100, market.bidders[0], true))
        .unwrap();
    market.catalog.settle(dress).unwrap();

    let product = market.catalog.get(dress).unwrap();
    let settlement = Settlement::for_product(product, &FeeSchedule::default()).unwrap();
    assert_eq!(settlement.total_paid.as_dollars(), 105.0);
    assert_eq!(settlement.home_delivery_tax.as_dollars(), 5.0);
    assert_eq!(settlement.government_tax.as_dollars(), 15.0);
    assert_eq!(settlement.total_tax.as_dollars(), 20.0);
    assert_eq!(settlement.auction_house_deduction.as_dollars(), 20.0);
    assert_eq!(settlement.net_profit.as_dollars(), 15.0);
}

#[rstest]
#[case(FilterMode::Exclude)]
#[case(FilterMode::Include)]
fn empty_catalog_queries_are_empty(#[case] mode: FilterMode) {
    let catalog = ProductCatalog::new();
    assert!(catalog.query_by_seller([ClientId::generate()], mode).is_empty());
    assert!(catalog.query_by_products([ProductId::generate()], mode).is_empty());
    assert!(catalog.query_by_seller(Vec::<ClientId>::new(), mode).is_empty());
    assert!(catalog.search("", ClientId::generate()).is_empty());
}

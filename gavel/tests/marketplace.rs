mod common;

use common::*;
use gavel::{ActionError, demo};
use gavel_core::store::FilterMode;
use rand::{SeedableRng, rngs::StdRng};
use rstest::*;

fn one(answer: &str) -> Vec<String> {
    vec![answer.to_owned()]
}

/// Jane lists a dress and Bob is registered, both logged out again
fn listed_dress() -> Vec<Vec<String>> {
    vec![
        register("Jane", "Freeman", "1 Demo Street"),
        register("Bob", "Adams", "2 Demo Street"),
        login("Jane"),
        list_item("Dress", "Best dress ever", 50),
        one(LOGOUT),
    ]
}

#[test]
fn full_sale_to_highest_bidder() {
    let mut script = listed_dress();
    script.extend([
        login("Bob"),
        bid("dress", 100, true, true),
        one(LOGOUT),
        login("Jane"),
        one(LIST_MINE),
        vec![LIST_BIDS.to_owned(), "1".to_owned()],
        vec![SELL.to_owned(), "1".to_owned()],
        one(LOGOUT),
        one(EXIT),
    ]);

    let mut app = scripted(&script.concat());
    app.run().unwrap();

    let product = app.catalog().all().next().unwrap();
    assert!(product.is_sold());
    assert_eq!(product.winning_bid().map(|bid| bid.amount), Some(100));

    let out = transcript(app);
    for expected in [
        "Jane Freeman (jane@email.com) registered successfully",
        "Welcome Jane Freeman (jane@email.com)",
        "Dress, Best dress ever was listed successfully!",
        "Items owned by Jane Freeman:",
        "Found 1 results for 'dress':",
        "Bidding on item 1 - Best dress ever (Dress)",
        "Your bid of $100.00 was placed successfully!",
        "Bids received on item 1:",
        "bob@email.com",
        "Total Paid: $105.00",
        "  Home Delivery Tax: $5.00",
        "  Government (15%): $15.00",
        " Total: $20.00",
        "  Click & Collect: $0.00",
        "Net Profit: $15.00",
        "Bob Adams (bob@email.com) has paid a total of $105.00 including total tax of $20.00.",
        "Best dress ever (Dress) has been sold to Bob Adams (bob@email.com) for $100.00 and has requested Home Delivery for an additional $5.00.",
        "You must ship the item to: 2 Demo Street",
        "!! Logging out Jane Freeman (jane@email.com) !!",
    ] {
        assert!(out.contains(expected), "missing {expected:?}");
    }

    // greeted at startup and after each of the three logouts
    assert_eq!(out.matches("Welcome to Gavel!").count(), 4);
    assert!(out.contains("Goodbye :)"));
}

#[test]
fn click_and_collect_sale() {
    let mut script = listed_dress();
    script.extend([
        login("Bob"),
        bid("dress", 37, false, true),
        one(LOGOUT),
        login("Jane"),
        vec![SELL.to_owned(), "1".to_owned()],
        one(LOGOUT),
        one(EXIT),
    ]);

    let mut app = scripted(&script.concat());
    app.run().unwrap();

    let out = transcript(app);
    assert!(out.contains("Total Paid: $37.00"));
    assert!(out.contains("  Government (15%): $5.55"));
    assert!(out.contains("  Click & Collect: $10.00"));
    assert!(out.contains("Net Profit: -$28.55"));
    assert!(out.contains("has requested Click & Collect from the auction house."));
    assert!(!out.contains("You must ship the item to"));
}

#[test]
fn cancelled_and_declined_bids_change_nothing() {
    let mut script = listed_dress();
    script.extend([
        login("Bob"),
        vec![
            "4".to_owned(),
            "dress".to_owned(),
            "1".to_owned(),
            "120".to_owned(),
            ":q".to_owned(),
        ],
        bid("dress", 130, false, false),
        one(LOGOUT),
        one(EXIT),
    ]);

    let mut app = scripted(&script.concat());
    app.run().unwrap();

    let product = app.catalog().all().next().unwrap();
    assert!(!product.has_bids());

    let out = transcript(app);
    assert!(out.contains("!! Operation Cancelled !!"));
    assert!(out.contains("Bid discarded! No action has been made."));
}

#[test]
fn sellers_cannot_find_their_own_items() {
    let mut script = listed_dress();
    script.extend([
        login("Jane"),
        vec!["3".to_owned(), "dress".to_owned()],
        vec!["4".to_owned(), "Dress".to_owned()],
        one(LOGOUT),
        login("Bob"),
        vec!["3".to_owned(), "RES".to_owned()],
        one(LOGOUT),
        one(EXIT),
    ]);

    let mut app = scripted(&script.concat());
    app.run().unwrap();

    let out = transcript(app);
    assert!(out.contains("No products were found containing the query dress."));
    assert!(out.contains("No products were found containing the word Dress."));
    assert!(out.contains("Found 1 results for 'RES':"));
}

#[test]
fn selling_without_bids() {
    let mut script = listed_dress();
    script.extend([
        login("Jane"),
        vec![SELL.to_owned(), "1".to_owned()],
        vec![SELL.to_owned(), "2".to_owned()],
        vec![LIST_BIDS.to_owned(), "1".to_owned()],
        one(LOGOUT),
        one(EXIT),
    ]);

    let mut app = scripted(&script.concat());
    app.run().unwrap();
    assert!(app.catalog().all().all(|product| !product.is_sold()));

    let out = transcript(app);
    assert!(out.contains("This item has no bids."));
    assert!(out.contains("Invalid selection made, try again."));
    assert!(out.contains("There are no bids yet on item 1."));
}

#[test]
fn empty_marketplace() {
    let script = [
        register("Jane", "Freeman", "1 Demo Street"),
        login("Jane"),
        one(LIST_MINE),
        one(LIST_BIDS),
        one(SELL),
        vec!["1".to_owned(), String::new(), "Mystery box".to_owned(), "5".to_owned()],
        one(LOGOUT),
        one(EXIT),
    ];

    let mut app = scripted(&script.concat());
    app.run().unwrap();

    let product = app.catalog().all().next().unwrap();
    assert_eq!(product.kind, "Uncategorised");

    let out = transcript(app);
    assert!(out.contains("Jane Freeman has no items for sale."));
    assert_eq!(out.matches("You have no items for sale.").count(), 2);
    assert!(out.contains("Uncategorised, Mystery box was listed successfully!"));
}

#[test]
fn oversize_amounts_are_asked_again() {
    let mut script = listed_dress();
    script.extend([
        login("Bob"),
        vec![
            "1".to_owned(),
            "Shirt".to_owned(),
            "Wide fit".to_owned(),
            "100000000000000000".to_owned(),
            "75".to_owned(),
        ],
        vec![
            "4".to_owned(),
            "dress".to_owned(),
            "1".to_owned(),
            "2147483648".to_owned(),
            "2147483647".to_owned(),
            "y".to_owned(),
            "y".to_owned(),
        ],
        one(LOGOUT),
        one(EXIT),
    ]);

    let mut app = scripted(&script.concat());
    app.run().unwrap();

    let shirt = app.catalog().all().find(|product| product.kind == "Shirt").unwrap();
    assert_eq!(shirt.initial_cost, 75);
    let dress = app.catalog().all().find(|product| product.kind == "Dress").unwrap();
    assert_eq!(dress.winning_bid().map(|bid| bid.amount), Some(2_147_483_647));

    let out = transcript(app);
    assert_eq!(out.matches("must be at most 2147483647").count(), 2);
    assert!(out.contains("Your bid of $2,147,483,647.00 was placed successfully!"));
}

#[test]
fn duplicate_registration() {
    let script = [
        register("Jane", "Freeman", "1 Demo Street"),
        vec![
            "1".to_owned(),
            "Janet".to_owned(),
            "Smith".to_owned(),
            "JANE@EMAIL.COM".to_owned(),
            "secret".to_owned(),
            "9 Other Street".to_owned(),
        ],
        one(EXIT),
    ];

    let mut app = scripted(&script.concat());
    app.run().unwrap();
    assert_eq!(app.registry().len(), 1);

    let out = transcript(app);
    assert!(out.contains(
        "Failed to register Janet as a user, a user with that email already exists."
    ));
}

#[rstest]
#[case::wrong_password("jane@email.com", "Pass1234")]
#[case::unknown_email("john@email.com", PASSWORD)]
fn failed_login(#[case] email: &str, #[case] password: &str) {
    let script = [
        register("Jane", "Freeman", "1 Demo Street"),
        vec!["2".to_owned(), email.to_owned(), password.to_owned()],
        one(EXIT),
    ];

    let mut app = scripted(&script.concat());
    app.run().unwrap();
    assert!(!app.session().is_authenticated());
    assert!(transcript(app).contains("The email or password is incorrect."));
}

#[test]
fn end_of_input_mid_action() {
    let script = [
        register("Jane", "Freeman", "1 Demo Street"),
        login("Jane"),
        vec!["1".to_owned(), "Dress".to_owned()],
    ];

    let mut app = scripted(&script.concat());
    let error = app.run().unwrap_err();
    assert!(matches!(error, ActionError::InputClosed));
    assert!(app.catalog().is_empty());

    let out = transcript(app);
    assert!(out.contains("You'll need to restart the program to continue using it!"));
    assert!(out.trim_end().ends_with("===================================="));
}

#[test]
fn demo_clients_can_trade() {
    let script = [login("Bob"), one(LIST_MINE), one(LOGOUT), one(EXIT)];
    let mut app = scripted(&script.concat());

    let config = gavel::DemoConfig::default();
    let (registry, catalog) = app.stores_mut();
    demo::seed(registry, catalog, &config, &mut StdRng::seed_from_u64(42)).unwrap();

    let bob = app
        .registry()
        .find_by_email("bob@email.com")
        .next()
        .map(|client| client.id())
        .unwrap();
    let owned = app
        .catalog()
        .query_by_seller([bob], FilterMode::Include)
        .len();

    app.run().unwrap();
    let out = transcript(app);
    assert!(out.contains("Welcome Bob "));
    if owned == 0 {
        assert!(out.contains("has no items for sale."));
    } else {
        assert!(out.contains("Items owned by Bob "));
    }
}

#![allow(dead_code)]

use gavel::{App, console::Terminal};
use gavel_core::models::FeeSchedule;
use std::io::Cursor;

pub const PASSWORD: &str = "Pass123$";

pub type Scripted = Terminal<Cursor<Vec<u8>>, Vec<u8>>;

/// An app whose console reads the given answers, one per line
pub fn scripted<S: AsRef<str>>(answers: &[S]) -> App<Scripted> {
    let mut input = String::new();
    for answer in answers {
        input.push_str(answer.as_ref());
        input.push('\n');
    }
    App::new(
        Terminal::new(Cursor::new(input.into_bytes()), Vec::new()),
        FeeSchedule::default(),
    )
}

/// Everything the app wrote to its console
pub fn transcript(app: App<Scripted>) -> String {
    String::from_utf8(app.into_console().into_writer()).unwrap()
}

/// Authentication menu answers registering `<first>@email.com`
pub fn register(first: &str, last: &str, address: &str) -> Vec<String> {
    vec![
        "1".to_owned(),
        first.to_owned(),
        last.to_owned(),
        format!("{}@email.com", first.to_lowercase()),
        PASSWORD.to_owned(),
        address.to_owned(),
    ]
}

/// Authentication menu answers logging in as `<first>@email.com`
pub fn login(first: &str) -> Vec<String> {
    vec![
        "2".to_owned(),
        format!("{}@email.com", first.to_lowercase()),
        PASSWORD.to_owned(),
    ]
}

/// Marketplace menu answers listing an item
pub fn list_item(kind: &str, description: &str, cost: i64) -> Vec<String> {
    vec![
        "1".to_owned(),
        kind.to_owned(),
        description.to_owned(),
        cost.to_string(),
    ]
}

/// Marketplace menu answers bidding on the first search result for `kind`
pub fn bid(kind: &str, amount: i64, home_delivery: bool, confirm: bool) -> Vec<String> {
    let yes_no = |answer: bool| if answer { "y" } else { "n" }.to_owned();
    vec![
        "4".to_owned(),
        kind.to_owned(),
        "1".to_owned(),
        amount.to_string(),
        yes_no(home_delivery),
        yes_no(confirm),
    ]
}

pub const LIST_MINE: &str = "2";
pub const LIST_BIDS: &str = "5";
pub const SELL: &str = "6";
pub const LOGOUT: &str = "7";
pub const EXIT: &str = "3";

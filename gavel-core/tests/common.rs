#![allow(dead_code)]

use gavel_core::{ClientId, models::ClientDraft, registry::ClientRegistry};

pub const PASSWORD: &str = "Pass123$";

pub fn draft(first: &str, last: &str) -> ClientDraft {
    ClientDraft {
        first_name: first.to_owned(),
        last_name: last.to_owned(),
        email: format!("{}@email.com", first.to_lowercase()),
        password: PASSWORD.to_owned(),
        address: "0 Demo Street, Brisbane QLD 4000, Australia".to_owned(),
    }
}

/// A registry of four clients, returned alongside their ids in registration order
pub fn populated_registry() -> (ClientRegistry, Vec<ClientId>) {
    let mut registry = ClientRegistry::new();
    let ids = [
        ("Bob", "Adams"),
        ("Zoe", "Eagles"),
        ("Mark", "Freeman"),
        ("Fiona", "Silverman"),
    ]
    .into_iter()
    .map(|(first, last)| registry.register(draft(first, last)).unwrap())
    .collect();

    (registry, ids)
}

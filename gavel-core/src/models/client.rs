use crate::{ClientId, security::PasswordDigest, store::Entity};
use time::OffsetDateTime;

/// A registered participant of the marketplace.
///
/// Clients are created by [`ClientRegistry::register`](crate::registry::ClientRegistry::register)
/// from a [`ClientDraft`] and are never removed. Products and bids refer to
/// clients by [`ClientId`] only.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Client {
    pub(crate) id: ClientId,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Login email, unique across the registry ignoring case
    pub email: String,
    /// Reversibly encoded password
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) password: PasswordDigest,
    /// Postal address used for home deliveries
    pub address: String,
    /// Disabled clients cannot authenticate
    pub enabled: bool,
    /// When the client record was constructed
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    pub created_on: OffsetDateTime,
}

impl Client {
    /// The registry-assigned identifier
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The stored password digest
    pub fn password(&self) -> &PasswordDigest {
        &self.password
    }

    /// Case-insensitive email comparison
    pub fn has_email(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }
}

impl Entity for Client {
    type Id = ClientId;
    const KIND: &'static str = "client";

    fn id(&self) -> ClientId {
        self.id
    }
}

impl std::fmt::Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.full_name(), self.email)
    }
}

/// The details a prospective client submits when registering.
///
/// The password is held in plain text only until registration, which encodes
/// it into the stored [`Client`].
#[derive(Clone, Debug, Default)]
pub struct ClientDraft {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Postal address
    pub address: String,
}

impl ClientDraft {
    pub(crate) fn into_client(self) -> Client {
        Client {
            id: ClientId::generate(),
            password: PasswordDigest::encode(&self.password),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            address: self.address,
            enabled: true,
            created_on: OffsetDateTime::now_utc(),
        }
    }
}

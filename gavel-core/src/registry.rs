use crate::{
    ClientId,
    models::{Client, ClientDraft},
    store::{EntityStore, FilterMode, StoreError, filter_set},
};
use tracing::{Level, event};

/// Failures when registering or updating clients.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Another client already uses this email (ignoring case)
    #[error("a client with the email {0} already exists")]
    DuplicateEmail(String),
    /// The client is not registered
    #[error("client {0} does not exist")]
    NotFound(ClientId),
    /// The underlying store refused the change
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The owner of every [`Client`].
///
/// Read access to the underlying store is available through `Deref`; all
/// mutation goes through the registry so that email uniqueness holds.
#[derive(Debug, Default)]
pub struct ClientRegistry {
    store: EntityStore<Client>,
}

impl std::ops::Deref for ClientRegistry {
    type Target = EntityStore<Client>;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}

impl ClientRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client, encoding its password.
    ///
    /// Nothing is stored if the email is already taken.
    pub fn register(&mut self, draft: ClientDraft) -> Result<ClientId, RegistryError> {
        if self.store.all().any(|client| client.has_email(&draft.email)) {
            event!(Level::WARN, email = %draft.email, "rejected duplicate registration");
            return Err(RegistryError::DuplicateEmail(draft.email));
        }

        let client = draft.into_client();
        let id = client.id;
        self.store.add(client)?;

        event!(Level::INFO, client_id = %id, "registered client");
        Ok(id)
    }

    /// Every client excluded from or restricted to `filter`, sorted by
    /// descending full name.
    pub fn query(
        &self,
        filter: impl IntoIterator<Item = ClientId>,
        mode: FilterMode,
    ) -> Vec<&Client> {
        let filter = filter_set(filter);

        let mut clients = self
            .store
            .all()
            .filter(|client| mode.admits(filter.contains(&client.id)))
            .collect::<Vec<_>>();

        clients.sort_by_cached_key(|client| std::cmp::Reverse(client.full_name()));
        clients
    }

    /// Enabled clients whose email matches ignoring case
    pub fn find_by_email<'a>(&'a self, email: &'a str) -> impl Iterator<Item = &'a Client> + 'a {
        self.store
            .all()
            .filter(move |client| client.enabled && client.has_email(email))
    }

    /// Enable or disable a client's ability to authenticate
    pub fn set_enabled(&mut self, id: ClientId, enabled: bool) -> Result<(), RegistryError> {
        let client = self.store.get_mut(id).ok_or(RegistryError::NotFound(id))?;
        client.enabled = enabled;
        event!(Level::INFO, client_id = %id, enabled, "changed client status");
        Ok(())
    }

    /// Store a client as-is, skipping the duplicate email check
    #[cfg(test)]
    pub(crate) fn insert_unchecked(&mut self, client: Client) -> Result<ClientId, RegistryError> {
        let id = client.id;
        self.store.add(client)?;
        Ok(id)
    }
}

use crate::{ClientId, models::Client, registry::ClientRegistry};
use tracing::{Level, event};

/// Who, if anyone, is signed in.
///
/// There is at most one authenticated client at a time. The session is owned
/// by the caller and passed to whatever needs the current actor, so there is
/// no ambient global state.
#[derive(Debug, Default, Clone)]
pub struct IdentitySession {
    current: Option<ClientId>,
}

impl IdentitySession {
    /// A signed-out session
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempt to sign in.
    ///
    /// Exactly one enabled client must match `email` (ignoring case) and its
    /// stored password must decode to `password`. Every failure, including
    /// a corrupt digest or a duplicated email, yields `false`.
    pub fn authenticate(&mut self, registry: &ClientRegistry, email: &str, password: &str) -> bool {
        let mut matches = registry.find_by_email(email);

        let Some(client) = matches.next() else {
            event!(Level::DEBUG, email, "no enabled client with this email");
            return false;
        };
        if matches.next().is_some() {
            event!(
                Level::ERROR,
                email,
                "registry holds more than one client with this email"
            );
            return false;
        }

        match client.password().verify(password) {
            Ok(true) => {
                self.current = Some(client.id());
                event!(Level::INFO, client_id = %client.id(), "authenticated");
                true
            }
            Ok(false) => {
                event!(Level::DEBUG, client_id = %client.id(), "password mismatch");
                false
            }
            Err(error) => {
                event!(
                    Level::ERROR,
                    client_id = %client.id(),
                    %error,
                    "unreadable password digest"
                );
                false
            }
        }
    }

    /// Sign out, returning whoever was signed in
    pub fn logout(&mut self) -> Option<ClientId> {
        let previous = self.current.take();
        if let Some(id) = previous {
            event!(Level::INFO, client_id = %id, "logged out");
        }
        previous
    }

    /// Whether someone is signed in
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The signed-in client's id
    pub fn current(&self) -> Option<ClientId> {
        self.current
    }

    /// The signed-in client's record
    pub fn current_client<'a>(&self, registry: &'a ClientRegistry) -> Option<&'a Client> {
        self.current.and_then(|id| registry.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::ClientDraft, security::PasswordDigest};
    use rstest::*;

    fn draft(first_name: &str, email: &str) -> ClientDraft {
        ClientDraft {
            first_name: first_name.to_owned(),
            last_name: "Freeman".to_owned(),
            email: email.to_owned(),
            password: "Pass123$".to_owned(),
            address: "1 Demo Street".to_owned(),
        }
    }

    /// A registry holding Mark plus Jane, whose stored password is `digest`
    fn with_digest(digest: PasswordDigest) -> (ClientRegistry, ClientId) {
        let mut registry = ClientRegistry::new();
        let mark = registry.register(draft("Mark", "mark@email.com")).unwrap();

        let mut client = draft("Jane", "jane@email.com").into_client();
        client.password = digest;
        registry.insert_unchecked(client).unwrap();
        (registry, mark)
    }

    #[rstest]
    #[case::not_base64("%%% not base64")]
    #[case::not_utf8("//4=")]
    fn test_corrupt_digest_fails(#[case] encoded: &str) {
        let (registry, mark) = with_digest(PasswordDigest::from_encoded(encoded));

        let mut session = IdentitySession::new();
        assert!(!session.authenticate(&registry, "jane@email.com", "Pass123$"));
        assert_eq!(session.current(), None);

        assert!(session.authenticate(&registry, "mark@email.com", "Pass123$"));
        assert!(!session.authenticate(&registry, "jane@email.com", ""));
        assert_eq!(session.current(), Some(mark));
    }

    #[test]
    fn test_duplicated_email_fails() {
        let (mut registry, mark) = with_digest(PasswordDigest::encode("Pass123$"));
        registry
            .insert_unchecked(draft("Janet", "JANE@email.com").into_client())
            .unwrap();

        let mut session = IdentitySession::new();
        assert!(!session.authenticate(&registry, "jane@email.com", "Pass123$"));
        assert_eq!(session.current(), None);

        assert!(session.authenticate(&registry, "mark@email.com", "Pass123$"));
        assert!(!session.authenticate(&registry, "Jane@Email.com", "Pass123$"));
        assert_eq!(session.current(), Some(mark));
    }

    #[test]
    fn test_duplicate_disabled_is_ignored() {
        let (mut registry, _) = with_digest(PasswordDigest::encode("Pass123$"));
        let janet = registry
            .insert_unchecked(draft("Janet", "jane@email.com").into_client())
            .unwrap();
        registry.set_enabled(janet, false).unwrap();

        let mut session = IdentitySession::new();
        assert!(session.authenticate(&registry, "jane@email.com", "Pass123$"));
        assert_ne!(session.current(), Some(janet));
    }
}

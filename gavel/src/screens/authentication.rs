use crate::{
    app::{ActionError, App},
    console::{Console, Tone},
    menu::{Menu, MenuItem},
};
use gavel_core::{ClientId, models::ClientDraft, registry::RegistryError};
use tracing::{Level, event};

/// What a logged out user can do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    /// Create a new client
    Register,
    /// Log in as an existing client
    Login,
    /// Leave the program
    Exit,
}

impl AuthAction {
    /// The authentication menu, with Exit pinned last.
    pub fn menu() -> Menu<Self> {
        Menu::new(
            [
                MenuItem::new(999, "Exit", Self::Exit),
                MenuItem::new(1, "Register as a new Client", Self::Register),
                MenuItem::new(2, "Login as existing Client", Self::Login),
            ],
            true,
        )
    }
}

impl<C: Console> App<C> {
    pub(crate) fn authentication_turn(&mut self) -> Result<(), ActionError> {
        self.select(&AuthAction::menu(), |app, action| match action {
            AuthAction::Register => app.register_client(),
            AuthAction::Login => app.login(),
            AuthAction::Exit => {
                app.running = false;
                Ok(())
            }
        })
    }

    fn register_client(&mut self) -> Result<(), ActionError> {
        let draft = ClientDraft {
            first_name: self.console.text("First name", false)?,
            last_name: self.console.text("Last name", false)?,
            email: self.console.text("Email", false)?,
            password: self.console.password("Password")?,
            address: self.console.text("Address", false)?,
        };
        let first_name = draft.first_name.clone();

        match self.registry.register(draft) {
            Ok(id) => {
                let client = self.describe_client(id)?;
                self.notify(Tone::Success, &format!("{client} registered successfully"))
            }
            Err(RegistryError::DuplicateEmail(_)) => self.notify(
                Tone::Error,
                &format!("Failed to register {first_name} as a user, a user with that email already exists."),
            ),
            Err(error) => self.notify(
                Tone::Error,
                &format!("Failed to register {first_name} as a user, {error}."),
            ),
        }
    }

    fn login(&mut self) -> Result<(), ActionError> {
        let email = self.console.text("Email", false)?;
        let password = self.console.password("Password")?;

        if self.session.authenticate(&self.registry, &email, &password) {
            let client = self.current_client()?.to_string();
            self.console.blank()?;
            self.notify(Tone::Success, &format!("Welcome {client}"))
        } else {
            event!(Level::DEBUG, "login rejected");
            self.notify(Tone::Error, "The email or password is incorrect.")
        }
    }

    pub(crate) fn describe_client(&self, id: ClientId) -> Result<String, ActionError> {
        self.registry
            .get(id)
            .map(ToString::to_string)
            .ok_or(RegistryError::NotFound(id).into())
    }
}

use crate::{
    console::{Console, InputError, Tone},
    menu::{Menu, MenuError},
};
use gavel_core::{
    ClientId,
    catalog::{CatalogError, ProductCatalog},
    models::{Client, FeeSchedule},
    registry::{ClientRegistry, RegistryError},
    session::IdentitySession,
};
use std::io;
use tracing::{Level, event};

/// Why a menu action did not complete.
#[derive(thiserror::Error, Debug)]
pub enum ActionError {
    /// The user cancelled a prompt
    #[error("operation cancelled")]
    Cancelled,
    /// The console has no more input
    #[error("console input ended unexpectedly")]
    InputClosed,
    /// Reading from or writing to the console failed
    #[error("console failure: {0}")]
    Console(#[source] io::Error),
    /// A menu selection did not resolve to an item
    #[error(transparent)]
    Menu(#[from] MenuError),
    /// The client registry refused the operation
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The product catalog refused the operation
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A marketplace action ran without a logged in client
    #[error("no client is logged in")]
    NotAuthenticated,
}

impl ActionError {
    /// Whether the interactive loop can carry on after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InputClosed | Self::Console(_))
    }
}

impl From<InputError> for ActionError {
    fn from(value: InputError) -> Self {
        match value {
            InputError::Cancelled => Self::Cancelled,
            InputError::Closed => Self::InputClosed,
            InputError::Io(error) => Self::Console(error),
        }
    }
}

/// The interactive auction house.
///
/// Owns both stores, the session and the console. Each turn of
/// [`run`](Self::run) shows the authentication menu or the marketplace menu
/// depending on whether a client is logged in, and performs one action.
pub struct App<C> {
    pub(crate) registry: ClientRegistry,
    pub(crate) catalog: ProductCatalog,
    pub(crate) session: IdentitySession,
    pub(crate) fees: FeeSchedule,
    pub(crate) console: C,
    pub(crate) running: bool,
}

impl<C: Console> App<C> {
    /// An app with empty stores and nobody logged in
    pub fn new(console: C, fees: FeeSchedule) -> Self {
        Self {
            registry: ClientRegistry::new(),
            catalog: ProductCatalog::new(),
            session: IdentitySession::new(),
            fees,
            console,
            running: false,
        }
    }

    /// The registered clients
    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    /// The listed products
    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    /// Mutable access to both stores, e.g. for seeding
    pub fn stores_mut(&mut self) -> (&mut ClientRegistry, &mut ProductCatalog) {
        (&mut self.registry, &mut self.catalog)
    }

    /// Who is logged in
    pub fn session(&self) -> &IdentitySession {
        &self.session
    }

    /// Whether the loop is (still) running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Give back the console, e.g. to inspect a transcript
    pub fn into_console(self) -> C {
        self.console
    }

    /// Run the interactive loop until the user exits.
    ///
    /// Cancelled and rejected actions are reported and the loop carries on.
    /// A fatal console error ends the loop and is returned. The farewell
    /// banner is printed either way.
    pub fn run(&mut self) -> Result<(), ActionError> {
        self.running = true;
        event!(Level::DEBUG, "starting interactive loop");

        let outcome = self.drive();
        self.running = false;

        let farewell = self.farewell();
        outcome?;
        farewell
    }

    fn drive(&mut self) -> Result<(), ActionError> {
        // None until the first turn, then whether the last turn was logged in
        let mut previously_authenticated = None;

        while self.running {
            let authenticated = self.session.is_authenticated();
            if !authenticated && previously_authenticated != Some(false) {
                self.greeting()?;
            }
            previously_authenticated = Some(authenticated);

            let turn = if authenticated {
                self.marketplace_turn()
            } else {
                self.authentication_turn()
            };

            match turn {
                Ok(()) => {}
                Err(ActionError::Cancelled) => {
                    self.console.blank()?;
                    self.notify(Tone::Warning, "!! Operation Cancelled !!")?;
                }
                Err(error) if error.is_fatal() => {
                    event!(Level::ERROR, error = %error, "interactive loop failed");
                    // the console itself may be what failed
                    let _ = self.report_fatal(&error);
                    return Err(error);
                }
                Err(error) => {
                    event!(Level::WARN, error = %error, "action failed");
                    self.notify(
                        Tone::Error,
                        &format!("An unexpected internal error has occurred: {error}."),
                    )?;
                }
            }
        }
        Ok(())
    }

    fn report_fatal(&mut self, error: &ActionError) -> Result<(), InputError> {
        self.console.say(
            Tone::Critical,
            "An unexpected error has occurred and caused the program to fail executing.",
        )?;
        self.console.say(Tone::Critical, &format!("Error: {error}"))?;
        self.console.blank()?;
        self.console.say(
            Tone::Critical,
            "You'll need to restart the program to continue using it!",
        )
    }

    /// Print the menu, read a choice and perform the chosen action.
    ///
    /// An out of range choice is reported by the console and ends the turn.
    pub(crate) fn select<A: Copy>(
        &mut self,
        menu: &Menu<A>,
        perform: impl FnOnce(&mut Self, A) -> Result<(), ActionError>,
    ) -> Result<(), ActionError> {
        self.console.blank()?;
        self.console
            .say(Tone::Plain, "Please select one of the following: ")?;
        for item in menu.items() {
            self.console
                .say(Tone::Plain, &format!("  {}) {}", item.position, item.name))?;
        }

        let Some(choice) = self.console.choice(menu.item_count(), "Choice")? else {
            return Ok(());
        };
        let ordinal = u32::try_from(choice).unwrap_or(u32::MAX);
        menu.execute_action_for(ordinal, |action| perform(self, action))?
    }

    /// Say `message` followed by an empty line
    pub(crate) fn notify(&mut self, tone: Tone, message: &str) -> Result<(), ActionError> {
        self.console.say(tone, message)?;
        self.console.blank()?;
        Ok(())
    }

    /// The logged in client
    pub(crate) fn current_client(&self) -> Result<&Client, ActionError> {
        self.session
            .current_client(&self.registry)
            .ok_or(ActionError::NotAuthenticated)
    }

    /// The logged in client's id
    pub(crate) fn current_client_id(&self) -> Result<ClientId, ActionError> {
        self.current_client().map(Client::id)
    }
}

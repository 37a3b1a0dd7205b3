//! Numbered menus mapping a user's choice to a command.
//!
//! A menu binds each ordinal to exactly one action value, usually a small
//! `Copy` enum per screen. Screens are free to pin items with sentinel
//! ordinals (an exit item at 999, say) and ask for the menu to be
//! restructured into a dense `1..=N` list.

use std::collections::BTreeMap;

/// Selecting an ordinal that no item is bound to.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MenuError {
    /// No menu item sits at this position
    #[error("menu item {0} does not exist in this menu")]
    NotFound(u32),
}

/// One selectable entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem<A> {
    /// The ordinal the user types
    pub position: u32,
    /// Display label
    pub name: String,
    /// What selecting the item does
    pub action: A,
}

impl<A> MenuItem<A> {
    /// Bind `action` to `position`
    pub fn new(position: u32, name: impl Into<String>, action: A) -> Self {
        Self {
            position,
            name: name.into(),
            action,
        }
    }
}

/// An ordered set of menu items keyed by ordinal.
#[derive(Clone, Debug)]
pub struct Menu<A> {
    items: BTreeMap<u32, MenuItem<A>>,
}

impl<A: Copy> Menu<A> {
    /// Build a menu, optionally renumbering it to `1..=N`.
    ///
    /// When two items share an ordinal the first one given is kept.
    pub fn new(items: impl IntoIterator<Item = MenuItem<A>>, restructure: bool) -> Self {
        let mut menu = Self {
            items: BTreeMap::new(),
        };
        for item in items {
            menu.items.entry(item.position).or_insert(item);
        }
        if restructure {
            menu.restructure();
        }
        menu
    }

    /// A menu with a single item, kept at its own ordinal
    pub fn single(item: MenuItem<A>) -> Self {
        Self::new([item], false)
    }

    /// Number of selectable items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Items in ascending ordinal order
    pub fn items(&self) -> impl Iterator<Item = &MenuItem<A>> + '_ {
        self.items.values()
    }

    /// The action bound to `ordinal`
    pub fn action_for(&self, ordinal: u32) -> Result<A, MenuError> {
        self.items
            .get(&ordinal)
            .map(|item| item.action)
            .ok_or(MenuError::NotFound(ordinal))
    }

    /// Run `handler` on the action bound to `ordinal`
    pub fn execute_action_for<R>(
        &self,
        ordinal: u32,
        handler: impl FnOnce(A) -> R,
    ) -> Result<R, MenuError> {
        self.action_for(ordinal).map(handler)
    }

    /// Renumber items to `1..=N`, keeping their ascending order
    pub fn restructure(&mut self) {
        let items = std::mem::take(&mut self.items);
        self.items = items
            .into_values()
            .zip(1..)
            .map(|(item, position)| (position, MenuItem { position, ..item }))
            .collect();
    }
}

use crate::{Map, Set};
use std::{fmt, hash::Hash};

/// Anything that can live in an [`EntityStore`].
///
/// Stores key their contents by an explicit identifier rather than by value or
/// address, so an entity can be looked up, checked for and removed given only
/// its id.
pub trait Entity {
    /// The identifying key
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display;

    /// A human-readable name for this kind of entity, used in errors and logs
    const KIND: &'static str;

    /// This entity's identifier
    fn id(&self) -> Self::Id;
}

/// The mutation that a store refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreOp {
    /// Appending an entity
    Add,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
        }
    }
}

/// A store mutation failed. Carries which store and which operation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to {op} {kind} {id}")]
pub struct StoreError {
    /// The kind of entity held by the store
    pub kind: &'static str,
    /// The operation that failed
    pub op: StoreOp,
    /// The entity involved
    pub id: String,
}

/// Whether a query keeps or drops the members of its filter set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Drop anything in the filter; an empty filter keeps everything
    #[default]
    Exclude,
    /// Keep only what is in the filter
    Include,
}

impl FilterMode {
    /// Decide whether an entity passes, given whether it is in the filter set
    pub fn admits(self, in_filter: bool) -> bool {
        match self {
            Self::Exclude => !in_filter,
            Self::Include => in_filter,
        }
    }
}

pub(crate) fn filter_set<K: Eq + Hash>(filter: impl IntoIterator<Item = K>) -> Set<K> {
    filter.into_iter().collect()
}

/// An insertion-ordered collection of one kind of entity.
#[derive(Debug, Clone)]
pub struct EntityStore<T: Entity> {
    entities: Map<T::Id, T>,
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            entities: Map::default(),
        }
    }
}

impl<T: Entity> EntityStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity. An entity whose id is already present is refused.
    pub fn add(&mut self, entity: T) -> Result<(), StoreError> {
        let id = entity.id();
        if self.entities.contains_key(&id) {
            return Err(StoreError {
                kind: T::KIND,
                op: StoreOp::Add,
                id: id.to_string(),
            });
        }
        self.entities.insert(id, entity);
        Ok(())
    }

    /// Remove an entity, preserving the order of the rest.
    ///
    /// Removing something that is not stored succeeds and returns `None`.
    pub fn remove(&mut self, id: T::Id) -> Result<Option<T>, StoreError> {
        Ok(self.entities.shift_remove(&id))
    }

    /// Whether an entity with this id is stored
    pub fn contains(&self, id: T::Id) -> bool {
        self.entities.contains_key(&id)
    }

    /// Look up an entity
    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.entities.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.entities.get_mut(&id)
    }

    /// Every entity, in insertion order
    pub fn all(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.entities.values()
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Whether the store holds anything at all
    pub fn has_data(&self) -> bool {
        !self.is_empty()
    }
}

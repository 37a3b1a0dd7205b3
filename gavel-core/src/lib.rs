#![warn(missing_docs)]
//! Core stores and rules for an in-memory auction marketplace.
//!
//! Clients register with a [`registry::ClientRegistry`], list products in a
//! [`catalog::ProductCatalog`], bid on each other's products and finally settle
//! a sale to the highest bidder. The crate performs no I/O: the interactive
//! shell lives in the `gavel` binary and drives these types through an
//! explicitly passed [`session::IdentitySession`].

/// Domain models: clients, products, bids and settlement arithmetic.
///
/// These are plain data structures. The invariants that span more than one
/// entity (email uniqueness, bid visibility, winner selection) are enforced by
/// the stores that own them.
pub mod models;

/// The generic, insertion-ordered entity store underlying every domain store.
pub mod store;

/// Client ownership, email uniqueness and filtered client queries.
pub mod registry;

/// Product ownership, bidding, bid redaction and settlement.
pub mod catalog;

/// The single authenticated-actor context.
pub mod session;

/// Reversible password encoding.
pub mod security;

// We use non-std collections here for their ordering semantics and performance
pub(crate) type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
pub(crate) type Set<T> = indexmap::IndexSet<T, rustc_hash::FxBuildHasher>;

macro_rules! uuid_wrapper {
    ($struct: ident) => {
        /// A UUID newtype
        #[derive(Debug, Hash, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        #[repr(transparent)]
        pub struct $struct(uuid::Uuid);

        impl $struct {
            /// Generate a fresh random identifier
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4())
            }
        }

        impl From<uuid::Uuid> for $struct {
            fn from(value: uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$struct> for uuid::Uuid {
            fn from(value: $struct) -> Self {
                value.0
            }
        }

        impl TryFrom<&str> for $struct {
            type Error = <uuid::Uuid as std::str::FromStr>::Err;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Ok(Self(<uuid::Uuid as std::str::FromStr>::from_str(value)?))
            }
        }

        impl std::ops::Deref for $struct {
            type Target = uuid::Uuid;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::fmt::Display for $struct {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_wrapper!(ClientId);
uuid_wrapper!(ProductId);

//! Aggregate statistics read definitions.

use crate::domain::{listing, profile};
#[cfg(doc)]
use crate::domain::{Listing, Profile};

/// Aggregate [`Listing`] statistics for the administrative dashboard.
#[derive(Clone, Debug, Default)]
pub struct Aggregate {
    /// Count of browsable (non-tombstoned) [`Listing`]s.
    pub active_listings: i32,

    /// Count of tombstoned [`Listing`]s awaiting purge.
    pub tombstoned_listings: i32,

    /// Count of registered [`Profile`]s.
    pub profiles: i32,

    /// Active [`Listing`]s counted per [`listing::PropertyKind`].
    pub per_property_kind: Vec<PropertyKindCount>,

    /// Active [`Listing`]s counted per [`listing::TransactionKind`].
    pub per_transaction_kind: Vec<TransactionKindCount>,

    /// Owners ranked by their active [`Listing`] count, descending.
    pub top_owners: Vec<OwnerCount>,
}

/// Count of [`Listing`]s of a single [`listing::PropertyKind`].
#[derive(Clone, Copy, Debug)]
pub struct PropertyKindCount {
    /// [`listing::PropertyKind`] being counted.
    pub kind: listing::PropertyKind,

    /// Count of [`Listing`]s of this kind.
    pub count: i32,
}

/// Count of [`Listing`]s of a single [`listing::TransactionKind`].
#[derive(Clone, Copy, Debug)]
pub struct TransactionKindCount {
    /// [`listing::TransactionKind`] being counted.
    pub kind: listing::TransactionKind,

    /// Count of [`Listing`]s of this kind.
    pub count: i32,
}

/// Count of [`Listing`]s owned by a single [`Profile`].
#[derive(Clone, Debug)]
pub struct OwnerCount {
    /// [`profile::Id`] of the owner.
    pub id: profile::Id,

    /// [`profile::Name`] snapshot of the owner.
    pub name: profile::Name,

    /// Count of active [`Listing`]s the owner holds.
    pub count: i32,
}

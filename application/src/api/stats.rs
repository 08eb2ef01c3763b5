//! Aggregate statistics definitions.

use derive_more::From;
use juniper::graphql_object;
use service::read;

use crate::{api, Context};

/// Aggregate `Listing` statistics for the administrative dashboard.
#[derive(Clone, Debug, From)]
pub struct Stats(read::stats::Aggregate);

/// Aggregate `Listing` statistics for the administrative dashboard.
#[graphql_object(context = Context)]
impl Stats {
    /// Count of browsable (non-deleted) `Listing`s.
    #[must_use]
    pub fn active_listings(&self) -> i32 {
        self.0.active_listings
    }

    /// Count of soft-deleted `Listing`s awaiting purge.
    #[must_use]
    pub fn tombstoned_listings(&self) -> i32 {
        self.0.tombstoned_listings
    }

    /// Count of registered `Profile`s.
    #[must_use]
    pub fn profiles(&self) -> i32 {
        self.0.profiles
    }

    /// Active `Listing`s counted per property kind.
    #[must_use]
    pub fn per_property_kind(&self) -> Vec<PropertyKindCount> {
        self.0
            .per_property_kind
            .iter()
            .copied()
            .map(Into::into)
            .collect()
    }

    /// Active `Listing`s counted per transaction kind.
    #[must_use]
    pub fn per_transaction_kind(&self) -> Vec<TransactionKindCount> {
        self.0
            .per_transaction_kind
            .iter()
            .copied()
            .map(Into::into)
            .collect()
    }

    /// Owners ranked by their active `Listing` count, descending.
    #[must_use]
    pub fn top_owners(&self) -> Vec<OwnerCount> {
        self.0.top_owners.iter().cloned().map(Into::into).collect()
    }
}

/// Count of `Listing`s of a single property kind.
#[derive(Clone, Copy, Debug, From)]
pub struct PropertyKindCount(read::stats::PropertyKindCount);

/// Count of `Listing`s of a single property kind.
#[graphql_object(name = "ListingPropertyKindCount", context = Context)]
impl PropertyKindCount {
    /// Property kind being counted.
    #[must_use]
    pub fn kind(&self) -> api::listing::PropertyKind {
        self.0.kind.into()
    }

    /// Count of `Listing`s of this kind.
    #[must_use]
    pub fn count(&self) -> i32 {
        self.0.count
    }
}

/// Count of `Listing`s of a single transaction kind.
#[derive(Clone, Copy, Debug, From)]
pub struct TransactionKindCount(read::stats::TransactionKindCount);

/// Count of `Listing`s of a single transaction kind.
#[graphql_object(name = "ListingTransactionKindCount", context = Context)]
impl TransactionKindCount {
    /// Transaction kind being counted.
    #[must_use]
    pub fn kind(&self) -> api::listing::TransactionKind {
        self.0.kind.into()
    }

    /// Count of `Listing`s of this kind.
    #[must_use]
    pub fn count(&self) -> i32 {
        self.0.count
    }
}

/// Count of `Listing`s owned by a single `Profile`.
#[derive(Clone, Debug, From)]
pub struct OwnerCount(read::stats::OwnerCount);

/// Count of `Listing`s owned by a single `Profile`.
#[graphql_object(name = "ListingOwnerCount", context = Context)]
impl OwnerCount {
    /// `Profile` of the owner.
    #[must_use]
    pub fn owner(&self) -> api::Profile {
        #[expect(
            unsafe_code,
            reason = "aggregated `Listing`s reference existing `Profile`s"
        )]
        unsafe {
            api::Profile::new_unchecked(self.0.id)
        }
    }

    /// `Profile` name snapshot of the owner.
    #[must_use]
    pub fn name(&self) -> api::profile::Name {
        self.0.name.clone().into()
    }

    /// Count of active `Listing`s the owner holds.
    #[must_use]
    pub fn count(&self) -> i32 {
        self.0.count
    }
}

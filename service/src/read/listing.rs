//! [`Listing`]-related read definitions.
//!
//! [`Listing`]: crate::domain::Listing

pub mod list {
    //! [`Listing`] list definitions.

    use derive_more::{From, Into};

    use crate::domain::profile;
    #[cfg(doc)]
    use crate::domain::Listing;

    /// Filter for selecting a [`Listing`] list.
    ///
    /// Criteria-based narrowing happens in memory, so this filter only
    /// restricts which rows are fetched at all.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Filter {
        /// Only [`Listing`]s owned by this [`profile::Id`].
        pub owner: Option<profile::Id>,

        /// Whether tombstoned [`Listing`]s should be included.
        pub with_tombstoned: bool,
    }

    /// Total count of [`Listing`] list items.
    #[derive(Clone, Copy, Debug, Eq, From, Hash, Into, PartialEq)]
    pub struct TotalCount(i32);
}

//! [`Query`] collection related to the multiple [`Listing`]s.

use common::operations::By;

use crate::{domain::Listing, read};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a list of [`Listing`]s in reverse creation order.
pub type List = DatabaseQuery<By<Vec<Listing>, read::listing::list::Filter>>;

/// Queries total count of [`Listing`] list items.
pub type TotalCount = DatabaseQuery<
    By<read::listing::list::TotalCount, read::listing::list::Filter>,
>;

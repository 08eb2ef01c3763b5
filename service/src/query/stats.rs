//! [`Query`] collection related to aggregate statistics.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries the [`read::Aggregate`] statistics.
pub type Aggregate = DatabaseQuery<By<read::Aggregate, ()>>;

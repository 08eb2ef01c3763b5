//! [`Query`] collection related to [`Profile`]s.

use std::collections::HashMap;

use common::operations::By;

use crate::domain::{profile, Profile};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Profile`] by its [`profile::Id`].
pub type ById = DatabaseQuery<By<Option<Profile>, profile::Id>>;

/// Queries [`Profile`]s by their [`profile::Id`]s.
pub type ByIds<IDs> = DatabaseQuery<By<HashMap<profile::Id, Profile>, IDs>>;

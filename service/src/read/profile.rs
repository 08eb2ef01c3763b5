//! [`Profile`]-related read definitions.

use derive_more::Deref;

#[cfg(doc)]
use crate::domain::Profile;

/// Indicator whether a [`Profile`] holds administrative privileges.
#[derive(Clone, Copy, Debug, Deref, Eq, Hash, PartialEq)]
pub struct IsAdmin(pub bool);

impl PartialEq<bool> for IsAdmin {
    fn eq(&self, other: &bool) -> bool {
        self.0 == *other
    }
}

//! [`Session`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, FromStr};
use serde::{Deserialize, Serialize};

#[cfg(doc)]
use crate::domain::Profile;
use crate::domain::profile;

/// Authenticated session of a [`Profile`].
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    /// ID of the [`Profile`] this [`Session`] belongs to.
    pub profile_id: profile::Id,

    /// [`Email`] the [`Session`] was created with.
    ///
    /// Carried in the claims so the access gate can fall back to the
    /// allow-list even when the [`Profile`] row is missing.
    ///
    /// [`Email`]: profile::Email
    pub email: profile::Email,

    /// [`DateTime`] when this [`Session`] expires.
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

/// Access token of a [`Session`].
#[derive(AsRef, Clone, Debug, Display, FromStr)]
pub struct Token(String);

impl Token {
    /// Creates a new [`Token`] without checking its contents.
    ///
    /// # Safety
    ///
    /// The provided `token` must be a valid [`Token`] representation.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub const unsafe fn new_unchecked(token: String) -> Self {
        Self(token)
    }
}

/// [`DateTime`] of a [`Session`] expiration.
pub type ExpirationDateTime = DateTimeOf<(Session, unit::Expiration)>;

//! [`Command`] for creating a new [`Profile`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::profile::{Email, Name, Password};
use crate::{
    domain::{profile, Profile},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Profile`].
#[derive(Clone, Debug)]
pub struct CreateProfile {
    /// [`Email`] of a new [`Profile`].
    pub email: profile::Email,

    /// [`Password`] of a new [`Profile`].
    pub password: SecretBox<profile::Password>,

    /// [`Name`] of a new [`Profile`].
    ///
    /// Derived from the [`Email`] local part when omitted.
    pub name: Option<profile::Name>,
}

impl<Db> Command<CreateProfile> for Service<Db>
where
    Db: for<'e> Database<
            Select<By<Option<Profile>, &'e profile::Email>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Profile>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Profile;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateProfile) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateProfile {
            email,
            password,
            name,
        } = cmd;

        let existing = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let profile = Profile {
            id: profile::Id::new(),
            name: name.unwrap_or_else(|| profile::Name::derive(&email)),
            email,
            password_hash: profile::PasswordHash::new(password.expose_secret()),
            is_admin: false,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(profile.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(profile)
    }
}

/// Error of [`CreateProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`profile::Email`] is already occupied.
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] profile::Email),
}

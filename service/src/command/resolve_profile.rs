//! [`Command`] for resolving a [`Profile`] by an authenticated identity.

use common::{
    operations::{By, Commit, Insert, Lock, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::profile::{Email, Session};
use crate::{
    domain::{profile, Profile},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for resolving the [`Profile`] of an authenticated identity,
/// synthesizing one the first time the identity is seen.
#[derive(Clone, Debug)]
pub struct ResolveProfile {
    /// ID of the [`Profile`] to resolve.
    pub id: profile::Id,

    /// [`Email`] the identity authenticated with.
    pub email: profile::Email,
}

impl<Db> Command<ResolveProfile> for Service<Db>
where
    Db: Database<
            Select<By<Option<Profile>, profile::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Profile>, profile::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Profile, profile::Id>>,
            Err = Traced<database::Error>,
        >
        + Database<Insert<Profile>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Profile;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ResolveProfile,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ResolveProfile { id, email } = cmd;

        if let Some(profile) = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        {
            return Ok(profile);
        }

        let profile = Profile {
            id,
            name: profile::Name::derive(&email),
            email,
            // Unusable sentinel: the identity authenticates via its session,
            // not via this password.
            password_hash: profile::PasswordHash::new(
                &Uuid::new_v4().to_string().into(),
            ),
            is_admin: false,
            created_at: DateTime::now().coerce(),
        };

        // Persistence is best effort: a `Profile` synthesized from valid
        // claims is served even when the row cannot be written.
        match self.persist(&profile).await {
            Ok(Some(existing)) => Ok(existing),
            Ok(None) => Ok(profile),
            Err(e) => {
                tracing::warn!(
                    "Failed to persist a synthesized `Profile`: {e}"
                );
                Ok(profile)
            }
        }
    }
}

impl<Db> Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Profile>, profile::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Profile, profile::Id>>,
            Err = Traced<database::Error>,
        >
        + Database<Insert<Profile>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    /// Inserts the provided [`Profile`], returning a concurrently created
    /// one instead, if any.
    async fn persist(
        &self,
        profile: &Profile,
    ) -> Result<Option<Profile>, Traced<database::Error>> {
        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::wrap!())?;

        // Avoid concurrent synthesis of the same `Profile`.
        tx.execute(Lock(By::new(profile.id)))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let existing = tx
            .execute(Select(By::new(profile.id)))
            .await
            .map_err(tracerr::wrap!())?;
        if existing.is_some() {
            return Ok(existing);
        }

        tx.execute(Insert(profile.clone()))
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::wrap!())
            .map(drop)?;

        Ok(None)
    }
}

/// Error of [`ResolveProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}

//! Access control [`Query`] definitions.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{profile, Profile},
    infra::{database, Database},
    read, Service,
};

use super::Query;

/// Queries whether a [`Profile`] holds administrative privileges.
///
/// A [`Profile`] is an administrator when its persisted flag is set, or when
/// its [`profile::Email`] is present in the configured allowlist.
#[derive(Clone, Copy, Debug, From)]
pub struct IsAdmin(pub profile::Id);

impl<Db> Query<IsAdmin> for Service<Db>
where
    Db: Database<
        Select<By<Option<Profile>, profile::Id>>,
        Ok = Option<Profile>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = read::profile::IsAdmin;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        IsAdmin(id): IsAdmin,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let profile = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ProfileNotExists(id))
            .map_err(tracerr::wrap!())?;

        let granted =
            profile.is_admin || self.config().admins.contains(&profile.email);
        Ok(read::profile::IsAdmin(granted))
    }
}

/// Error of [`IsAdmin`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Profile`] with the provided ID does not exist.
    #[display("`Profile(id: {_0})` does not exist")]
    #[from(ignore)]
    ProfileNotExists(#[error(not(source))] profile::Id),
}

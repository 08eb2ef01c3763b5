//! [`Command`] for hard-deleting a [`Listing`].

use common::operations::{By, Commit, Delete, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Profile;
use crate::{
    domain::{listing, profile, Listing},
    infra::{database, Database},
    query, read, search, Query, Service,
};

use super::Command;

/// [`Command`] for hard-deleting a [`Listing`] along with its stored image.
///
/// Administrator-only: ordinary owners get the reversible
/// [`TombstoneListing`] instead.
///
/// [`TombstoneListing`]: super::TombstoneListing
#[derive(Clone, Copy, Debug)]
pub struct PurgeListing {
    /// ID of the [`Listing`] to purge.
    pub id: listing::Id,

    /// ID of the [`Profile`] performing the purge.
    pub performer: profile::Id,
}

impl<Db> Command<PurgeListing> for Service<Db>
where
    Db: Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Delete<By<Listing, listing::Id>>,
            Err = Traced<database::Error>,
        >
        + Database<Commit, Err = Traced<database::Error>>,
    Self: Query<
        query::access::IsAdmin,
        Ok = read::profile::IsAdmin,
        Err = Traced<query::access::ExecutionError>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: PurgeListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let PurgeListing { id, performer } = cmd;

        let is_admin = self
            .execute(query::access::IsAdmin(performer))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if !*is_admin {
            return Err(tracerr::new!(E::NotPermitted(performer)));
        }

        let Some(listing) = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        else {
            // Idempotent: purging twice is not an error.
            return Ok(());
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Delete(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        if let Some(image) = listing.image_url {
            // Best effort: an orphaned object is not worth failing the
            // purge over.
            _ = self
                .storage()
                .delete_object(image.storage_path())
                .await
                .map_err(|e| {
                    tracing::warn!("Failed to remove a purged image: {e}");
                });
        }

        self.events().publish(search::Event::Deleted(id));

        Ok(())
    }
}

/// Error of [`PurgeListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Access check failed.
    #[display("Access check failed: {_0}")]
    Access(query::access::ExecutionError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Performer is not an administrator.
    #[display("`Profile(id: {_0})` is not permitted to purge `Listing`s")]
    #[from(ignore)]
    NotPermitted(#[error(not(source))] profile::Id),
}

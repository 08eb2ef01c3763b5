//! [`Command`] for soft-deleting a [`Listing`].

use common::operations::{By, Commit, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{listing::Title, Profile};
use crate::{
    domain::{listing, profile, Listing},
    infra::{database, Database},
    query, read, search, Query, Service,
};

use super::Command;

/// [`Command`] for soft-deleting a [`Listing`] by replacing its [`Title`]
/// with the tombstone marker.
///
/// The row (and its image) survives until purged, so the deletion is
/// reversible by operators while being invisible to every read path.
#[derive(Clone, Copy, Debug)]
pub struct TombstoneListing {
    /// ID of the [`Listing`] to tombstone.
    pub id: listing::Id,

    /// ID of the [`Profile`] performing the deletion.
    pub editor: profile::Id,
}

impl<Db> Command<TombstoneListing> for Service<Db>
where
    Db: Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Update<Listing>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
    Self: Query<
        query::access::IsAdmin,
        Ok = read::profile::IsAdmin,
        Err = Traced<query::access::ExecutionError>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: TombstoneListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let TombstoneListing { id, editor } = cmd;

        let mut listing = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ListingNotExists(id))
            .map_err(tracerr::wrap!())?;
        if listing.is_tombstoned() {
            // Idempotent: deleting twice is not an error.
            return Ok(());
        }

        if listing.owner_id != editor {
            let is_admin = self
                .execute(query::access::IsAdmin(editor))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if !*is_admin {
                return Err(tracerr::new!(E::NotPermitted(editor)));
            }
        }

        listing.title = listing::Title::tombstone();

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Update(listing))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.events().publish(search::Event::Deleted(id));

        Ok(())
    }
}

/// Error of [`TombstoneListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Access check failed.
    #[display("Access check failed: {_0}")]
    Access(query::access::ExecutionError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Listing`] with the provided ID does not exist.
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Editor is neither the owner nor an administrator.
    #[display("`Profile(id: {_0})` is not permitted to delete the `Listing`")]
    #[from(ignore)]
    NotPermitted(#[error(not(source))] profile::Id),
}

//! [`PurgeTombstonedListings`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::{
    operations::{By, Delete, Perform, Start},
    DateTime,
};
use tokio::time::interval;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::Listing,
    infra::{database, Database},
    Service,
};

use super::Task;

/// Configuration for [`PurgeTombstonedListings`] [`Task`].
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Interval between purge sweeps.
    pub interval: time::Duration,

    /// Grace period a tombstoned [`Listing`] is kept for before being
    /// purged, counted from its last update.
    pub grace_period: time::Duration,
}

/// [`Task`] for purging [`Listing`]s that have been tombstoned for longer
/// than the configured grace period.
#[derive(Clone, Copy, Debug)]
pub struct PurgeTombstonedListings<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<Db> Task<Start<By<PurgeTombstonedListings<Self>, Config>>> for Service<Db>
where
    PurgeTombstonedListings<Service<Db>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<PurgeTombstonedListings<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = PurgeTombstonedListings {
            config,
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            _ = task.execute(Perform(())).await.map_err(|e| {
                log::error!("`task::PurgeTombstonedListings` failed: {e}");
            });
        }
    }
}

impl<Db> Task<Perform<()>> for PurgeTombstonedListings<Service<Db>>
where
    Db: Database<
        Delete<By<Listing, DateTime>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let deadline = DateTime::now() - self.config.grace_period;
        self.service
            .database()
            .execute(Delete(By::new(deadline)))
            .await
            .map_err(tracerr::map_from_and_wrap!())
    }
}

/// Error of [`PurgeTombstonedListings`] execution.
pub type ExecutionError = Traced<database::Error>;

//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod search;
pub mod task;

use common::operations::{By, Start};
use derive_more::{with_trait::Error, Debug, Display};

use crate::domain::profile;
#[cfg(doc)]
use infra::Database;

pub use self::{command::Command, query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// [JWT] encoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_encoding_key: jsonwebtoken::EncodingKey,

    /// [JWT] decoding key.
    ///
    /// [JWT]: https://datatracker.ietf.org/doc/html/rfc7519
    #[debug(skip)]
    pub jwt_decoding_key: jsonwebtoken::DecodingKey,

    /// [`profile::Email`]s granted administrative access regardless of
    /// their persisted flag.
    pub admins: Vec<profile::Email>,

    /// [`task::PurgeTombstonedListings`] configuration.
    pub purge_tombstoned_listings: task::purge_tombstoned_listings::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`search::Broadcaster`] fanning out listing change [`search::Event`]s.
    events: search::Broadcaster,

    /// Object storage client of this [`Service`].
    storage: infra::http::Storage,

    /// Listing draft extraction client of this [`Service`].
    extractor: infra::http::Extractor,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    pub fn new(
        config: Config,
        database: Db,
        storage: infra::http::Storage,
        extractor: infra::http::Extractor,
    ) -> (Self, task::Background)
    where
        Self: Task<
                Start<
                    By<
                        task::PurgeTombstonedListings<Self>,
                        task::purge_tombstoned_listings::Config,
                    >,
                >,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            database,
            events: search::Broadcaster::new(),
            storage,
            extractor,
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            svc.execute(Start(By::new(
                svc.config().purge_tombstoned_listings,
            )))
            .await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns the [`search::Broadcaster`] of this [`Service`].
    #[must_use]
    pub fn events(&self) -> &search::Broadcaster {
        &self.events
    }

    /// Returns the object storage client of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &infra::http::Storage {
        &self.storage
    }

    /// Returns the draft extraction client of this [`Service`].
    #[must_use]
    pub fn extractor(&self) -> &infra::http::Extractor {
        &self.extractor
    }
}

/// Shortcut for the error of starting a [`Task`].
type TaskStartError<Svc, T, Args> = <Svc as Task<Start<By<T, Args>>>>::Err;

/// Error of starting a [`Service`].
#[derive(Debug, Display, Error)]
pub enum StartupError<Svc>
where
    Svc: Task<
        Start<
            By<
                task::PurgeTombstonedListings<Svc>,
                task::purge_tombstoned_listings::Config,
            >,
        >,
    >,
{
    /// [`task::PurgeTombstonedListings`] failed to start.
    PurgeTombstonedListingsTask(
        TaskStartError<
            Svc,
            task::PurgeTombstonedListings<Svc>,
            task::purge_tombstoned_listings::Config,
        >,
    ),
}

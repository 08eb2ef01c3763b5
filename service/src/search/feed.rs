//! Typed change feed of [`Listing`] mutations.
//!
//! Mutations publish [`Event`]s through a [`Broadcaster`]; the admin log
//! view consumes them with a bounded [`Log`] reducer. The feed is additive
//! and self-correcting: it tolerates duplicates of already fetched rows and
//! events for rows the initial fetch hasn't seen.

use std::collections::VecDeque;

use tokio::sync::broadcast;

use crate::domain::{listing, Listing};

/// Change of a single [`Listing`] row.
#[derive(Clone, Debug)]
pub enum Event {
    /// A new [`Listing`] was created.
    Inserted(Listing),

    /// An existing [`Listing`] was modified.
    ///
    /// An update carrying a tombstone title counts as a deletion for every
    /// consumer.
    Updated(Listing),

    /// A [`Listing`] row was removed, or tombstoned.
    Deleted(listing::Id),
}

impl Event {
    /// Returns the ID of the [`Listing`] this [`Event`] concerns.
    #[must_use]
    pub fn listing_id(&self) -> listing::Id {
        match self {
            Self::Inserted(l) | Self::Updated(l) => l.id,
            Self::Deleted(id) => *id,
        }
    }
}

/// Bounded in-memory log of recently changed [`Listing`]s, newest first.
#[derive(Clone, Debug, Default)]
pub struct Log {
    /// Retained [`Listing`]s, newest first.
    entries: VecDeque<Listing>,
}

impl Log {
    /// Maximum number of [`Listing`]s retained by a [`Log`].
    pub const CAPACITY: usize = 50;

    /// Creates a new [`Log`] pre-seeded with the provided [`Listing`]s
    /// (expected newest first).
    #[must_use]
    pub fn new(seed: impl IntoIterator<Item = Listing>) -> Self {
        let mut log = Self::default();
        for l in seed {
            if !l.is_tombstoned()
                && !log.entries.iter().any(|e| e.id == l.id)
            {
                log.entries.push_back(l);
            }
        }
        log.entries.truncate(Self::CAPACITY);
        log
    }

    /// Applies the provided [`Event`] to this [`Log`].
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::Inserted(l) => {
                // The initial bulk fetch and the live feed are unordered
                // relative to each other, so an insert may duplicate an
                // already fetched row.
                if self.entries.iter().any(|e| e.id == l.id) {
                    return;
                }
                self.entries.push_front(l);
                self.entries.truncate(Self::CAPACITY);
            }
            Event::Updated(l) => {
                if l.is_tombstoned() {
                    self.apply(Event::Deleted(l.id));
                } else if let Some(e) =
                    self.entries.iter_mut().find(|e| e.id == l.id)
                {
                    *e = l;
                } else {
                    // An update for a row the bulk fetch hasn't delivered.
                    self.entries.push_front(l);
                    self.entries.truncate(Self::CAPACITY);
                }
            }
            Event::Deleted(id) => {
                self.entries.retain(|e| e.id != id);
            }
        }
    }

    /// Returns the retained [`Listing`]s, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &Listing> {
        self.entries.iter()
    }

    /// Returns the number of retained [`Listing`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Indicates whether this [`Log`] retains no [`Listing`]s.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fan-out channel of [`Event`]s from mutations to live subscribers.
///
/// Dropping a [`Receiver`] unsubscribes it, so a closed subscription leaks
/// no callbacks.
///
/// [`Receiver`]: broadcast::Receiver
#[derive(Clone, Debug)]
pub struct Broadcaster {
    /// Sending side of the underlying channel.
    tx: broadcast::Sender<Event>,
}

impl Broadcaster {
    /// Number of in-flight [`Event`]s a lagging subscriber may buffer.
    const BUFFER: usize = 64;

    /// Creates a new [`Broadcaster`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            tx: broadcast::channel(Self::BUFFER).0,
        }
    }

    /// Publishes the provided [`Event`] to all current subscribers.
    pub fn publish(&self, event: Event) {
        // An `Err` only means there are no subscribers right now.
        _ = self.tx.send(event);
    }

    /// Subscribes to all future [`Event`]s.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use crate::{domain::listing::Title, search::fixture::listing};

    use super::{Event, Log};

    fn ids(log: &Log) -> Vec<u128> {
        log.entries().map(|l| Uuid::from(l.id).as_u128()).collect()
    }

    #[test]
    fn insert_deduplicates_by_id() {
        let mut log = Log::new([listing(42, "Fetched")]);

        log.apply(Event::Inserted(listing(42, "Live duplicate")));

        assert_eq!(log.len(), 1);
        assert_eq!(
            AsRef::<str>::as_ref(&log.entries().next().unwrap().title),
            "Fetched",
        );
    }

    #[test]
    fn retains_the_fifty_most_recent() {
        let mut log = Log::default();
        for i in 1..=51 {
            log.apply(Event::Inserted(listing(i, "Listing")));
        }

        assert_eq!(log.len(), Log::CAPACITY);
        // Newest first; the very first insert fell off.
        assert_eq!(ids(&log).first(), Some(&51));
        assert!(!ids(&log).contains(&1));
    }

    #[test]
    fn update_replaces_in_place_or_inserts() {
        let mut log = Log::new([listing(1, "Old"), listing(2, "Other")]);

        log.apply(Event::Updated(listing(1, "New")));
        assert_eq!(ids(&log), [1, 2]);
        assert_eq!(
            AsRef::<str>::as_ref(&log.entries().next().unwrap().title),
            "New",
        );

        // The feed may outrun the initial fetch.
        log.apply(Event::Updated(listing(3, "Unseen")));
        assert_eq!(ids(&log), [3, 1, 2]);
    }

    #[test]
    fn tombstoning_update_removes() {
        let mut log = Log::new([listing(1, "Doomed"), listing(2, "Kept")]);

        let mut tombstoned = listing(1, "Doomed");
        tombstoned.title = Title::tombstone();
        log.apply(Event::Updated(tombstoned));

        assert_eq!(ids(&log), [2]);
    }

    #[test]
    fn delete_of_unknown_id_is_a_noop() {
        let mut log = Log::new([listing(1, "Kept")]);

        log.apply(Event::Deleted(Uuid::from_u128(99).into()));

        assert_eq!(ids(&log), [1]);
    }
}

//! Background [`Task`]s definitions.

mod background;
pub mod purge_tombstoned_listings;

pub use common::Handler as Task;

pub use self::{
    background::Background,
    purge_tombstoned_listings::PurgeTombstonedListings,
};

//! Domain definitions.

pub mod listing;
pub mod profile;

pub use self::{listing::Listing, profile::Profile};

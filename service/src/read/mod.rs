//! Read entities definitions.

pub mod listing;
pub mod profile;
pub mod stats;

pub use self::stats::Aggregate;

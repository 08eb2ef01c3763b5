//! [`Command`] definition.

pub mod authorize_profile_session;
pub mod create_listing;
pub mod create_profile;
pub mod create_profile_session;
pub mod extract_listing_draft;
pub mod purge_listing;
pub mod resolve_profile;
pub mod tombstone_listing;
pub mod update_listing;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_profile_session::AuthorizeProfileSession,
    create_listing::CreateListing, create_profile::CreateProfile,
    create_profile_session::CreateProfileSession,
    extract_listing_draft::ExtractListingDraft, purge_listing::PurgeListing,
    resolve_profile::ResolveProfile, tombstone_listing::TombstoneListing,
    update_listing::UpdateListing,
};

//! In-memory listing search core.
//!
//! Views load [`Listing`]s into memory, apply [`filter()`] with the active
//! [`Criteria`], and window the result with [`common::pagination`]. All of
//! it is pure and deterministic; the only stateful piece is the bounded
//! change-feed [`Log`] fed by [`Event`]s.
//!
//! [`Listing`]: crate::domain::Listing

pub mod cascade;
pub mod criteria;
pub mod feed;
mod filter;

pub use self::{
    criteria::{Criteria, Draft},
    feed::{Broadcaster, Event, Log},
    filter::{filter, matches},
};

#[cfg(test)]
pub(crate) mod fixture {
    //! Test fixtures shared by the search modules.

    use common::DateTime;
    use uuid::Uuid;

    use crate::domain::{
        listing::{
            City, Description, District, PropertyKind, Province, Title,
            TransactionKind,
        },
        profile, Listing,
    };

    /// Creates a [`Listing`] with the given `id` and `title` and unsurprising
    /// defaults for everything else.
    pub(crate) fn listing(id: u128, title: &str) -> Listing {
        Listing {
            id: Uuid::from_u128(id).into(),
            title: Title::new(title).unwrap(),
            description: Description::new("A property").unwrap(),
            property_kind: PropertyKind::House,
            transaction_kind: TransactionKind::Sale,
            land_area: Some(120),
            building_area: Some(90),
            bedrooms: Some(3),
            bathrooms: Some(2),
            province: Province::new("Jawa Barat").unwrap(),
            city: City::new("Bandung").unwrap(),
            district: District::new("Coblong").unwrap(),
            price: None,
            owner_id: Uuid::from_u128(1000).into(),
            owner_name: profile::Name::new("Owner").unwrap(),
            image_url: None,
            created_at: DateTime::UNIX_EPOCH.coerce(),
        }
    }
}

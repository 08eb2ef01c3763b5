//! [`Command`] for updating an existing [`Listing`].

use common::{
    operations::{By, Commit, Select, Transact, Transacted, Update},
    Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::listing::{
    City, Description, District, ImageUrl, PropertyKind, Province, Title,
    TransactionKind,
};
#[cfg(doc)]
use crate::domain::Profile;
use crate::{
    domain::{listing, profile, Listing},
    infra::{database, Database},
    query, read, search, Query, Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Listing`].
///
/// Every field is a change: [`None`] keeps the current value, while the
/// double-[`Option`] fields distinguish clearing from keeping.
#[derive(Clone, Debug)]
pub struct UpdateListing {
    /// ID of the [`Listing`] to update.
    pub id: listing::Id,

    /// ID of the [`Profile`] performing the update.
    pub editor: profile::Id,

    /// New [`Title`].
    pub title: Option<listing::Title>,

    /// New [`Description`].
    pub description: Option<listing::Description>,

    /// New [`PropertyKind`].
    pub property_kind: Option<listing::PropertyKind>,

    /// New [`TransactionKind`].
    pub transaction_kind: Option<listing::TransactionKind>,

    /// New land area.
    pub land_area: Option<Option<listing::Area>>,

    /// New building area.
    pub building_area: Option<Option<listing::Area>>,

    /// New number of bedrooms.
    pub bedrooms: Option<Option<listing::Rooms>>,

    /// New number of bathrooms.
    pub bathrooms: Option<Option<listing::Rooms>>,

    /// New [`Province`].
    pub province: Option<listing::Province>,

    /// New [`City`].
    pub city: Option<listing::City>,

    /// New [`District`].
    pub district: Option<listing::District>,

    /// New [`Price`].
    pub price: Option<Option<Price>>,

    /// New [`ImageUrl`].
    pub image_url: Option<Option<listing::ImageUrl>>,
}

impl UpdateListing {
    /// Creates an [`UpdateListing`] [`Command`] changing nothing.
    #[must_use]
    pub fn unchanged(id: listing::Id, editor: profile::Id) -> Self {
        Self {
            id,
            editor,
            title: None,
            description: None,
            property_kind: None,
            transaction_kind: None,
            land_area: None,
            building_area: None,
            bedrooms: None,
            bathrooms: None,
            province: None,
            city: None,
            district: None,
            price: None,
            image_url: None,
        }
    }
}

impl<Db> Command<UpdateListing> for Service<Db>
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
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListing {
            id,
            editor,
            title,
            description,
            property_kind,
            transaction_kind,
            land_area,
            building_area,
            bedrooms,
            bathrooms,
            province,
            city,
            district,
            price,
            image_url,
        } = cmd;

        if title.as_ref().is_some_and(listing::Title::is_tombstone) {
            return Err(tracerr::new!(E::TombstoneTitle));
        }

        let mut listing = self
            .database()
            .execute(Select(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .filter(|l| !l.is_tombstoned())
            .ok_or_else(|| E::ListingNotExists(id))
            .map_err(tracerr::wrap!())?;

        if listing.owner_id != editor {
            let is_admin = self
                .execute(query::access::IsAdmin(editor))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?;
            if !*is_admin {
                return Err(tracerr::new!(E::NotPermitted(editor)));
            }
        }

        let prev_image = listing.image_url.clone();

        if let Some(title) = title {
            listing.title = title;
        }
        if let Some(description) = description {
            listing.description = description;
        }
        if let Some(kind) = property_kind {
            listing.property_kind = kind;
        }
        if let Some(kind) = transaction_kind {
            listing.transaction_kind = kind;
        }
        if let Some(area) = land_area {
            listing.land_area = area;
        }
        if let Some(area) = building_area {
            listing.building_area = area;
        }
        if let Some(rooms) = bedrooms {
            listing.bedrooms = rooms;
        }
        if let Some(rooms) = bathrooms {
            listing.bathrooms = rooms;
        }
        if let Some(province) = province {
            listing.province = province;
        }
        if let Some(city) = city {
            listing.city = city;
        }
        if let Some(district) = district {
            listing.district = district;
        }
        if let Some(price) = price {
            listing.price = price;
        }
        if let Some(url) = image_url {
            listing.image_url = url;
        }

        if listing.property_kind == listing::PropertyKind::Land {
            // Building-bound attributes are meaningless for bare land.
            listing.building_area = None;
            listing.bedrooms = None;
            listing.bathrooms = None;
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        if let Some(prev) = prev_image {
            if listing.image_url.as_ref() != Some(&prev) {
                // Best effort: an orphaned object is not worth failing the
                // update over.
                _ = self.storage().delete_object(prev.storage_path()).await
                    .map_err(|e| {
                        tracing::warn!(
                            "Failed to remove a replaced image: {e}"
                        );
                    });
            }
        }

        self.events().publish(search::Event::Updated(listing.clone()));

        Ok(listing)
    }
}

/// Error of [`UpdateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// Access check failed.
    #[display("Access check failed: {_0}")]
    Access(query::access::ExecutionError),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Listing`] with the provided ID does not exist (or is tombstoned).
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    ListingNotExists(#[error(not(source))] listing::Id),

    /// Editor is neither the owner nor an administrator.
    #[display("`Profile(id: {_0})` is not permitted to edit the `Listing`")]
    #[from(ignore)]
    NotPermitted(#[error(not(source))] profile::Id),

    /// Provided [`Title`] is the reserved soft-delete marker.
    ///
    /// [`Title`]: listing::Title
    #[display("`Title` is reserved")]
    TombstoneTitle,
}

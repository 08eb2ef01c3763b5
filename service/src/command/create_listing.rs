//! [`Command`] for creating a new [`Listing`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime, Price,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::{
    City, Description, District, ImageUrl, PropertyKind, Province, Title,
    TransactionKind,
};
use crate::{
    domain::{listing, profile, Listing, Profile},
    infra::{database, Database},
    search, Service,
};

use super::Command;

/// [`Command`] for creating a new [`Listing`].
#[derive(Clone, Debug)]
pub struct CreateListing {
    /// ID of the [`Profile`] creating the [`Listing`].
    pub owner: profile::Id,

    /// [`Title`] of a new [`Listing`].
    pub title: listing::Title,

    /// [`Description`] of a new [`Listing`].
    pub description: listing::Description,

    /// [`PropertyKind`] of a new [`Listing`].
    pub property_kind: listing::PropertyKind,

    /// [`TransactionKind`] of a new [`Listing`].
    pub transaction_kind: listing::TransactionKind,

    /// Land area of a new [`Listing`].
    pub land_area: Option<listing::Area>,

    /// Building area of a new [`Listing`].
    pub building_area: Option<listing::Area>,

    /// Number of bedrooms in a new [`Listing`].
    pub bedrooms: Option<listing::Rooms>,

    /// Number of bathrooms in a new [`Listing`].
    pub bathrooms: Option<listing::Rooms>,

    /// [`Province`] of a new [`Listing`].
    pub province: listing::Province,

    /// [`City`] of a new [`Listing`].
    pub city: listing::City,

    /// [`District`] of a new [`Listing`].
    pub district: listing::District,

    /// [`Price`] of a new [`Listing`].
    pub price: Option<Price>,

    /// [`ImageUrl`] of a new [`Listing`].
    pub image_url: Option<listing::ImageUrl>,
}

impl<Db> Command<CreateListing> for Service<Db>
where
    Db: Database<
            Select<By<Option<Profile>, profile::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Listing>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateListing) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateListing {
            owner,
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

        if title.is_tombstone() {
            return Err(tracerr::new!(E::TombstoneTitle));
        }

        let owner = self
            .database()
            .execute(Select(By::new(owner)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or_else(|| E::ProfileNotExists(owner))
            .map_err(tracerr::wrap!())?;

        let is_land = property_kind == listing::PropertyKind::Land;
        let listing = Listing {
            id: listing::Id::new(),
            title,
            description,
            property_kind,
            transaction_kind,
            land_area,
            // Building-bound attributes are meaningless for bare land.
            building_area: (!is_land).then_some(building_area).flatten(),
            bedrooms: (!is_land).then_some(bedrooms).flatten(),
            bathrooms: (!is_land).then_some(bathrooms).flatten(),
            province,
            city,
            district,
            price,
            owner_id: owner.id,
            owner_name: owner.name,
            image_url,
            created_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        self.events().publish(search::Event::Inserted(listing.clone()));

        Ok(listing)
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Profile`] with the provided ID does not exist.
    #[display("`Profile(id: {_0})` does not exist")]
    ProfileNotExists(#[error(not(source))] profile::Id),

    /// Provided [`Title`] is the reserved soft-delete marker.
    #[display("`Title` is reserved")]
    TombstoneTitle,
}

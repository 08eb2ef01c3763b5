//! [`Listing`]-related definitions.

use common::{DateTime, Price};
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLEnum, GraphQLInputObject, GraphQLScalar};
use service::{domain, query, search, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A property [`Listing`] offered for sale or rent.
#[derive(Clone, Debug, From)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`domain::Listing`] representing this [`Listing`].
    listing: OnceCell<domain::Listing>,
}

impl From<domain::Listing> for Listing {
    fn from(listing: domain::Listing) -> Self {
        Self {
            id: listing.id.into(),
            listing: OnceCell::new_with(Some(listing)),
        }
    }
}

impl Listing {
    /// Creates a new [`Listing`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that a non-deleted [`Listing`] with the provided ID
    /// exists, otherwise accessing this [`Listing`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            listing: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Listing`] representing this [`Listing`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::Listing`] doesn't exist, or is soft-deleted.
    async fn listing(&self, ctx: &Context) -> Result<&domain::Listing, Error> {
        let id = self.id.into();
        self.listing
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::listing::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|l| {
                        future::ready(
                            l.filter(|l| !l.is_tombstoned()).ok_or_else(
                                || api::query::ListingError::NotExists.into(),
                            ),
                        )
                    })
            })
            .await
    }
}

/// A property `Listing` offered for sale or rent.
#[graphql_object(context = Context)]
impl Listing {
    /// Unique identifier of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Title of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.title",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn title(&self, ctx: &Context) -> Result<Title, Error> {
        Ok(self.listing(ctx).await?.title.clone().into())
    }

    /// Description of this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.description",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn description(
        &self,
        ctx: &Context,
    ) -> Result<Description, Error> {
        Ok(self.listing(ctx).await?.description.clone().into())
    }

    /// Kind of the property this `Listing` offers.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.propertyKind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn property_kind(
        &self,
        ctx: &Context,
    ) -> Result<PropertyKind, Error> {
        Ok(self.listing(ctx).await?.property_kind.into())
    }

    /// Kind of the transaction this `Listing` offers.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.transactionKind",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn transaction_kind(
        &self,
        ctx: &Context,
    ) -> Result<TransactionKind, Error> {
        Ok(self.listing(ctx).await?.transaction_kind.into())
    }

    /// Land area of this `Listing` in square meters.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.landArea",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn land_area(&self, ctx: &Context) -> Result<Option<i32>, Error> {
        self.listing(ctx)
            .await?
            .land_area
            .map(i32::try_from)
            .transpose()
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Building area of this `Listing` in square meters.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.buildingArea",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn building_area(
        &self,
        ctx: &Context,
    ) -> Result<Option<i32>, Error> {
        self.listing(ctx)
            .await?
            .building_area
            .map(i32::try_from)
            .transpose()
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }

    /// Number of bedrooms in this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.bedrooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn bedrooms(&self, ctx: &Context) -> Result<Option<i32>, Error> {
        Ok(self.listing(ctx).await?.bedrooms.map(i32::from))
    }

    /// Number of bathrooms in this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.bathrooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn bathrooms(&self, ctx: &Context) -> Result<Option<i32>, Error> {
        Ok(self.listing(ctx).await?.bathrooms.map(i32::from))
    }

    /// Province this `Listing` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.province",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn province(&self, ctx: &Context) -> Result<Province, Error> {
        Ok(self.listing(ctx).await?.province.clone().into())
    }

    /// City this `Listing` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.city",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn city(&self, ctx: &Context) -> Result<City, Error> {
        Ok(self.listing(ctx).await?.city.clone().into())
    }

    /// District this `Listing` is located in.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.district",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn district(&self, ctx: &Context) -> Result<District, Error> {
        Ok(self.listing(ctx).await?.district.clone().into())
    }

    /// `Price` of this `Listing`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.price",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn price(&self, ctx: &Context) -> Result<Option<Price>, Error> {
        Ok(self.listing(ctx).await?.price)
    }

    /// `Profile` owning this `Listing`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.owner",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn owner(&self, ctx: &Context) -> Result<api::Profile, Error> {
        let owner_id = self.listing(ctx).await?.owner_id;
        #[expect(
            unsafe_code,
            reason = "loaded `Listing` references an existing `Profile`"
        )]
        Ok(unsafe { api::Profile::new_unchecked(owner_id) })
    }

    /// Display name of the owner, snapshotted when this `Listing` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.ownerName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn owner_name(
        &self,
        ctx: &Context,
    ) -> Result<api::profile::Name, Error> {
        Ok(self.listing(ctx).await?.owner_name.clone().into())
    }

    /// URL of the image illustrating this `Listing`, if any.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.imageUrl",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn image_url(
        &self,
        ctx: &Context,
    ) -> Result<Option<ImageUrl>, Error> {
        Ok(self.listing(ctx).await?.image_url.clone().map(Into::into))
    }

    /// Indicator whether this `Listing` is soft-deleted.
    ///
    /// Always `false` for `Listing`s loaded lazily, may be `true` only in
    /// administrative full exports.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.isDeleted",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn is_deleted(&self, ctx: &Context) -> Result<bool, Error> {
        Ok(self.listing(ctx).await?.is_tombstoned())
    }

    /// `DateTime` when this `Listing` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Listing.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.listing(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Listing`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::listing::Id)]
#[into(domain::listing::Id)]
#[graphql(name = "ListingId", transparent)]
pub struct Id(Uuid);

/// Title of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingTitle",
    with = scalar::Via::<domain::listing::Title>,
)]
pub struct Title(domain::listing::Title);

/// Description of a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingDescription",
    with = scalar::Via::<domain::listing::Description>,
)]
pub struct Description(domain::listing::Description);

/// Province a `Listing` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingProvince",
    with = scalar::Via::<domain::listing::Province>,
)]
pub struct Province(domain::listing::Province);

/// City a `Listing` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingCity",
    with = scalar::Via::<domain::listing::City>,
)]
pub struct City(domain::listing::City);

/// District a `Listing` is located in.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingDistrict",
    with = scalar::Via::<domain::listing::District>,
)]
pub struct District(domain::listing::District);

/// URL of an image illustrating a `Listing`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ListingImageUrl",
    with = scalar::Via::<domain::listing::ImageUrl>,
)]
pub struct ImageUrl(domain::listing::ImageUrl);

/// Kind of the property a `Listing` offers.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingPropertyKind")]
pub enum PropertyKind {
    /// Standalone house.
    House,

    /// Plot of land without a building.
    Land,

    /// Apartment unit.
    Apartment,
}

impl From<domain::listing::PropertyKind> for PropertyKind {
    fn from(kind: domain::listing::PropertyKind) -> Self {
        use domain::listing::PropertyKind as K;

        match kind {
            K::House => Self::House,
            K::Land => Self::Land,
            K::Apartment => Self::Apartment,
        }
    }
}

impl From<PropertyKind> for domain::listing::PropertyKind {
    fn from(kind: PropertyKind) -> Self {
        match kind {
            PropertyKind::House => Self::House,
            PropertyKind::Land => Self::Land,
            PropertyKind::Apartment => Self::Apartment,
        }
    }
}

/// Kind of the transaction a `Listing` offers.
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingTransactionKind")]
pub enum TransactionKind {
    /// Property is sold.
    Sale,

    /// Property is rented out.
    Rent,
}

impl From<domain::listing::TransactionKind> for TransactionKind {
    fn from(kind: domain::listing::TransactionKind) -> Self {
        use domain::listing::TransactionKind as K;

        match kind {
            K::Sale => Self::Sale,
            K::Rent => Self::Rent,
        }
    }
}

impl From<TransactionKind> for domain::listing::TransactionKind {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Sale => Self::Sale,
            TransactionKind::Rent => Self::Rent,
        }
    }
}

/// Filter for narrowing down `Listing` lists.
///
/// All the provided predicates must be satisfied at once.
#[derive(Clone, Debug, Default, GraphQLInputObject)]
#[graphql(name = "ListingsFilter")]
pub struct Filter {
    /// Term matched case-insensitively against a `Listing` title or city.
    pub search: Option<String>,

    /// Kind of the property to restrict `Listing`s to.
    pub property_kind: Option<PropertyKind>,

    /// Kind of the transaction to restrict `Listing`s to.
    pub transaction_kind: Option<TransactionKind>,

    /// Province to restrict `Listing`s to.
    pub province: Option<Province>,

    /// City to restrict `Listing`s to.
    pub city: Option<City>,

    /// District to restrict `Listing`s to.
    pub district: Option<District>,

    /// Inclusive lower `Price` bound.
    pub price_min: Option<Price>,

    /// Inclusive upper `Price` bound.
    pub price_max: Option<Price>,

    /// Inclusive lower land area bound, in square meters.
    pub land_area_min: Option<i32>,

    /// Inclusive upper land area bound, in square meters.
    pub land_area_max: Option<i32>,

    /// Inclusive lower building area bound, in square meters.
    pub building_area_min: Option<i32>,

    /// Inclusive upper building area bound, in square meters.
    pub building_area_max: Option<i32>,

    /// Exact number of bedrooms to restrict `Listing`s to.
    pub bedrooms: Option<i32>,

    /// Exact number of bathrooms to restrict `Listing`s to.
    pub bathrooms: Option<i32>,
}

impl TryFrom<Filter> for search::Criteria {
    type Error = std::num::TryFromIntError;

    fn try_from(filter: Filter) -> Result<Self, Self::Error> {
        let Filter {
            search,
            property_kind,
            transaction_kind,
            province,
            city,
            district,
            price_min,
            price_max,
            land_area_min,
            land_area_max,
            building_area_min,
            building_area_max,
            bedrooms,
            bathrooms,
        } = filter;
        Ok(Self {
            search,
            property_kind: property_kind.map(Into::into),
            transaction_kind: transaction_kind.map(Into::into),
            province: province.map(Into::into),
            city: city.map(Into::into),
            district: district.map(Into::into),
            price_min,
            price_max,
            land_area_min: land_area_min.map(TryInto::try_into).transpose()?,
            land_area_max: land_area_max.map(TryInto::try_into).transpose()?,
            building_area_min: building_area_min
                .map(TryInto::try_into)
                .transpose()?,
            building_area_max: building_area_max
                .map(TryInto::try_into)
                .transpose()?,
            bedrooms: bedrooms.map(TryInto::try_into).transpose()?,
            bathrooms: bathrooms.map(TryInto::try_into).transpose()?,
        })
    }
}

/// Change of a single [`Listing`].
#[derive(Clone, Debug, From)]
pub struct Event(search::Event);

/// Change of a single `Listing`.
#[graphql_object(name = "ListingEvent", context = Context)]
impl Event {
    /// Kind of this `ListingEvent`.
    ///
    /// An update replacing the title with a tombstone is reported as a
    /// deletion.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match &self.0 {
            search::Event::Inserted(_) => EventKind::Inserted,
            search::Event::Updated(l) => {
                if l.is_tombstoned() {
                    EventKind::Deleted
                } else {
                    EventKind::Updated
                }
            }
            search::Event::Deleted(_) => EventKind::Deleted,
        }
    }

    /// ID of the `Listing` this `ListingEvent` concerns.
    #[must_use]
    pub fn listing_id(&self) -> Id {
        self.0.listing_id().into()
    }

    /// Snapshot of the changed `Listing`, absent for deletions.
    #[must_use]
    pub fn listing(&self) -> Option<Listing> {
        match &self.0 {
            search::Event::Inserted(l) | search::Event::Updated(l) => {
                (!l.is_tombstoned()).then(|| l.clone().into())
            }
            search::Event::Deleted(_) => None,
        }
    }
}

/// Kind of a [`Event`].
#[derive(Clone, Copy, Debug, Eq, GraphQLEnum, PartialEq)]
#[graphql(name = "ListingEventKind")]
pub enum EventKind {
    /// A new `Listing` was created.
    Inserted,

    /// An existing `Listing` was modified.
    Updated,

    /// A `Listing` was deleted.
    Deleted,
}

pub mod draft {
    //! Definitions related to a [`Listing`] draft extraction.
    //!
    //! [`Listing`]: super::Listing

    use common::Price;
    use derive_more::From;
    use juniper::graphql_object;
    use service::command;

    use crate::Context;

    use super::{
        City, Description, District, PropertyKind, Province, Title,
        TransactionKind,
    };

    /// Draft of a `Listing` extracted from a free-form text.
    ///
    /// Every field is advisory and may be absent.
    #[derive(Clone, Debug, From)]
    pub struct Draft(command::extract_listing_draft::Output);

    /// Draft of a `Listing` extracted from a free-form text.
    #[graphql_object(name = "ListingDraft", context = Context)]
    impl Draft {
        /// Suggested title.
        #[must_use]
        pub fn title(&self) -> Option<Title> {
            self.0.title.clone().map(Into::into)
        }

        /// Cleaned-up description.
        #[must_use]
        pub fn description(&self) -> Option<Description> {
            self.0.description.clone().map(Into::into)
        }

        /// Recognized kind of the property.
        #[must_use]
        pub fn property_kind(&self) -> Option<PropertyKind> {
            self.0.property_kind.map(Into::into)
        }

        /// Recognized kind of the transaction.
        #[must_use]
        pub fn transaction_kind(&self) -> Option<TransactionKind> {
            self.0.transaction_kind.map(Into::into)
        }

        /// Land area in square meters.
        #[must_use]
        pub fn land_area(&self) -> Option<i32> {
            self.0.land_area.and_then(|a| i32::try_from(a).ok())
        }

        /// Building area in square meters.
        #[must_use]
        pub fn building_area(&self) -> Option<i32> {
            self.0.building_area.and_then(|a| i32::try_from(a).ok())
        }

        /// Number of bedrooms.
        #[must_use]
        pub fn bedrooms(&self) -> Option<i32> {
            self.0.bedrooms.map(i32::from)
        }

        /// Number of bathrooms.
        #[must_use]
        pub fn bathrooms(&self) -> Option<i32> {
            self.0.bathrooms.map(i32::from)
        }

        /// Province mentioned in the text.
        #[must_use]
        pub fn province(&self) -> Option<Province> {
            self.0.province.clone().map(Into::into)
        }

        /// City mentioned in the text.
        #[must_use]
        pub fn city(&self) -> Option<City> {
            self.0.city.clone().map(Into::into)
        }

        /// District mentioned in the text.
        #[must_use]
        pub fn district(&self) -> Option<District> {
            self.0.district.clone().map(Into::into)
        }

        /// Extracted `Price`.
        #[must_use]
        pub fn price(&self) -> Option<Price> {
            self.0.price
        }
    }
}

pub mod list {
    //! Definitions related to a [`Listing`] list page.
    //!
    //! [`Listing`]: super::Listing

    use derive_more::From;
    use juniper::graphql_object;
    use service::domain;

    use crate::Context;

    use super::Listing;

    /// Single page of a `Listing` list.
    #[derive(Clone, Debug, From)]
    pub struct Page(common::Page<domain::Listing>);

    /// Single page of a `Listing` list.
    #[graphql_object(name = "ListingsPage", context = Context)]
    impl Page {
        /// `Listing`s of this `ListingsPage`.
        #[must_use]
        pub fn items(&self) -> Vec<Listing> {
            self.0.items.iter().cloned().map(Into::into).collect()
        }

        /// 1-based number of this `ListingsPage`.
        ///
        /// May be lower than the requested one, as it's clamped into the
        /// valid range.
        #[must_use]
        pub fn number(&self) -> i32 {
            i32::try_from(self.0.number.get()).unwrap_or(i32::MAX)
        }

        /// Total number of pages in the list.
        #[must_use]
        pub fn total_pages(&self) -> i32 {
            i32::try_from(self.0.total_pages).unwrap_or(i32::MAX)
        }

        /// Total number of `Listing`s in the list.
        #[must_use]
        pub fn total_items(&self) -> i32 {
            i32::try_from(self.0.total_items).unwrap_or(i32::MAX)
        }
    }
}

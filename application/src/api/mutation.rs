//! GraphQL [`Mutation`]s definitions.

use common::Price;
use juniper::graphql_object;
use service::{command, Command as _};

use crate::{api, define_error, AsError, Context, Error, Session};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Creates a new `Profile` with the provided credentials.
    ///
    /// The created `Profile` is authenticated straight away, so the returned
    /// `Session` may be used immediately.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMAIL_OCCUPIED` - provided `ProfileEmail` is occupied by another
    ///                      `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "createProfile",
            name = ?name.as_ref().map(ToString::to_string),
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_profile(
        email: api::profile::Email,
        password: api::profile::Password,
        name: Option<api::profile::Name>,
        ctx: &Context,
    ) -> Result<api::profile::session::CreateResult, Error> {
        let profile = ctx
            .service()
            .execute(command::CreateProfile {
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
                name: name.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let output = ctx
            .service()
            .execute(command::CreateProfileSession::ByProfileId(profile.id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            profile_id: output.profile.id.into(),
            email: output.profile.email.clone(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `Session` with the provided credentials.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `WRONG_CREDENTIALS` - provided credentials does not match any
    ///                         `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            gql.name = "createProfileSession",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_profile_session(
        email: api::profile::Email,
        password: api::profile::Password,
        ctx: &Context,
    ) -> Result<api::profile::session::CreateResult, Error> {
        let output = ctx
            .service()
            .execute(command::CreateProfileSession::ByCredentials {
                email: email.into(),
                password: secrecy::SecretBox::init_with(move || {
                    password.into()
                }),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        ctx.set_current_session(Session {
            profile_id: output.profile.id.into(),
            email: output.profile.email.clone(),
            token: output.token.clone(),
            expires_at: output.expires_at.coerce(),
        })
        .await;

        Ok(output.into())
    }

    /// Creates a new `Listing` owned by the current `Profile`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `TITLE_RESERVED` - the provided `ListingTitle` is reserved for
    ///                      marking deletions.
    #[tracing::instrument(
        skip_all,
        fields(
            bathrooms = ?bathrooms,
            bedrooms = ?bedrooms,
            building_area = ?building_area,
            city = %city,
            district = %district,
            gql.name = "createListing",
            image_url = ?image_url.as_ref().map(ToString::to_string),
            land_area = ?land_area,
            otel.name = Self::SPAN_NAME,
            price = ?price.as_ref().map(ToString::to_string),
            property_kind = ?property_kind,
            province = %province,
            title = %title,
            transaction_kind = ?transaction_kind,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn create_listing(
        title: api::listing::Title,
        description: api::listing::Description,
        property_kind: api::listing::PropertyKind,
        transaction_kind: api::listing::TransactionKind,
        province: api::listing::Province,
        city: api::listing::City,
        district: api::listing::District,
        land_area: Option<i32>,
        building_area: Option<i32>,
        bedrooms: Option<i32>,
        bathrooms: Option<i32>,
        price: Option<Price>,
        image_url: Option<api::listing::ImageUrl>,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let land_area = land_area
            .map(TryInto::try_into)
            .transpose()
            .map_err(AsError::into_error)?;
        let building_area = building_area
            .map(TryInto::try_into)
            .transpose()
            .map_err(AsError::into_error)?;
        let bedrooms = bedrooms
            .map(TryInto::try_into)
            .transpose()
            .map_err(AsError::into_error)?;
        let bathrooms = bathrooms
            .map(TryInto::try_into)
            .transpose()
            .map_err(AsError::into_error)?;

        let my_id = ctx.current_session().await?.profile_id;

        ctx.service()
            .execute(command::CreateListing {
                owner: my_id.into(),
                title: title.into(),
                description: description.into(),
                property_kind: property_kind.into(),
                transaction_kind: transaction_kind.into(),
                land_area,
                building_area,
                bedrooms,
                bathrooms,
                province: province.into(),
                city: city.into(),
                district: district.into(),
                price,
                image_url: image_url.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Updates the `Listing` with the provided ID.
    ///
    /// Omitted arguments leave the corresponding fields unchanged.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `NOT_PERMITTED` - the current `Profile` is neither the owner of the
    ///                     `Listing` nor an administrator;
    /// - `TITLE_RESERVED` - the provided `ListingTitle` is reserved for
    ///                      marking deletions.
    #[tracing::instrument(
        skip_all,
        fields(
            bathrooms = ?bathrooms,
            bedrooms = ?bedrooms,
            building_area = ?building_area,
            city = ?city.as_ref().map(ToString::to_string),
            district = ?district.as_ref().map(ToString::to_string),
            gql.name = "updateListing",
            id = %id,
            image_url = ?image_url.as_ref().map(ToString::to_string),
            land_area = ?land_area,
            otel.name = Self::SPAN_NAME,
            price = ?price.as_ref().map(ToString::to_string),
            property_kind = ?property_kind,
            province = ?province.as_ref().map(ToString::to_string),
            title = ?title.as_ref().map(ToString::to_string),
            transaction_kind = ?transaction_kind,
        ),
    )]
    #[expect(clippy::too_many_arguments, reason = "still readable")]
    pub async fn update_listing(
        id: api::listing::Id,
        title: Option<api::listing::Title>,
        description: Option<api::listing::Description>,
        property_kind: Option<api::listing::PropertyKind>,
        transaction_kind: Option<api::listing::TransactionKind>,
        province: Option<api::listing::Province>,
        city: Option<api::listing::City>,
        district: Option<api::listing::District>,
        land_area: Option<i32>,
        building_area: Option<i32>,
        bedrooms: Option<i32>,
        bathrooms: Option<i32>,
        price: Option<Price>,
        image_url: Option<api::listing::ImageUrl>,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let land_area = land_area
            .map(TryInto::try_into)
            .transpose()
            .map_err(AsError::into_error)?
            .map(Some);
        let building_area = building_area
            .map(TryInto::try_into)
            .transpose()
            .map_err(AsError::into_error)?
            .map(Some);
        let bedrooms = bedrooms
            .map(TryInto::try_into)
            .transpose()
            .map_err(AsError::into_error)?
            .map(Some);
        let bathrooms = bathrooms
            .map(TryInto::try_into)
            .transpose()
            .map_err(AsError::into_error)?
            .map(Some);

        let my_id = ctx.current_session().await?.profile_id;

        ctx.service()
            .execute(command::UpdateListing {
                id: id.into(),
                editor: my_id.into(),
                title: title.map(Into::into),
                description: description.map(Into::into),
                property_kind: property_kind.map(Into::into),
                transaction_kind: transaction_kind.map(Into::into),
                land_area,
                building_area,
                bedrooms,
                bathrooms,
                province: province.map(Into::into),
                city: city.map(Into::into),
                district: district.map(Into::into),
                price: price.map(Some),
                image_url: image_url.map(|url| Some(url.into())),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Removes the image of the `Listing` with the provided ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `NOT_PERMITTED` - the current `Profile` is neither the owner of the
    ///                     `Listing` nor an administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "removeListingImage",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn remove_listing_image(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        let my_id = ctx.current_session().await?.profile_id;

        let cmd = command::UpdateListing {
            image_url: Some(None),
            ..command::UpdateListing::unchanged(id.into(), my_id.into())
        };
        ctx.service()
            .execute(cmd)
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Soft-deletes the `Listing` with the provided ID.
    ///
    /// The `Listing` disappears from every browsing surface immediately, while
    /// its row is hard-deleted later by a background sweep.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the provided ID does not
    ///                          exist;
    /// - `NOT_PERMITTED` - the current `Profile` is neither the owner of the
    ///                     `Listing` nor an administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "deleteListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn delete_listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::listing::Id, Error> {
        let my_id = ctx.current_session().await?.profile_id;

        ctx.service()
            .execute(command::TombstoneListing {
                id: id.into(),
                editor: my_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| id)
    }

    /// Hard-deletes the `Listing` with the provided ID along with its stored
    /// image, skipping the tombstone grace period.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the current `Profile` is not an administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "purgeListing",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn purge_listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::listing::Id, Error> {
        let my_id = ctx.current_session().await?.profile_id;

        ctx.service()
            .execute(command::PurgeListing {
                id: id.into(),
                performer: my_id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|()| id)
    }

    /// Extracts a `ListingDraft` from the provided free-form text.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EXTRACTION_FAILED` - the extraction backend refused or failed to
    ///                         process the text.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "extractListingDraft",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn extract_listing_draft(
        text: String,
        ctx: &Context,
    ) -> Result<api::listing::draft::Draft, Error> {
        _ = ctx.current_session().await?;

        ctx.service()
            .execute(command::ExtractListingDraft { text })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for command::create_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMAIL_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`ProfileEmail` is occupied by another `Profile`"]
                EmailOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error::EmailOccupied.into()),
        }
    }
}

impl AsError for command::create_profile_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "WRONG_CREDENTIALS"]
                #[status = FORBIDDEN]
                #[message = "Provided credentials does not match any \
                             `Profile`"]
                WrongCredentials,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::JsonWebTokenEncodeError(_) => None,
            Self::ProfileNotExists(_) | Self::WrongCredentials => {
                Some(Error::WrongCredentials.into())
            }
        }
    }
}

impl AsError for command::create_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "TITLE_RESERVED"]
                #[status = BAD_REQUEST]
                #[message = "Provided `ListingTitle` is reserved for marking \
                             deletions"]
                TitleReserved,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ProfileNotExists(_) => None,
            Self::TombstoneTitle => Some(Error::TitleReserved.into()),
        }
    }
}

impl AsError for command::update_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,

                #[code = "NOT_PERMITTED"]
                #[status = FORBIDDEN]
                #[message = "Authenticated `Profile` is not permitted to edit \
                             the `Listing`"]
                NotPermitted,

                #[code = "TITLE_RESERVED"]
                #[status = BAD_REQUEST]
                #[message = "Provided `ListingTitle` is reserved for marking \
                             deletions"]
                TitleReserved,
            }
        }

        Some(match self {
            Self::Access(e) => return e.try_as_error(),
            Self::Db(e) => return e.try_as_error(),
            Self::ListingNotExists(_) => Error::ListingNotExists.into(),
            Self::NotPermitted(_) => Error::NotPermitted.into(),
            Self::TombstoneTitle => Error::TitleReserved.into(),
        })
    }
}

impl AsError for command::tombstone_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "LISTING_NOT_EXISTS"]
                #[status = NOT_FOUND]
                #[message = "`Listing` with the provided ID does not exist"]
                ListingNotExists,

                #[code = "NOT_PERMITTED"]
                #[status = FORBIDDEN]
                #[message = "Authenticated `Profile` is not permitted to \
                             delete the `Listing`"]
                NotPermitted,
            }
        }

        Some(match self {
            Self::Access(e) => return e.try_as_error(),
            Self::Db(e) => return e.try_as_error(),
            Self::ListingNotExists(_) => Error::ListingNotExists.into(),
            Self::NotPermitted(_) => Error::NotPermitted.into(),
        })
    }
}

impl AsError for command::purge_listing::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        Some(match self {
            Self::Access(e) => return e.try_as_error(),
            Self::Db(e) => return e.try_as_error(),
            Self::NotPermitted(_) => api::PrivilegeError::Admin.into(),
        })
    }
}

impl AsError for command::extract_listing_draft::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EXTRACTION_FAILED"]
                #[status = BAD_GATEWAY]
                #[message = "Extraction backend failed to process the text"]
                ExtractionFailed,
            }
        }

        match self {
            Self::Extraction(_) => Some(Error::ExtractionFailed.into()),
        }
    }
}

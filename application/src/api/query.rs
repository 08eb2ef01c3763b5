//! GraphQL [`Query`]s definitions.

use common::{PageNumber, PageSize};
use juniper::graphql_object;
use service::{
    command::{self, Command as _},
    domain, query, read, search, Query as _,
};

use crate::{api, define_error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";

    /// Loads all the browsable (non-deleted) [`domain::Listing`]s.
    async fn browsable_listings(
        ctx: &Context,
    ) -> Result<Vec<domain::Listing>, Error> {
        ctx.service()
            .execute(query::listings::List::by(
                read::listing::list::Filter::default(),
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
    }
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns the `Profile` of the currently authenticated identity.
    ///
    /// The `Profile` is materialized on first access, so this query always
    /// succeeds for a valid authentication token.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "myProfile",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn my_profile(ctx: &Context) -> Result<api::Profile, Error> {
        let session = ctx.current_session().await?;
        ctx.service()
            .execute(command::ResolveProfile {
                id: session.profile_id.into(),
                email: session.email.clone(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Profile` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `PROFILE_NOT_EXISTS` - the `Profile` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "profile",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn profile(
        id: api::profile::Id,
        ctx: &Context,
    ) -> Result<api::Profile, Error> {
        ctx.service()
            .execute(query::profile::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| ProfileError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Listing` with the specified ID.
    ///
    /// Soft-deleted `Listing`s are reported as non-existing.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `LISTING_NOT_EXISTS` - the `Listing` with the specified ID does not
    ///                          exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "listing",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn listing(
        id: api::listing::Id,
        ctx: &Context,
    ) -> Result<api::Listing, Error> {
        ctx.service()
            .execute(query::listing::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .filter(|l| !l.is_tombstoned())
            .ok_or_else(|| ListingError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Fetches the page of browsable `Listing`s satisfying the provided
    /// filter.
    ///
    /// The requested page number is clamped into the valid range, so
    /// over-shooting it returns the last page rather than an empty one.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGE_NUMBER` - the requested page number is not positive;
    /// - `INVALID_FILTER_BOUND` - a numeric filter bound is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?filter,
            gql.name = "listings",
            otel.name = Self::SPAN_NAME,
            page = ?page,
        ),
    )]
    pub async fn listings(
        filter: Option<api::listing::Filter>,
        page: Option<i32>,
        ctx: &Context,
    ) -> Result<api::listing::list::Page, Error> {
        let criteria = search::Criteria::try_from(filter.unwrap_or_default())
            .map_err(|_| api::FilterError::NegativeBound.into())
            .map_err(ctx.error())?;
        let page = page
            .map(PageNumber::try_from)
            .transpose()
            .map_err(|_| api::PaginationError::InvalidNumber.into())
            .map_err(ctx.error())?
            .unwrap_or_default();

        let all = Self::browsable_listings(ctx).await?;
        let matched = search::filter(&all, &criteria);

        Ok(common::Page::new(matched, PageSize::default(), page).into())
    }

    /// Fetches the page of `Listing`s owned by the currently authenticated
    /// `Profile`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_PAGE_NUMBER` - the requested page number is not positive;
    /// - `INVALID_FILTER_BOUND` - a numeric filter bound is negative.
    #[tracing::instrument(
        skip_all,
        fields(
            filter = ?filter,
            gql.name = "myListings",
            otel.name = Self::SPAN_NAME,
            page = ?page,
        ),
    )]
    pub async fn my_listings(
        filter: Option<api::listing::Filter>,
        page: Option<i32>,
        ctx: &Context,
    ) -> Result<api::listing::list::Page, Error> {
        let my_id = ctx.current_session().await?.profile_id;

        let criteria = search::Criteria::try_from(filter.unwrap_or_default())
            .map_err(|_| api::FilterError::NegativeBound.into())
            .map_err(ctx.error())?;
        let page = page
            .map(PageNumber::try_from)
            .transpose()
            .map_err(|_| api::PaginationError::InvalidNumber.into())
            .map_err(ctx.error())?
            .unwrap_or_default();

        let mine = ctx
            .service()
            .execute(query::listings::List::by(read::listing::list::Filter {
                owner: Some(my_id.into()),
                with_tombstoned: false,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        let matched = search::filter(&mine, &criteria);

        Ok(common::Page::new(matched, PageSize::default(), page).into())
    }

    /// Returns all the provinces browsable `Listing`s are located in.
    ///
    /// Provinces are ordered by the first appearance in the list.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "provinceOptions",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn province_options(
        ctx: &Context,
    ) -> Result<Vec<api::listing::Province>, Error> {
        let all = Self::browsable_listings(ctx).await?;
        Ok(search::cascade::province_options(&all)
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Returns all the cities browsable `Listing`s are located in, optionally
    /// narrowed down to the specified province.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "cityOptions",
            otel.name = Self::SPAN_NAME,
            province = ?province.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn city_options(
        province: Option<api::listing::Province>,
        ctx: &Context,
    ) -> Result<Vec<api::listing::City>, Error> {
        let all = Self::browsable_listings(ctx).await?;
        let province = province.map(Into::into);
        Ok(search::cascade::city_options(&all, province.as_ref())
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Returns all the districts browsable `Listing`s are located in,
    /// optionally narrowed down to the specified province and city.
    #[tracing::instrument(
        skip_all,
        fields(
            city = ?city.as_ref().map(ToString::to_string),
            gql.name = "districtOptions",
            otel.name = Self::SPAN_NAME,
            province = ?province.as_ref().map(ToString::to_string),
        ),
    )]
    pub async fn district_options(
        province: Option<api::listing::Province>,
        city: Option<api::listing::City>,
        ctx: &Context,
    ) -> Result<Vec<api::listing::District>, Error> {
        let all = Self::browsable_listings(ctx).await?;
        let province = province.map(Into::into);
        let city = city.map(Into::into);
        Ok(search::cascade::district_options(
            &all,
            province.as_ref(),
            city.as_ref(),
        )
        .into_iter()
        .map(Into::into)
        .collect())
    }

    /// Calculates the aggregate `Stats` for the administrative dashboard.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the current `Profile` is not an administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "stats",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn stats(ctx: &Context) -> Result<api::Stats, Error> {
        let my_id = ctx.current_session().await?.profile_id;
        let is_admin = ctx
            .service()
            .execute(query::access::IsAdmin(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        if !*is_admin {
            return Err(api::PrivilegeError::Admin.into());
        }

        ctx.service()
            .execute(query::stats::Aggregate::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the full `Listing` dump for an administrative backup,
    /// soft-deleted ones included.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the current `Profile` is not an administrator.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "exportListings",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn export_listings(
        ctx: &Context,
    ) -> Result<Vec<api::Listing>, Error> {
        let my_id = ctx.current_session().await?.profile_id;
        let is_admin = ctx
            .service()
            .execute(query::access::IsAdmin(my_id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;
        if !*is_admin {
            return Err(api::PrivilegeError::Admin.into());
        }

        ctx.service()
            .execute(query::listings::List::by(read::listing::list::Filter {
                owner: None,
                with_tombstoned: true,
            }))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|listings| listings.into_iter().map(Into::into).collect())
    }
}

impl AsError for command::resolve_profile::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
        }
    }
}

define_error! {
    enum ListingError {
        #[code = "LISTING_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Listing` with the specified ID does not exist"]
        NotExists,
    }
}

define_error! {
    enum ProfileError {
        #[code = "PROFILE_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Profile` with the specified ID does not exist"]
        NotExists,
    }
}

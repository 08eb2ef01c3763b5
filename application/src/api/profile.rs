//! [`Profile`]-related definitions.

use common::DateTime;
use derive_more::{AsRef, Display, From, Into};
use futures::{future, TryFutureExt as _};
use juniper::{graphql_object, GraphQLScalar};
use service::{domain, query, Query as _};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{
    api::{self, scalar},
    AsError, Context, Error,
};

/// A [`Profile`] of the system.
#[derive(Clone, Debug, From)]
pub struct Profile {
    /// ID of this [`Profile`].
    pub id: Id,

    /// [`domain::Profile`] representing this [`Profile`].
    profile: OnceCell<domain::Profile>,
}

impl From<domain::Profile> for Profile {
    fn from(profile: domain::Profile) -> Self {
        Self {
            id: profile.id.into(),
            profile: OnceCell::new_with(Some(profile)),
        }
    }
}

impl Profile {
    /// Creates a new [`Profile`] with the provided ID.
    ///
    /// # Safety
    ///
    /// Caller must ensure that [`Profile`] with the provided ID exists,
    /// otherwise accessing this [`Profile`] will result with an error.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            profile: OnceCell::new(),
        }
    }

    /// Returns the [`domain::Profile`] representing this [`Profile`].
    ///
    /// # Errors
    ///
    /// Error if the [`domain::Profile`] doesn't exist.
    async fn profile(&self, ctx: &Context) -> Result<&domain::Profile, Error> {
        let id = self.id.into();
        self.profile
            .get_or_try_init(|| {
                ctx.service()
                    .execute(query::profile::ById::by(id))
                    .map_err(AsError::into_error)
                    .map_err(ctx.error())
                    .and_then(|p| {
                        future::ready(p.ok_or_else(|| {
                            api::query::ProfileError::NotExists.into()
                        }))
                    })
            })
            .await
    }
}

/// A `Profile` of the system.
#[graphql_object(context = Context)]
impl Profile {
    /// Unique identifier of this `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Name of this `Profile`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn name(&self, ctx: &Context) -> Result<Name, Error> {
        Ok(self.profile(ctx).await?.name.clone().into())
    }

    /// Email of this `Profile`.
    ///
    /// Visible to the `Profile` owner himself and to administrators only.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn email(&self, ctx: &Context) -> Result<Option<Email>, Error> {
        let my_id = ctx.try_current_session().await?.map(|s| s.profile_id);

        let is_current = Some(self.id) == my_id;
        let is_admin = if is_current {
            false
        } else if let Some(my_id) = my_id {
            *ctx.service()
                .execute(query::access::IsAdmin(my_id.into()))
                .await
                .map_err(AsError::into_error)
                .map_err(ctx.error())?
        } else {
            false
        };

        Ok(if is_current || is_admin {
            Some(self.profile(ctx).await?.email.clone().into())
        } else {
            None
        })
    }

    /// Indicator whether this `Profile` has administrative privileges.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.isAdmin",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn is_admin(&self, ctx: &Context) -> Result<bool, Error> {
        ctx.service()
            .execute(query::access::IsAdmin(self.id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(|granted| *granted)
    }

    /// `DateTime` when this `Profile` was created.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Profile.createdAt",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn created_at(&self, ctx: &Context) -> Result<DateTime, Error> {
        Ok(self.profile(ctx).await?.created_at.coerce())
    }
}

/// Unique identifier of a `Profile`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::profile::Id)]
#[into(domain::profile::Id)]
#[graphql(name = "ProfileId", transparent)]
pub struct Id(Uuid);

/// Name of a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileName",
    with = scalar::Via::<domain::profile::Name>,
)]
pub struct Name(domain::profile::Name);

/// Email of a `Profile`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfileEmail",
    with = scalar::Via::<domain::profile::Email>,
)]
pub struct Email(domain::profile::Email);

/// Password of a `Profile`.
#[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "ProfilePassword",
    with = scalar::Via::<domain::profile::Password>,
)]
pub struct Password(domain::profile::Password);

pub mod session {
    //! [`Session`]-related definitions.
    //!
    //! [`Session`]: crate::Session

    use common::DateTime;
    use derive_more::{AsRef, From, Into};
    use juniper::{GraphQLObject, GraphQLScalar};
    use service::{command, domain};

    use crate::{
        api::{self, scalar},
        Context,
    };

    /// `Session` access token.
    #[derive(AsRef, Clone, Debug, From, GraphQLScalar, Into)]
    #[graphql(
        name = "ProfileAuthToken",
        with = scalar::Via::<domain::profile::session::Token>,
    )]
    pub struct Token(domain::profile::session::Token);

    /// Result of a `Session` creation.
    #[derive(Clone, Debug, From, GraphQLObject)]
    #[graphql(context = Context, name = "CreateSessionResult")]
    pub struct CreateResult {
        /// Access token of the created `Session`.
        pub token: Token,

        /// `Profile` associated with the created `Session`.
        pub profile: api::Profile,

        /// `DateTime` when the created `Session` expires.
        pub expires_at: DateTime,
    }

    impl From<command::create_profile_session::Output> for CreateResult {
        fn from(output: command::create_profile_session::Output) -> Self {
            let command::create_profile_session::Output {
                token,
                profile,
                expires_at,
            } = output;
            Self {
                token: token.into(),
                profile: profile.into(),
                expires_at: expires_at.coerce(),
            }
        }
    }
}

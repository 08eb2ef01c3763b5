//! GraphQL [`Subscription`]s definitions.

use common::DateTime;
use futures::{
    stream::{self, BoxStream},
    FutureExt as _, StreamExt as _,
};
use juniper::graphql_subscription;
use service::{query, Query as _};
use tokio::sync::broadcast;

use crate::{api, context, AsError, Context, Error};

/// Root of all GraphQL subscription.
#[derive(Clone, Copy, Debug)]
pub struct Subscription;

#[graphql_subscription(context = Context)]
impl Subscription {
    /// Subscription streaming every `Listing` change as it happens.
    ///
    /// Slow consumers may miss events: the underlying channel is bounded, and
    /// lagged events are silently skipped.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `NOT_ADMIN` - the current `Profile` is not an administrator.
    pub async fn listing_events(
        &self,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<api::listing::Event, Error>>, Error>
    {
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

        let rx = ctx.service().events().subscribe();
        Ok(stream::unfold(rx, |mut rx| async move {
            loop {
                return match rx.recv().await {
                    Ok(event) => Some((Ok(event.into()), rx)),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => None,
                };
            }
        })
        .boxed())
    }

    /// Subscription waiting for the current authenticated session to expire.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `AUTHORIZATION_REQUIRED` - if the current session is not
    ///                              authenticated or session expired.
    pub async fn wait_session(
        &self,
        ctx: &Context,
    ) -> Result<BoxStream<'static, Result<bool, Error>>, Error> {
        let session = ctx.current_session().await?;
        let timeout = session.expires_at - DateTime::now();
        Ok(stream::once(
            tokio::time::sleep(timeout).map(|()| {
                Err(context::AuthError::AuthorizationRequired.into())
            }),
        )
        .boxed())
    }
}

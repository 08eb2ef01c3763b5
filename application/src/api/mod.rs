//! GraphQL API definitions.

pub mod listing;
mod mutation;
pub mod profile;
mod query;
pub mod scalar;
pub mod stats;
mod subscription;

use crate::{define_error, AsError, Error};

pub use self::{
    listing::Listing, mutation::Mutation, profile::Profile, query::Query,
    stats::Stats, subscription::Subscription,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

define_error! {
    enum PrivilegeError {
        #[code = "NOT_ADMIN"]
        #[status = FORBIDDEN]
        #[message = "Authenticated `Profile` must be an administrator"]
        Admin,
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGE_NUMBER"]
        #[status = BAD_REQUEST]
        #[message = "Page number must be positive"]
        InvalidNumber,
    }
}

define_error! {
    enum FilterError {
        #[code = "INVALID_FILTER_BOUND"]
        #[status = BAD_REQUEST]
        #[message = "Numeric filter bounds must be non-negative"]
        NegativeBound,
    }
}

impl AsError for service::query::access::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::ProfileNotExists(_) => Some(PrivilegeError::Admin.into()),
        }
    }
}

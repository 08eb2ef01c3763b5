//! [`Command`] for creating a [`Session`].

use std::time::Duration;

use common::{
    operations::{By, Select},
    DateTime,
};
use derive_more::{Display, Error, From};
use secrecy::{ExposeSecret, SecretBox};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::profile::{session::Token, Email, Password};
use crate::{
    domain::{
        profile::{self, session, Session},
        Profile,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a [`Session`].
#[derive(Clone, Debug, From)]
pub enum CreateProfileSession {
    /// Create a new [`Session`] by [`Profile`] credentials.
    ByCredentials {
        /// [`Email`] of a [`Profile`].
        email: profile::Email,

        /// [`Password`] of a [`Profile`].
        password: SecretBox<profile::Password>,
    },

    /// Create a new [`Session`] by [`Profile`] ID.
    ByProfileId(profile::Id),
}

impl CreateProfileSession {
    /// [`Duration`] of [`Session`] expiration.
    const EXPIRATION_DURATION: Duration = Duration::from_secs(30 * 60);
}

/// Output of [`CreateProfileSession`] [`Command`].
#[derive(Clone, Debug)]
pub struct Output {
    /// [`Token`] of the created [`Session`].
    pub token: session::Token,

    /// [`Profile`] whose [`Session`] has been created.
    pub profile: Profile,

    /// [`DateTime`] when the [`Session`] expires.
    pub expires_at: session::ExpirationDateTime,
}

impl<Db> Command<CreateProfileSession> for Service<Db>
where
    Db: Database<
            Select<By<Option<Profile>, profile::Id>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + for<'e> Database<
            Select<By<Option<Profile>, &'e profile::Email>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProfileSession,
    ) -> Result<Self::Ok, Self::Err> {
        use CreateProfileSession as Cmd;
        use ExecutionError as E;

        let profile = match cmd {
            Cmd::ByCredentials { email, password } => {
                let profile = self
                    .database()
                    .execute(Select(By::new(&email)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))?
                    .ok_or_else(|| E::WrongCredentials)
                    .map_err(tracerr::wrap!())?;

                let hash = profile::PasswordHash::new(password.expose_secret());
                if profile.password_hash != hash {
                    return Err(tracerr::new!(E::WrongCredentials));
                }

                profile
            }
            Cmd::ByProfileId(profile_id) => self
                .database()
                .execute(Select(By::new(profile_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or_else(|| E::ProfileNotExists(profile_id))
                .map_err(tracerr::wrap!())?,
        };

        let expires_at = (DateTime::now() + Cmd::EXPIRATION_DURATION).coerce();
        let token = jsonwebtoken::encode::<Session>(
            &jsonwebtoken::Header::default(),
            &Session {
                profile_id: profile.id,
                email: profile.email.clone(),
                expires_at,
            },
            &self.config().jwt_encoding_key,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        // SAFETY: `jsonwebtoken::encode` always returns a valid
        //         `session::Token`.
        #[expect(unsafe_code, reason = "invariants are preserved")]
        let token = unsafe { session::Token::new_unchecked(token) };

        Ok(Output {
            token,
            profile,
            expires_at,
        })
    }
}

/// Error of [`CreateProfileSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`jsonwebtoken`] encoding error.
    #[display("Failed to encode a JSON Web Token: {_0}")]
    JsonWebTokenEncodeError(jsonwebtoken::errors::Error),

    /// [`Profile`] with the provided ID does not exist.
    #[display("`Profile(id: {_0})` does not exist")]
    #[from(ignore)]
    ProfileNotExists(#[error(not(source))] profile::Id),

    /// [`CreateProfileSession::ByCredentials`] contains wrong credentials.
    #[display("Wrong `Profile` credentials")]
    WrongCredentials,
}

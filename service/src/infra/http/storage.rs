//! Object storage HTTP client.

use derive_more::{Debug, Display, Error, From};
use secrecy::{ExposeSecret as _, SecretString};
use tracerr::Traced;

/// Configuration of a [`Storage`] client.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the object storage API.
    pub base_url: String,

    /// Bucket holding listing images.
    pub bucket: String,

    /// API key authorizing bucket mutations.
    #[debug(skip)]
    pub api_key: SecretString,
}

/// Object storage HTTP client removing orphaned listing images.
#[derive(Clone, Debug)]
pub struct Storage {
    /// [`Config`] of this [`Storage`] client.
    config: Config,

    /// Underlying HTTP client.
    http: reqwest::Client,
}

impl Storage {
    /// Creates a new [`Storage`] client with the provided [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Deletes the object at the provided `path` from the configured bucket.
    ///
    /// A missing object is not an error: the outcome is the same.
    ///
    /// # Errors
    ///
    /// If the storage API request fails or reports a non-404 error status.
    pub async fn delete_object(
        &self,
        path: &str,
    ) -> Result<(), Traced<Error>> {
        let url = format!(
            "{base}/object/{bucket}/{path}",
            base = self.config.base_url.trim_end_matches('/'),
            bucket = self.config.bucket,
        );
        let resp = self
            .http
            .delete(url)
            .bearer_auth(self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(tracerr::from_and_wrap!())?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        resp.error_for_status()
            .map(drop)
            .map_err(tracerr::from_and_wrap!())
    }
}

/// [`Storage`] client error.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// HTTP transport or status error.
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),
}

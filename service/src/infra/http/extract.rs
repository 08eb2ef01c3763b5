//! Listing draft extraction HTTP client.

use derive_more::{Debug, Display, Error, From};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use tracerr::Traced;

/// Configuration of an [`Extractor`] client.
#[derive(Clone, Debug)]
pub struct Config {
    /// URL of the chat completions endpoint.
    pub endpoint: String,

    /// API key authorizing completion requests.
    #[debug(skip)]
    pub api_key: SecretString,

    /// Model to request completions from.
    pub model: String,
}

/// HTTP client turning a free-form property description into structured
/// listing draft fields via a completions API.
#[derive(Clone, Debug)]
pub struct Extractor {
    /// [`Config`] of this [`Extractor`] client.
    config: Config,

    /// Underlying HTTP client.
    http: reqwest::Client,
}

impl Extractor {
    /// Instruction prompting the model to answer with a bare JSON object.
    const PROMPT: &'static str = "\
        Extract property listing fields from the user's text. \
        Respond with a single JSON object using these keys (omit a key when \
        the text gives no value for it): \
        title, description, property_kind (house|land|apartment), \
        transaction_kind (sale|rent), land_area (integer, square meters), \
        building_area (integer, square meters), bedrooms (integer), \
        bathrooms (integer), province, city, district, price (string).";

    /// Creates a new [`Extractor`] client with the provided [`Config`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Extracts [`Draft`] fields from the provided free-form `text`.
    ///
    /// # Errors
    ///
    /// If the completions API request fails, or its response doesn't carry a
    /// parsable JSON object.
    pub async fn extract(&self, text: &str) -> Result<Draft, Traced<Error>> {
        let body = serde_json::json!({
            "model": self.config.model,
            "response_format": {"type": "json_object"},
            "messages": [
                {"role": "system", "content": Self::PROMPT},
                {"role": "user", "content": text},
            ],
        });

        let resp = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(tracerr::from_and_wrap!())?
            .error_for_status()
            .map_err(tracerr::from_and_wrap!())?
            .json::<serde_json::Value>()
            .await
            .map_err(tracerr::from_and_wrap!())?;

        let content = resp
            .pointer("/choices/0/message/content")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| tracerr::new!(Error::MalformedResponse))?;

        serde_json::from_str(content).map_err(tracerr::from_and_wrap!())
    }
}

/// Raw draft fields extracted from a free-form property description.
///
/// Deliberately stringly-typed: mapping onto domain types (and dropping
/// whatever doesn't parse) is the caller's concern.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Draft {
    /// Suggested listing title.
    pub title: Option<String>,

    /// Cleaned-up description.
    pub description: Option<String>,

    /// Property kind name.
    pub property_kind: Option<String>,

    /// Transaction kind name.
    pub transaction_kind: Option<String>,

    /// Land area in square meters.
    pub land_area: Option<u32>,

    /// Building area in square meters.
    pub building_area: Option<u32>,

    /// Number of bedrooms.
    pub bedrooms: Option<u16>,

    /// Number of bathrooms.
    pub bathrooms: Option<u16>,

    /// Province name.
    pub province: Option<String>,

    /// City name.
    pub city: Option<String>,

    /// District name.
    pub district: Option<String>,

    /// Price, as the model phrased it.
    pub price: Option<String>,
}

/// [`Extractor`] client error.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// HTTP transport or status error.
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),

    /// Completion content is not a valid JSON object.
    #[display("Failed to parse completion content: {_0}")]
    Json(serde_json::Error),

    /// Completion response doesn't carry any content.
    #[display("Completion response carries no content")]
    MalformedResponse,
}

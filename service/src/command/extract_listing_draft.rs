//! [`Command`] for extracting a [`Listing`] draft from free-form text.

use common::Price;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Listing;
use crate::{
    domain::listing,
    infra::http::extract,
    Service,
};

use super::Command;

/// [`Command`] for extracting a pre-filled [`Listing`] draft from a
/// free-form property description.
#[derive(Clone, Debug)]
pub struct ExtractListingDraft {
    /// Free-form text to extract the draft from.
    pub text: String,
}

/// Output of [`ExtractListingDraft`] [`Command`]: whatever fields could be
/// both extracted and parsed into domain types.
#[derive(Clone, Debug, Default)]
pub struct Output {
    /// Suggested [`listing::Title`].
    pub title: Option<listing::Title>,

    /// Cleaned-up [`listing::Description`].
    pub description: Option<listing::Description>,

    /// Recognized [`listing::PropertyKind`].
    pub property_kind: Option<listing::PropertyKind>,

    /// Recognized [`listing::TransactionKind`].
    pub transaction_kind: Option<listing::TransactionKind>,

    /// Land area in square meters.
    pub land_area: Option<listing::Area>,

    /// Building area in square meters.
    pub building_area: Option<listing::Area>,

    /// Number of bedrooms.
    pub bedrooms: Option<listing::Rooms>,

    /// Number of bathrooms.
    pub bathrooms: Option<listing::Rooms>,

    /// [`listing::Province`] mentioned in the text.
    pub province: Option<listing::Province>,

    /// [`listing::City`] mentioned in the text.
    pub city: Option<listing::City>,

    /// [`listing::District`] mentioned in the text.
    pub district: Option<listing::District>,

    /// Extracted [`Price`].
    pub price: Option<Price>,
}

impl<Db> Command<ExtractListingDraft> for Service<Db> {
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ExtractListingDraft,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ExtractListingDraft { text } = cmd;

        let draft = self
            .extractor()
            .extract(&text)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Output {
            title: draft
                .title
                .and_then(|t| listing::Title::new(t.trim().to_owned()))
                .filter(|t| !t.is_tombstone()),
            description: draft
                .description
                .and_then(listing::Description::new),
            property_kind: draft
                .property_kind
                .as_deref()
                .and_then(parse_property_kind),
            transaction_kind: draft
                .transaction_kind
                .as_deref()
                .and_then(parse_transaction_kind),
            land_area: draft.land_area,
            building_area: draft.building_area,
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            province: draft
                .province
                .and_then(|p| listing::Province::new(p.trim().to_owned())),
            city: draft
                .city
                .and_then(|c| listing::City::new(c.trim().to_owned())),
            district: draft
                .district
                .and_then(|d| listing::District::new(d.trim().to_owned())),
            price: draft.price.as_deref().and_then(Price::parse_lenient),
        })
    }
}

/// Recognizes a [`listing::PropertyKind`] in the provided free-form `name`,
/// accepting both English and Indonesian spellings.
fn parse_property_kind(name: &str) -> Option<listing::PropertyKind> {
    use listing::PropertyKind as K;

    match name.trim().to_lowercase().as_str() {
        "house" | "rumah" => Some(K::House),
        "land" | "kavling" | "tanah" => Some(K::Land),
        "apartment" | "apartemen" => Some(K::Apartment),
        _ => None,
    }
}

/// Recognizes a [`listing::TransactionKind`] in the provided free-form
/// `name`, accepting both English and Indonesian spellings.
fn parse_transaction_kind(name: &str) -> Option<listing::TransactionKind> {
    use listing::TransactionKind as K;

    match name.trim().to_lowercase().as_str() {
        "sale" | "sell" | "jual" => Some(K::Sale),
        "rent" | "sewa" => Some(K::Rent),
        _ => None,
    }
}

/// Error of [`ExtractListingDraft`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Extractor`] client error.
    ///
    /// [`Extractor`]: crate::infra::http::Extractor
    #[display("Draft extraction failed: {_0}")]
    Extraction(extract::Error),
}

#[cfg(test)]
mod spec {
    use super::{parse_property_kind, parse_transaction_kind};
    use crate::domain::listing::{PropertyKind, TransactionKind};

    #[test]
    fn recognizes_kind_spellings() {
        assert_eq!(parse_property_kind("Rumah"), Some(PropertyKind::House));
        assert_eq!(parse_property_kind("land"), Some(PropertyKind::Land));
        assert_eq!(
            parse_property_kind(" apartemen "),
            Some(PropertyKind::Apartment),
        );
        assert_eq!(parse_property_kind("castle"), None);

        assert_eq!(
            parse_transaction_kind("JUAL"),
            Some(TransactionKind::Sale),
        );
        assert_eq!(parse_transaction_kind("rent"), Some(TransactionKind::Rent));
        assert_eq!(parse_transaction_kind("lease"), None);
    }
}

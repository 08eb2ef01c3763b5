//! [`Listing`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Price};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profile;

/// Property listing offered for sale or rent.
#[derive(Clone, Debug)]
pub struct Listing {
    /// ID of this [`Listing`].
    pub id: Id,

    /// [`Title`] of this [`Listing`].
    ///
    /// A tombstone [`Title`] marks this [`Listing`] as soft-deleted.
    pub title: Title,

    /// [`Description`] of this [`Listing`].
    pub description: Description,

    /// [`PropertyKind`] of this [`Listing`].
    pub property_kind: PropertyKind,

    /// [`TransactionKind`] of this [`Listing`].
    pub transaction_kind: TransactionKind,

    /// Land area of this [`Listing`] in square meters.
    pub land_area: Option<Area>,

    /// Building area of this [`Listing`] in square meters.
    ///
    /// Meaningless for [`PropertyKind::Land`].
    pub building_area: Option<Area>,

    /// Number of bedrooms in this [`Listing`].
    ///
    /// Meaningless for [`PropertyKind::Land`].
    pub bedrooms: Option<Rooms>,

    /// Number of bathrooms in this [`Listing`].
    ///
    /// Meaningless for [`PropertyKind::Land`].
    pub bathrooms: Option<Rooms>,

    /// [`Province`] this [`Listing`] is located in.
    pub province: Province,

    /// [`City`] this [`Listing`] is located in.
    pub city: City,

    /// [`District`] this [`Listing`] is located in.
    pub district: District,

    /// [`Price`] of this [`Listing`], if one was provided and parsable.
    pub price: Option<Price>,

    /// ID of the [`Profile`] owning this [`Listing`].
    ///
    /// [`Profile`]: crate::domain::Profile
    pub owner_id: profile::Id,

    /// Display name of the owner, snapshotted at creation time.
    ///
    /// Deliberately not reconciled with the live [`Profile`] on rename.
    ///
    /// [`Profile`]: crate::domain::Profile
    pub owner_name: profile::Name,

    /// [`ImageUrl`] of this [`Listing`], if any.
    pub image_url: Option<ImageUrl>,

    /// [`DateTime`] when this [`Listing`] was created.
    pub created_at: CreationDateTime,
}

impl Listing {
    /// Indicates whether this [`Listing`] is soft-deleted.
    #[must_use]
    pub fn is_tombstoned(&self) -> bool {
        self.title.is_tombstone()
    }
}

/// ID of a [`Listing`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Title of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Title(String);

impl Title {
    /// Sentinel value marking a soft-deleted [`Listing`].
    const TOMBSTONE: &'static str = "DELETED";

    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Creates the tombstone [`Title`] marking a [`Listing`] as
    /// soft-deleted.
    #[must_use]
    pub fn tombstone() -> Self {
        Self(Self::TOMBSTONE.to_owned())
    }

    /// Indicates whether this [`Title`] is the soft-delete tombstone.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        self.0.trim() == Self::TOMBSTONE
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 512
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Description of a [`Listing`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Description(String);

impl Description {
    /// Creates a new [`Description`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Description`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Description`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.len() <= 16384
    }
}

impl FromStr for Description {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Description`")
    }
}

define_kind! {
    #[doc = "Kind of a property in a [`Listing`]."]
    enum PropertyKind {
        #[doc = "A house (\"Rumah\")."]
        House = 1,

        #[doc = "A plot of land (\"Kavling\")."]
        Land = 2,

        #[doc = "An apartment (\"Apartemen\")."]
        Apartment = 3,
    }
}

define_kind! {
    #[doc = "Kind of a transaction a [`Listing`] is offered for."]
    enum TransactionKind {
        #[doc = "A sale (\"Jual\")."]
        Sale = 1,

        #[doc = "A rent (\"Sewa\")."]
        Rent = 2,
    }
}

/// Area of a [`Listing`] in square meters.
pub type Area = u32;

/// Number of rooms of some kind in a [`Listing`].
pub type Rooms = u16;

/// Province a [`Listing`] is located in.
///
/// Free text, not a validated taxonomy: any trimmed, non-empty value is
/// accepted at write time.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct Province(String);

impl Province {
    /// Creates a new [`Province`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `province` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(province: impl Into<String>) -> Self {
        Self(province.into())
    }

    /// Creates a new [`Province`] if the given `province` is valid.
    #[must_use]
    pub fn new(province: impl Into<String>) -> Option<Self> {
        let province = province.into();
        Self::check(&province).then_some(Self(province))
    }

    /// Checks whether the given `province` is a valid [`Province`].
    fn check(province: impl AsRef<str>) -> bool {
        let province = province.as_ref();
        province.trim() == province
            && !province.is_empty()
            && province.len() <= 512
    }
}

impl FromStr for Province {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Province`")
    }
}

/// City a [`Listing`] is located in.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct City(String);

impl City {
    /// Creates a new [`City`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `city` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(city: impl Into<String>) -> Self {
        Self(city.into())
    }

    /// Creates a new [`City`] if the given `city` is valid.
    #[must_use]
    pub fn new(city: impl Into<String>) -> Option<Self> {
        let city = city.into();
        Self::check(&city).then_some(Self(city))
    }

    /// Checks whether the given `city` is a valid [`City`].
    fn check(city: impl AsRef<str>) -> bool {
        let city = city.as_ref();
        city.trim() == city && !city.is_empty() && city.len() <= 512
    }
}

impl FromStr for City {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `City`")
    }
}

/// District a [`Listing`] is located in.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct District(String);

impl District {
    /// Creates a new [`District`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `district` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(district: impl Into<String>) -> Self {
        Self(district.into())
    }

    /// Creates a new [`District`] if the given `district` is valid.
    #[must_use]
    pub fn new(district: impl Into<String>) -> Option<Self> {
        let district = district.into();
        Self::check(&district).then_some(Self(district))
    }

    /// Checks whether the given `district` is a valid [`District`].
    fn check(district: impl AsRef<str>) -> bool {
        let district = district.as_ref();
        district.trim() == district
            && !district.is_empty()
            && district.len() <= 512
    }
}

impl FromStr for District {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `District`")
    }
}

/// URL of a [`Listing`] image in the object storage.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[as_ref(forward)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Creates a new [`ImageUrl`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `url` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Creates a new [`ImageUrl`] if the given `url` is valid.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Option<Self> {
        let url = url.into();
        Self::check(&url).then_some(Self(url))
    }

    /// Returns the object storage path of this [`ImageUrl`]: everything
    /// after the last `/` segment separator preceding the object name is
    /// left intact, only the scheme-and-host prefix is dropped.
    #[must_use]
    pub fn storage_path(&self) -> &str {
        self.0
            .split_once("//")
            .and_then(|(_, rest)| rest.split_once('/'))
            .map_or(self.0.as_str(), |(_, path)| path)
    }

    /// Checks whether the given `url` is a valid [`ImageUrl`].
    fn check(url: impl AsRef<str>) -> bool {
        let url = url.as_ref();
        url.trim() == url && !url.is_empty() && url.len() <= 2048
    }
}

impl FromStr for ImageUrl {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `ImageUrl`")
    }
}

/// [`DateTime`] when a [`Listing`] was created.
pub type CreationDateTime = DateTimeOf<(Listing, unit::Creation)>;

#[cfg(test)]
mod spec {
    use super::Title;

    #[test]
    fn tombstone_detection_trims_whitespace() {
        assert!(Title::tombstone().is_tombstone());
        assert!(Title::new("DELETED").unwrap().is_tombstone());
        // Whitespace-padded values are rejected by `Title::new`, but may
        // arrive from older rows.
        #[expect(unsafe_code, reason = "simulates a legacy row")]
        let padded = unsafe { Title::new_unchecked(" DELETED ") };
        assert!(padded.is_tombstone());
    }

    #[test]
    fn ordinary_titles_are_not_tombstones() {
        assert!(!Title::new("Rumah Mewah 2 Lantai").unwrap().is_tombstone());
        assert!(!Title::new("deleted house").unwrap().is_tombstone());
    }

    #[test]
    fn title_rejects_untrimmed_or_empty() {
        assert!(Title::new("").is_none());
        assert!(Title::new(" Rumah").is_none());
        assert!(Title::new("Rumah ").is_none());
    }
}

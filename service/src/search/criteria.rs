//! [`Criteria`] of a listing search.

use common::Price;

use crate::domain::listing::{
    Area, City, District, PropertyKind, Province, Rooms, TransactionKind,
};

/// Filter criteria of a listing search.
///
/// Every [`None`] means "All"/unbounded: the default value passes every
/// non-tombstoned listing through unchanged.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Criteria {
    /// Term matched case-insensitively against a listing title or city.
    pub search: Option<String>,

    /// [`PropertyKind`] to restrict listings to.
    pub property_kind: Option<PropertyKind>,

    /// [`TransactionKind`] to restrict listings to.
    pub transaction_kind: Option<TransactionKind>,

    /// [`Province`] to restrict listings to.
    pub province: Option<Province>,

    /// [`City`] to restrict listings to.
    ///
    /// Kept consistent with the selected [`Province`] by
    /// [`cascade::city_options()`].
    ///
    /// [`cascade::city_options()`]: crate::search::cascade::city_options
    pub city: Option<City>,

    /// [`District`] to restrict listings to.
    pub district: Option<District>,

    /// Inclusive lower [`Price`] bound.
    pub price_min: Option<Price>,

    /// Inclusive upper [`Price`] bound.
    pub price_max: Option<Price>,

    /// Inclusive lower land area bound.
    pub land_area_min: Option<Area>,

    /// Inclusive upper land area bound.
    pub land_area_max: Option<Area>,

    /// Inclusive lower building area bound.
    ///
    /// Vacuously satisfied by [`PropertyKind::Land`] listings.
    pub building_area_min: Option<Area>,

    /// Inclusive upper building area bound.
    ///
    /// Vacuously satisfied by [`PropertyKind::Land`] listings.
    pub building_area_max: Option<Area>,

    /// Exact number of bedrooms to restrict listings to.
    ///
    /// Vacuously satisfied by [`PropertyKind::Land`] listings.
    pub bedrooms: Option<Rooms>,

    /// Exact number of bathrooms to restrict listings to.
    ///
    /// Vacuously satisfied by [`PropertyKind::Land`] listings.
    pub bathrooms: Option<Rooms>,
}

/// Two-phase edit state of a [`Criteria`].
///
/// Edits land in the staged copy and only take effect on [`apply()`];
/// [`reset()`] restores both copies to the default atomically.
///
/// [`apply()`]: Draft::apply
/// [`reset()`]: Draft::reset
#[derive(Clone, Debug, Default)]
pub struct Draft {
    /// Staged [`Criteria`] being edited.
    staged: Criteria,

    /// [`Criteria`] currently in effect.
    active: Criteria,
}

impl Draft {
    /// Returns the staged [`Criteria`] for editing.
    pub fn staged_mut(&mut self) -> &mut Criteria {
        &mut self.staged
    }

    /// Returns the [`Criteria`] currently in effect.
    #[must_use]
    pub fn active(&self) -> &Criteria {
        &self.active
    }

    /// Puts the staged [`Criteria`] into effect.
    pub fn apply(&mut self) {
        self.active = self.staged.clone();
    }

    /// Restores both the staged and the active [`Criteria`] to the default
    /// in one step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::listing::PropertyKind;

    use super::{Criteria, Draft};

    #[test]
    fn edits_take_effect_on_apply_only() {
        let mut draft = Draft::default();

        draft.staged_mut().search = Some("villa".to_owned());
        draft.staged_mut().property_kind = Some(PropertyKind::House);
        assert_eq!(draft.active(), &Criteria::default());

        draft.apply();
        assert_eq!(draft.active().search.as_deref(), Some("villa"));
        assert_eq!(draft.active().property_kind, Some(PropertyKind::House));
    }

    #[test]
    fn reset_restores_both_copies() {
        let mut draft = Draft::default();

        draft.staged_mut().search = Some("villa".to_owned());
        draft.apply();
        draft.staged_mut().search = Some("kavling".to_owned());

        draft.reset();
        assert_eq!(draft.active(), &Criteria::default());
        draft.apply();
        assert_eq!(draft.active(), &Criteria::default());
    }
}

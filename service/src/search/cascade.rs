//! Dependent location option derivation.
//!
//! Feeds the province → city → district dropdown cascade: each level only
//! offers values consistent with the ancestors selected so far. This feeds
//! the UI, not the filter predicate itself.

use crate::domain::{
    listing::{City, District, Province},
    Listing,
};

/// Returns the distinct [`Province`]s among the non-tombstoned `listings`,
/// in first-occurrence order.
#[must_use]
pub fn province_options(listings: &[Listing]) -> Vec<Province> {
    let mut out = Vec::new();
    for l in listings.iter().filter(|l| !l.is_tombstoned()) {
        if !out.contains(&l.province) {
            out.push(l.province.clone());
        }
    }
    out
}

/// Returns the distinct [`City`] options consistent with the selected
/// `province` ([`None`] meaning no restriction), in first-occurrence order.
#[must_use]
pub fn city_options(
    listings: &[Listing],
    province: Option<&Province>,
) -> Vec<City> {
    let mut out = Vec::new();
    for l in listings.iter().filter(|l| {
        !l.is_tombstoned() && province.is_none_or(|p| &l.province == p)
    }) {
        if !out.contains(&l.city) {
            out.push(l.city.clone());
        }
    }
    out
}

/// Returns the distinct [`District`] options consistent with the selected
/// `province` and `city`, independently handling all four selection
/// combinations, in first-occurrence order.
#[must_use]
pub fn district_options(
    listings: &[Listing],
    province: Option<&Province>,
    city: Option<&City>,
) -> Vec<District> {
    let mut out = Vec::new();
    for l in listings.iter().filter(|l| {
        !l.is_tombstoned()
            && province.is_none_or(|p| &l.province == p)
            && city.is_none_or(|c| &l.city == c)
    }) {
        if !out.contains(&l.district) {
            out.push(l.district.clone());
        }
    }
    out
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            listing::{City, District, Province, Title},
            Listing,
        },
        search::fixture::listing,
    };

    use super::{city_options, district_options, province_options};

    fn located(
        id: u128,
        province: &str,
        city: &str,
        district: &str,
    ) -> Listing {
        let mut l = listing(id, "Listing");
        l.province = Province::new(province).unwrap();
        l.city = City::new(city).unwrap();
        l.district = District::new(district).unwrap();
        l
    }

    fn sample() -> Vec<Listing> {
        vec![
            located(1, "A", "X", "X1"),
            located(2, "A", "Y", "Y1"),
            located(3, "B", "Z", "Z1"),
            located(4, "A", "X", "X2"),
        ]
    }

    fn strs(items: &[impl AsRef<str>]) -> Vec<&str> {
        items.iter().map(AsRef::as_ref).collect()
    }

    #[test]
    fn city_options_follow_the_selected_province() {
        let listings = sample();
        let province = Province::new("A").unwrap();

        assert_eq!(
            strs(&city_options(&listings, Some(&province))),
            ["X", "Y"],
        );
        assert_eq!(strs(&city_options(&listings, None)), ["X", "Y", "Z"]);
    }

    #[test]
    fn district_options_handle_all_selection_combinations() {
        let listings = sample();
        let province = Province::new("A").unwrap();
        let city = City::new("X").unwrap();

        assert_eq!(
            strs(&district_options(&listings, None, None)),
            ["X1", "Y1", "Z1", "X2"],
        );
        assert_eq!(
            strs(&district_options(&listings, Some(&province), None)),
            ["X1", "Y1", "X2"],
        );
        assert_eq!(
            strs(&district_options(&listings, None, Some(&city))),
            ["X1", "X2"],
        );
        assert_eq!(
            strs(&district_options(&listings, Some(&province), Some(&city))),
            ["X1", "X2"],
        );
    }

    #[test]
    fn options_deduplicate_and_skip_tombstones() {
        let mut listings = sample();
        listings.push(located(5, "A", "X", "X1"));
        let mut dead = located(6, "C", "W", "W1");
        dead.title = Title::tombstone();
        listings.push(dead);

        assert_eq!(strs(&province_options(&listings)), ["A", "B"]);
        assert_eq!(strs(&city_options(&listings, None)), ["X", "Y", "Z"]);
    }
}

//! Pure filtering of in-memory [`Listing`] collections.

use common::Price;

use crate::domain::{
    listing::{Area, PropertyKind, Rooms},
    Listing,
};

use super::Criteria;

/// Filters the provided `listings` with the given `criteria`.
///
/// Pure and deterministic: the relative order of matches is preserved, the
/// input is untouched.
#[must_use]
pub fn filter(listings: &[Listing], criteria: &Criteria) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| matches(l, criteria))
        .cloned()
        .collect()
}

/// Checks whether the `listing` passes every predicate of the `criteria`.
///
/// Soft-deleted listings never pass. A bounded numeric predicate excludes a
/// listing whose underlying value is absent, except the building-area and
/// room predicates, which are vacuously satisfied by
/// [`PropertyKind::Land`] listings.
#[must_use]
pub fn matches(listing: &Listing, criteria: &Criteria) -> bool {
    !listing.is_tombstoned()
        && matches_search(listing, criteria.search.as_deref())
        && criteria
            .property_kind
            .is_none_or(|k| listing.property_kind == k)
        && criteria
            .transaction_kind
            .is_none_or(|k| listing.transaction_kind == k)
        && criteria
            .province
            .as_ref()
            .is_none_or(|p| &listing.province == p)
        && criteria.city.as_ref().is_none_or(|c| &listing.city == c)
        && criteria
            .district
            .as_ref()
            .is_none_or(|d| &listing.district == d)
        && in_price_range(
            listing.price,
            criteria.price_min,
            criteria.price_max,
        )
        && in_area_range(
            listing.land_area,
            criteria.land_area_min,
            criteria.land_area_max,
        )
        && (listing.property_kind == PropertyKind::Land
            || in_area_range(
                listing.building_area,
                criteria.building_area_min,
                criteria.building_area_max,
            ))
        && rooms_match(listing, criteria.bedrooms, |l| l.bedrooms)
        && rooms_match(listing, criteria.bathrooms, |l| l.bathrooms)
}

/// Checks the case-insensitive substring predicate against the `listing`
/// title and city.
fn matches_search(listing: &Listing, term: Option<&str>) -> bool {
    let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) else {
        return true;
    };
    let term = term.to_lowercase();

    AsRef::<str>::as_ref(&listing.title).to_lowercase().contains(&term)
        || AsRef::<str>::as_ref(&listing.city).to_lowercase().contains(&term)
}

/// Checks an inclusive [`Price`] range.
///
/// No bounds means no constraint; with any bound set, a listing without a
/// parsable price cannot be in range.
fn in_price_range(
    price: Option<Price>,
    min: Option<Price>,
    max: Option<Price>,
) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(price) = price else {
        return false;
    };
    min.is_none_or(|min| price >= min) && max.is_none_or(|max| price <= max)
}

/// Checks an inclusive [`Area`] range, excluding absent values once any
/// bound is set.
fn in_area_range(
    area: Option<Area>,
    min: Option<Area>,
    max: Option<Area>,
) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(area) = area else {
        return false;
    };
    min.is_none_or(|min| area >= min) && max.is_none_or(|max| area <= max)
}

/// Checks an exact [`Rooms`] predicate, vacuously satisfied by
/// [`PropertyKind::Land`] listings.
fn rooms_match(
    listing: &Listing,
    wanted: Option<Rooms>,
    rooms: impl FnOnce(&Listing) -> Option<Rooms>,
) -> bool {
    if listing.property_kind == PropertyKind::Land {
        return true;
    }
    wanted.is_none_or(|wanted| rooms(listing) == Some(wanted))
}

#[cfg(test)]
mod spec {
    use common::Price;

    use crate::{
        domain::{
            listing::{City, PropertyKind, Province, Title},
            Listing,
        },
        search::fixture::listing,
    };

    use super::{filter, matches, Criteria};

    fn ids(listings: &[Listing]) -> Vec<u128> {
        listings.iter().map(|l| uuid::Uuid::from(l.id).as_u128()).collect()
    }

    fn sample() -> Vec<Listing> {
        let mut tombstoned = listing(3, "DELETED");
        tombstoned.title = Title::tombstone();
        vec![
            listing(1, "Rumah Mewah Bandung"),
            listing(2, "Kavling Strategis"),
            tombstoned,
            listing(4, "Apartemen Pusat Kota"),
        ]
    }

    #[test]
    fn tombstones_never_pass() {
        let listings = sample();

        assert_eq!(ids(&filter(&listings, &Criteria::default())), [1, 2, 4]);

        let mut narrowed = Criteria::default();
        narrowed.search = Some("deleted".to_owned());
        assert_eq!(ids(&filter(&listings, &narrowed)), Vec::<u128>::new());
    }

    #[test]
    fn default_criteria_is_identity_modulo_tombstones() {
        let listings = sample();
        let out = filter(&listings, &Criteria::default());

        assert_eq!(ids(&out), [1, 2, 4]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let listings = sample();
        let mut criteria = Criteria::default();
        criteria.search = Some("a".to_owned());
        criteria.land_area_min = Some(50);

        let once = filter(&listings, &criteria);
        let twice = filter(&once, &criteria);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn narrowing_a_bound_never_grows_the_result() {
        let mut listings = sample();
        listings[0].price = Price::parse_lenient("500000000");
        listings[1].price = Price::parse_lenient("1500000000");

        let mut wide = Criteria::default();
        wide.price_min = Price::parse_lenient("0");
        let mut narrow = wide.clone();
        narrow.price_min = Price::parse_lenient("1000000000");

        assert!(
            filter(&listings, &narrow).len() <= filter(&listings, &wide).len(),
        );
    }

    #[test]
    fn search_matches_title_or_city_case_insensitively() {
        let mut listings = sample();
        listings[1].city = City::new("Surabaya").unwrap();

        let mut criteria = Criteria::default();
        criteria.search = Some("BANDUNG".to_owned());

        // Listing 1 by title, listing 4 by city (fixture default).
        assert_eq!(ids(&filter(&listings, &criteria)), [1, 4]);
    }

    #[test]
    fn price_range_excludes_unparsable_prices() {
        let mut a = listing(1, "Cheap");
        a.price = Price::parse_lenient("500000000");
        let mut b = listing(2, "Mid");
        b.price = Price::parse_lenient("1500000000");
        let mut c = listing(3, "Unknown");
        c.price = Price::parse_lenient("invalid");
        let listings = vec![a, b, c];

        let mut criteria = Criteria::default();
        criteria.price_min = Price::parse_lenient("1000000000");
        criteria.price_max = Price::parse_lenient("2000000000");

        assert_eq!(ids(&filter(&listings, &criteria)), [2]);
    }

    #[test]
    fn land_listings_pass_building_and_room_predicates_vacuously() {
        let mut land = listing(7, "Kavling Murah");
        land.property_kind = PropertyKind::Land;
        land.building_area = None;
        land.bedrooms = None;
        land.bathrooms = None;

        let mut criteria = Criteria::default();
        assert!(matches(&land, &criteria));

        criteria.building_area_min = Some(100);
        criteria.building_area_max = Some(200);
        criteria.bedrooms = Some(3);
        criteria.bathrooms = Some(2);
        assert!(matches(&land, &criteria));

        // The same bounds do exclude a house with absent values.
        let mut house = listing(8, "Rumah Tanpa Data");
        house.building_area = None;
        assert!(!matches(&house, &criteria));
    }

    #[test]
    fn land_area_bound_is_not_vacuous_for_land() {
        let mut land = listing(9, "Kavling");
        land.property_kind = PropertyKind::Land;
        land.land_area = Some(40);

        let mut criteria = Criteria::default();
        criteria.land_area_min = Some(100);
        assert!(!matches(&land, &criteria));

        criteria.land_area_min = Some(30);
        assert!(matches(&land, &criteria));
    }

    #[test]
    fn location_predicates_compare_exactly() {
        let listings = sample();

        let mut criteria = Criteria::default();
        criteria.province = Province::new("Jawa Timur");
        assert_eq!(ids(&filter(&listings, &criteria)), Vec::<u128>::new());

        criteria.province = Province::new("Jawa Barat");
        assert_eq!(ids(&filter(&listings, &criteria)), [1, 2, 4]);
    }
}

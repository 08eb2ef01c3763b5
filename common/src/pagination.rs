//! Abstractions for page-number pagination.
//!
//! A [`Page`] is a window over an already materialized (and usually already
//! filtered) collection. The requested page number is clamped into the valid
//! range, so a collection shrinking underneath a paginated view can never
//! leave the view pointing past the end.

use std::num::NonZeroUsize;

use derive_more::{Display, Error};

/// Number of items on a single [`Page`].
///
/// A zero page size is unrepresentable, which resolves the otherwise
/// undefined `page size <= 0` case.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// [`PageSize`] used by listing views.
    pub const DEFAULT: Self = match NonZeroUsize::new(30) {
        Some(n) => Self(n),
        None => unreachable!(),
    };

    /// Creates a new [`PageSize`], if the given `size` is positive.
    #[must_use]
    pub fn new(size: usize) -> Option<Self> {
        NonZeroUsize::new(size).map(Self)
    }

    /// Returns this [`PageSize`] as a [`usize`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// 1-based number of a [`Page`].
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PageNumber(usize);

impl PageNumber {
    /// The first [`PageNumber`].
    pub const FIRST: Self = Self(1);

    /// Creates a new [`PageNumber`], if the given `number` is positive.
    #[must_use]
    pub fn new(number: usize) -> Option<Self> {
        (number >= 1).then_some(Self(number))
    }

    /// Returns this [`PageNumber`] as a [`usize`].
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<i32> for PageNumber {
    type Error = InvalidPageNumber;

    fn try_from(number: i32) -> Result<Self, Self::Error> {
        usize::try_from(number)
            .ok()
            .and_then(Self::new)
            .ok_or(InvalidPageNumber)
    }
}

/// Error of creating a [`PageNumber`] from a non-positive number.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`PageNumber` must be positive")]
pub struct InvalidPageNumber;

/// Single page of `I` items.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<I> {
    /// Items of this [`Page`].
    pub items: Vec<I>,

    /// Number of this [`Page`].
    ///
    /// May be lower than the requested one: it's clamped into
    /// `1..=total_pages`.
    pub number: PageNumber,

    /// Total number of [`Page`]s in the paginated collection.
    ///
    /// At least `1`, even for an empty collection.
    pub total_pages: usize,

    /// Total number of items in the paginated collection.
    pub total_items: usize,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] windowing the provided `items`.
    ///
    /// The `requested` [`PageNumber`] is clamped into the valid range, so
    /// `number` of the returned [`Page`] is always `1 <= number <=
    /// max(1, ceil(items.len() / size))`.
    #[must_use]
    pub fn new(
        items: impl IntoIterator<Item = I>,
        size: PageSize,
        requested: PageNumber,
    ) -> Self {
        let items = items.into_iter().collect::<Vec<_>>();
        let total_items = items.len();
        let total_pages = total_items.div_ceil(size.get()).max(1);

        let number = PageNumber(requested.get().min(total_pages));
        let offset = (number.get() - 1) * size.get();

        Self {
            items: items
                .into_iter()
                .skip(offset)
                .take(size.get())
                .collect(),
            number,
            total_pages,
            total_items,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Page, PageNumber, PageSize};

    fn size(n: usize) -> PageSize {
        PageSize::new(n).unwrap()
    }

    fn page(n: usize) -> PageNumber {
        PageNumber::new(n).unwrap()
    }

    #[test]
    fn empty_collection_is_a_single_empty_page() {
        let p = Page::<u8>::new([], size(30), page(1));

        assert_eq!(p.items, Vec::<u8>::new());
        assert_eq!(p.number, page(1));
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.total_items, 0);
    }

    #[test]
    fn clamps_page_number_when_collection_shrinks() {
        // 45 items over pages of 30 gives 2 pages, so a stale request for
        // page 5 must land on page 2.
        let p = Page::new(0..45, size(30), page(5));

        assert_eq!(p.number, page(2));
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.items, (30..45).collect::<Vec<_>>());
    }

    #[test]
    fn windows_in_source_order() {
        let p = Page::new(0..100, size(30), page(2));

        assert_eq!(p.items, (30..60).collect::<Vec<_>>());
        assert_eq!(p.total_pages, 4);
        assert_eq!(p.total_items, 100);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        let p = Page::new(0..60, size(30), page(3));

        assert_eq!(p.total_pages, 2);
        assert_eq!(p.number, page(2));
    }

    #[test]
    fn rejects_non_positive_numbers() {
        assert!(PageSize::new(0).is_none());
        assert!(PageNumber::new(0).is_none());
        assert!(PageNumber::try_from(-3).is_err());
        assert_eq!(PageNumber::try_from(7).unwrap(), page(7));
    }
}

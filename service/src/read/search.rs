//! [`House`] search definitions.

use std::collections::BTreeSet;

use common::{datetime::ParseDateError, page, Date};
use derive_more::{Display, Error, From};
use serde::Serialize;

use crate::{
    domain::{area, house, House, Order},
    read::house::Basic,
};

/// Range of days a guest wants to stay, both ends inclusive and each one
/// optional.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DateRange {
    /// First day of the stay, if specified.
    start: Option<Date>,

    /// Last day of the stay, if specified.
    end: Option<Date>,
}

impl DateRange {
    /// [`DateRange`] without any bounds.
    pub const UNBOUNDED: Self = Self {
        start: None,
        end: None,
    };

    /// Creates a new [`DateRange`] out of the provided bounds.
    ///
    /// # Errors
    ///
    /// If both bounds are present and `start` goes after `end`.
    pub fn new(
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Self, InvalidDateRange> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(InvalidDateRange::Reversed { start, end });
            }
        }
        Ok(Self { start, end })
    }

    /// Parses a new [`DateRange`] out of `YYYY-MM-DD` bounds, treating empty
    /// ones as absent.
    ///
    /// # Errors
    ///
    /// If any bound is malformed, or `start` goes after `end`.
    pub fn parse(
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, InvalidDateRange> {
        let parse = |s: Option<&str>| {
            non_empty(s)
                .map(str::parse::<Date>)
                .transpose()
                .map_err(InvalidDateRange::Malformed)
        };
        Self::new(parse(start)?, parse(end)?)
    }

    /// Returns the first day of this [`DateRange`], if bounded.
    #[must_use]
    pub const fn start(&self) -> Option<Date> {
        self.start
    }

    /// Returns the last day of this [`DateRange`], if bounded.
    #[must_use]
    pub const fn end(&self) -> Option<Date> {
        self.end
    }

    /// Indicates whether this [`DateRange`] has no bounds at all.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Indicates whether a booking of the `begin..=end` days intersects this
    /// [`DateRange`].
    ///
    /// A missing bound of this [`DateRange`] never limits the intersection.
    #[must_use]
    pub fn conflicts_with(&self, begin: Date, end: Date) -> bool {
        self.end.map_or(true, |e| begin <= e)
            && self.start.map_or(true, |s| end >= s)
    }
}

/// Error of creating a [`DateRange`].
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum InvalidDateRange {
    /// Bound is not a `YYYY-MM-DD` date.
    #[display("{_0}")]
    Malformed(ParseDateError),

    /// Start goes after the end.
    #[display("start date `{start}` goes after end date `{end}`")]
    Reversed {
        /// Requested start.
        start: Date,

        /// Requested end.
        end: Date,
    },
}

/// Order of [`House`]s in search results.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    strum::Display,
    strum::EnumString,
)]
pub enum SortKey {
    /// Most booked first.
    #[strum(serialize = "booking")]
    Booking,

    /// Cheapest first.
    #[strum(serialize = "price-inc")]
    PriceInc,

    /// Most expensive first.
    #[strum(serialize = "price-des")]
    PriceDes,

    /// Latest listed first.
    #[default]
    #[strum(serialize = "new")]
    New,
}

impl SortKey {
    /// Parses a [`SortKey`], falling back to the [`SortKey::default()`] one if
    /// absent or unknown.
    #[must_use]
    pub fn parse_or_default(key: Option<&str>) -> Self {
        non_empty(key)
            .and_then(|k| k.parse().ok())
            .unwrap_or_default()
    }
}

/// Search criteria of [`House`]s.
///
/// Field-wise equal [`Filter`]s address the same cached search results.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Filter {
    /// [`Area`] to search in, if any.
    ///
    /// [`Area`]: crate::domain::Area
    pub area: Option<area::Id>,

    /// [`DateRange`] the found [`House`]s must be available for.
    pub dates: DateRange,

    /// Order of the found [`House`]s.
    pub sort: SortKey,
}

impl Filter {
    /// Parses a new [`Filter`] out of raw request parameters, treating empty
    /// ones as absent.
    ///
    /// # Errors
    ///
    /// If the area ID is not a positive integer, or the [`DateRange`] is
    /// invalid.
    pub fn parse(
        area: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self, InvalidFilter> {
        let area = non_empty(area)
            .map(|a| {
                a.parse::<i32>()
                    .ok()
                    .filter(|id| *id > 0)
                    .map(area::Id::from)
                    .ok_or_else(|| InvalidFilter::Area(a.to_owned()))
            })
            .transpose()?;

        Ok(Self {
            area,
            dates: DateRange::parse(start, end)?,
            sort: SortKey::parse_or_default(sort),
        })
    }
}

/// Error of parsing a [`Filter`].
#[derive(Clone, Debug, Display, Error, From)]
pub enum InvalidFilter {
    /// Area ID is not a positive integer.
    #[display("invalid area ID `{_0}`")]
    #[from(ignore)]
    Area(#[error(not(source))] String),

    /// [`DateRange`] is invalid.
    #[display("{_0}")]
    Dates(InvalidDateRange),
}

/// Set of [`House`]s unavailable for some [`DateRange`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Conflicts(BTreeSet<house::Id>);

impl Conflicts {
    /// Collects [`Conflicts`] out of the provided [`Order`]s, keeping only the
    /// ones intersecting the `range`.
    #[must_use]
    pub fn collect(
        range: &DateRange,
        orders: impl IntoIterator<Item = Order>,
    ) -> Self {
        Self(
            orders
                .into_iter()
                .filter(|o| range.conflicts_with(o.begin_date, o.end_date))
                .map(|o| o.house_id)
                .collect(),
        )
    }

    /// Indicates whether no [`House`] is unavailable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the IDs of unavailable [`House`]s in ascending order.
    #[must_use]
    pub fn into_ids(self) -> Vec<house::Id> {
        self.0.into_iter().collect()
    }
}

/// Ordering of [`House`]s in a [`Plan`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Ordering {
    /// By [`House::order_count`] descending.
    MostBooked,

    /// By [`House::price`] ascending.
    Cheapest,

    /// By [`House::price`] descending.
    MostExpensive,

    /// By [`House::created_at`] descending.
    Newest,
}

impl From<SortKey> for Ordering {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Booking => Self::MostBooked,
            SortKey::PriceInc => Self::Cheapest,
            SortKey::PriceDes => Self::MostExpensive,
            SortKey::New => Self::Newest,
        }
    }
}

impl Ordering {
    #[cfg(feature = "postgres")]
    /// Returns SQL `ORDER BY` clause representing this [`Ordering`].
    ///
    /// Ties are broken by the [`House`] ID, so pages are stable.
    #[must_use]
    pub const fn sql(&self) -> &'static str {
        match self {
            Self::MostBooked => "h.order_count DESC, h.id DESC",
            Self::Cheapest => "h.price ASC, h.id DESC",
            Self::MostExpensive => "h.price DESC, h.id DESC",
            Self::Newest => "h.created_at DESC, h.id DESC",
        }
    }
}

/// Query plan of a single search results page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Plan {
    /// [`Area`] the [`House`]s must be located in, if any.
    ///
    /// [`Area`]: crate::domain::Area
    pub area: Option<area::Id>,

    /// IDs of the [`House`]s to exclude, in ascending order.
    pub excluded: Vec<house::Id>,

    /// [`Ordering`] of the [`House`]s.
    pub ordering: Ordering,

    /// Requested page.
    pub page: page::Number,

    /// Size of every page.
    pub size: page::Size,
}

impl Plan {
    /// Plans the search of the `page` of [`House`]s matching the `filter`
    /// and not present in the `conflicts`.
    #[must_use]
    pub fn new(
        filter: &Filter,
        conflicts: Conflicts,
        page: page::Number,
        size: page::Size,
    ) -> Self {
        Self {
            area: filter.area,
            excluded: conflicts.into_ids(),
            ordering: filter.sort.into(),
            page,
            size,
        }
    }

    /// Indicates whether the [`House`] satisfies this [`Plan`]'s predicates.
    #[must_use]
    pub fn admits(&self, house: &House) -> bool {
        self.area.map_or(true, |a| house.area_id == a)
            && self.excluded.binary_search(&house.id).is_err()
    }

    /// Returns the count of [`House`]s preceding the requested page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.page.offset(self.size)
    }

    /// Returns the maximum count of [`House`]s on the requested page.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.size.get()
    }
}

/// Page of search results, serialized as
/// `{"houses": [...], "total_page": N, "current_page": P}`.
#[derive(Clone, Debug, Serialize)]
pub struct Listing {
    /// [`Basic`] cards of the found [`House`]s.
    pub houses: Vec<Basic>,

    /// Total amount of pages.
    pub total_page: page::Total,

    /// Number of this page.
    pub current_page: page::Number,
}

/// Filters out empty strings.
fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod spec {
    use common::{page, Date};

    use crate::domain::{order, Order};

    use super::{
        Conflicts, DateRange, Filter, InvalidDateRange, InvalidFilter,
        Ordering, Plan, SortKey,
    };

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn booking(id: i32, house: i32, begin: &str, end: &str) -> Order {
        Order {
            id: id.into(),
            house_id: house.into(),
            user_id: 1.into(),
            begin_date: date(begin),
            end_date: date(end),
            status: order::Status::Paid,
            comment: None,
        }
    }

    fn range(start: Option<&str>, end: Option<&str>) -> DateRange {
        DateRange::parse(start, end).unwrap()
    }

    #[test]
    fn detects_overlap_inclusively() {
        let range = range(Some("2024-01-10"), Some("2024-01-15"));

        assert!(range.conflicts_with(date("2024-01-12"), date("2024-01-14")));
        assert!(range.conflicts_with(date("2024-01-01"), date("2024-01-10")));
        assert!(range.conflicts_with(date("2024-01-15"), date("2024-01-20")));
        assert!(range.conflicts_with(date("2024-01-01"), date("2024-02-01")));
        assert!(!range.conflicts_with(date("2024-01-16"), date("2024-01-20")));
        assert!(!range.conflicts_with(date("2024-01-01"), date("2024-01-09")));
    }

    #[test]
    fn detects_overlap_with_start_only() {
        let range = range(Some("2024-01-10"), None);

        assert!(range.conflicts_with(date("2024-01-01"), date("2024-01-10")));
        assert!(range.conflicts_with(date("2024-03-01"), date("2024-03-05")));
        assert!(!range.conflicts_with(date("2024-01-01"), date("2024-01-09")));
    }

    #[test]
    fn detects_overlap_with_end_only() {
        let range = range(None, Some("2024-01-15"));

        assert!(range.conflicts_with(date("2024-01-15"), date("2024-01-20")));
        assert!(range.conflicts_with(date("2023-12-01"), date("2023-12-05")));
        assert!(!range.conflicts_with(date("2024-01-16"), date("2024-01-20")));
    }

    #[test]
    fn start_only_conflict_is_a_full_range_conflict_for_some_end() {
        let start = date("2024-01-10");
        let orders = [
            ("2024-01-01", "2024-01-09"),
            ("2024-01-01", "2024-01-10"),
            ("2024-01-05", "2024-01-12"),
            ("2024-01-10", "2024-01-10"),
            ("2024-02-01", "2024-02-03"),
        ];

        for (begin, end) in orders {
            let (begin, end) = (date(begin), date(end));
            if DateRange::new(Some(start), None)
                .unwrap()
                .conflicts_with(begin, end)
            {
                let compatible_end = begin.max(start);
                assert!(
                    DateRange::new(Some(start), Some(compatible_end))
                        .unwrap()
                        .conflicts_with(begin, end),
                    "{begin}..{end} must conflict up to {compatible_end}",
                );
            }
        }
    }

    #[test]
    fn rejects_reversed_range() {
        assert!(matches!(
            DateRange::parse(Some("2024-01-15"), Some("2024-01-10")),
            Err(InvalidDateRange::Reversed { .. }),
        ));
        assert!(DateRange::parse(Some("2024-01-15"), Some("2024-01-15"))
            .is_ok());
    }

    #[test]
    fn rejects_malformed_range() {
        assert!(matches!(
            DateRange::parse(Some("2024-01-32"), None),
            Err(InvalidDateRange::Malformed(_)),
        ));
        assert!(matches!(
            DateRange::parse(None, Some("tomorrow")),
            Err(InvalidDateRange::Malformed(_)),
        ));
    }

    #[test]
    fn treats_empty_bounds_as_absent() {
        assert!(DateRange::parse(Some(""), Some("")).unwrap().is_unbounded());
        assert!(DateRange::parse(None, None).unwrap().is_unbounded());
    }

    #[test]
    fn collects_only_conflicting_houses() {
        let range = range(Some("2024-01-10"), Some("2024-01-15"));

        let conflicts = Conflicts::collect(
            &range,
            [
                booking(1, 7, "2024-01-12", "2024-01-14"),
                booking(2, 8, "2024-01-16", "2024-01-20"),
                booking(3, 7, "2024-01-01", "2024-01-11"),
            ],
        );

        assert_eq!(conflicts.into_ids(), vec![7.into()]);
    }

    #[test]
    fn parses_filter() {
        let filter = Filter::parse(
            Some("3"),
            Some("2024-01-10"),
            Some("2024-01-15"),
            Some("price-inc"),
        )
        .unwrap();

        assert_eq!(filter.area, Some(3.into()));
        assert_eq!(filter.dates.start(), Some(date("2024-01-10")));
        assert_eq!(filter.dates.end(), Some(date("2024-01-15")));
        assert_eq!(filter.sort, SortKey::PriceInc);
    }

    #[test]
    fn parses_empty_filter() {
        assert_eq!(
            Filter::parse(Some(""), Some(""), Some(""), None).unwrap(),
            Filter::default(),
        );
    }

    #[test]
    fn rejects_invalid_area() {
        assert!(matches!(
            Filter::parse(Some("abc"), None, None, None),
            Err(InvalidFilter::Area(_)),
        ));
        assert!(matches!(
            Filter::parse(Some("-1"), None, None, None),
            Err(InvalidFilter::Area(_)),
        ));
    }

    #[test]
    fn falls_back_to_newest_sort() {
        assert_eq!(SortKey::parse_or_default(None), SortKey::New);
        assert_eq!(SortKey::parse_or_default(Some("cheap")), SortKey::New);
        assert_eq!(SortKey::parse_or_default(Some("booking")), SortKey::Booking);
        assert_eq!(
            SortKey::parse_or_default(Some("price-des")),
            SortKey::PriceDes,
        );
    }

    #[test]
    fn plans_ordering_by_sort_key() {
        assert_eq!(Ordering::from(SortKey::Booking), Ordering::MostBooked);
        assert_eq!(Ordering::from(SortKey::PriceInc), Ordering::Cheapest);
        assert_eq!(Ordering::from(SortKey::PriceDes), Ordering::MostExpensive);
        assert_eq!(Ordering::from(SortKey::New), Ordering::Newest);
    }

    #[test]
    fn plans_page_window() {
        let filter = Filter {
            area: Some(3.into()),
            ..Filter::default()
        };
        let conflicts = Conflicts::collect(
            &range(Some("2024-01-10"), None),
            [booking(1, 9, "2024-01-01", "2024-01-20")],
        );

        let plan = Plan::new(
            &filter,
            conflicts,
            page::Number::new(3).unwrap(),
            page::Size::new(2).unwrap(),
        );

        assert_eq!(plan.area, Some(3.into()));
        assert_eq!(plan.excluded, vec![9.into()]);
        assert_eq!(plan.ordering, Ordering::Newest);
        assert_eq!(plan.offset(), 4);
        assert_eq!(plan.limit(), 2);
    }
}

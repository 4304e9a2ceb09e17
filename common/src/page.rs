//! Abstractions for page-number pagination.

use std::{fmt, num::NonZeroU32, str::FromStr};

use derive_more::{Display, Error};

/// 1-based number of a requested page.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(transparent)
)]
pub struct Number(NonZeroU32);

impl Number {
    /// The first page.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates a new [`Number`] if the provided `num` is positive.
    #[must_use]
    pub fn new(num: u32) -> Option<Self> {
        NonZeroU32::new(num).map(Self)
    }

    /// Returns the numeric value of this [`Number`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the count of items preceding this page for the given [`Size`].
    #[must_use]
    pub fn offset(self, size: Size) -> u64 {
        u64::from(self.get() - 1) * u64::from(size.get())
    }

    /// Indicates whether this page lies within the [`Total`] amount of
    /// pages.
    #[must_use]
    pub fn is_within(self, total: Total) -> bool {
        self.get() <= total.get()
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Number {
    type Err = InvalidNumber;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or(InvalidNumber)
    }
}

/// Error of parsing a page [`Number`].
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("page number must be a positive integer")]
pub struct InvalidNumber;

/// Amount of items on a single page.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Size(NonZeroU32);

impl Size {
    /// Creates a new [`Size`] if the provided `size` is positive.
    #[must_use]
    pub fn new(size: u32) -> Option<Self> {
        NonZeroU32::new(size).map(Self)
    }

    /// Returns the numeric value of this [`Size`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

/// Total amount of pages.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(transparent)
)]
pub struct Total(u32);

impl Total {
    /// Calculates the [`Total`] amount of pages required to fit `count`
    /// items into pages of the provided [`Size`].
    #[must_use]
    pub fn from_count(count: u64, size: Size) -> Self {
        let pages = count.div_ceil(u64::from(size.get()));
        Self(u32::try_from(pages).unwrap_or(u32::MAX))
    }

    /// Returns the numeric value of this [`Total`].
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Single page of items along with the [`Total`] amount of pages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// [`Total`] amount of pages the items are split into.
    pub total: Total,
}

#[cfg(test)]
mod spec {
    use super::{Number, Size, Total};

    fn size(n: u32) -> Size {
        Size::new(n).unwrap()
    }

    #[test]
    fn rounds_total_up() {
        assert_eq!(Total::from_count(0, size(2)).get(), 0);
        assert_eq!(Total::from_count(1, size(2)).get(), 1);
        assert_eq!(Total::from_count(2, size(2)).get(), 1);
        assert_eq!(Total::from_count(3, size(2)).get(), 2);
        assert_eq!(Total::from_count(10, size(3)).get(), 4);
    }

    #[test]
    fn calculates_offset() {
        assert_eq!(Number::FIRST.offset(size(2)), 0);
        assert_eq!(Number::new(3).unwrap().offset(size(2)), 4);
        assert_eq!(Number::new(5).unwrap().offset(size(10)), 40);
    }

    #[test]
    fn checks_bounds() {
        let total = Total::from_count(4, size(2));

        assert!(Number::new(1).unwrap().is_within(total));
        assert!(Number::new(2).unwrap().is_within(total));
        assert!(!Number::new(5).unwrap().is_within(total));
        assert!(!Number::FIRST.is_within(Total::default()));
    }

    #[test]
    fn parses_positive_numbers_only() {
        assert_eq!("1".parse::<Number>().unwrap(), Number::FIRST);
        assert_eq!("42".parse::<Number>().unwrap().get(), 42);
        assert!("0".parse::<Number>().is_err());
        assert!("-3".parse::<Number>().is_err());
        assert!("two".parse::<Number>().is_err());
        assert!("".parse::<Number>().is_err());
    }
}

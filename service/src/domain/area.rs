//! [`Area`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::Serialize;

/// City area a [`House`] is located in.
///
/// [`House`]: crate::domain::House
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Area {
    /// ID of this [`Area`].
    pub id: Id,

    /// [`Name`] of this [`Area`].
    pub name: Name,
}

/// ID of an [`Area`].
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(i32);

/// Display name of an [`Area`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq, Serialize)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(transparent)]
pub struct Name(String);

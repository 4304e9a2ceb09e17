//! [`House`] definitions.

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{AsRef, Display, From, FromStr, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};
use serde::Serialize;

use crate::domain::{area, user, Image};

/// House listed for short-term rent.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct House {
    /// ID of this [`House`].
    pub id: Id,

    /// ID of the [`User`] owning this [`House`].
    ///
    /// [`User`]: crate::domain::User
    pub owner_id: user::Id,

    /// ID of the [`Area`] this [`House`] is located in.
    ///
    /// [`Area`]: crate::domain::Area
    pub area_id: area::Id,

    /// [`Title`] of this [`House`].
    pub title: Title,

    /// Per-night [`Price`] of this [`House`].
    pub price: Price,

    /// [`Address`] of this [`House`].
    pub address: Address,

    /// Number of rooms in this [`House`].
    pub room_count: i32,

    /// Area of this [`House`] in square meters.
    pub acreage: i32,

    /// Layout description of this [`House`].
    pub unit: String,

    /// Number of guests this [`House`] accommodates.
    pub capacity: i32,

    /// Beds configuration of this [`House`].
    pub beds: String,

    /// Deposit required to book this [`House`].
    pub deposit: Price,

    /// Minimal number of days a booking lasts.
    pub min_days: i32,

    /// Maximal number of days a booking lasts, `0` meaning unlimited.
    pub max_days: i32,

    /// Number of completed bookings of this [`House`].
    pub order_count: i32,

    /// Primary [`Image`] of this [`House`], if set.
    pub index_image: Option<Image>,

    /// [`DateTime`] when this [`House`] was listed.
    pub created_at: CreationDateTime,
}

/// ID of a [`House`].
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
#[serde(transparent)]
pub struct Id(i32);

/// Title of a [`House`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq, Serialize)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(transparent)]
pub struct Title(String);

/// Address of a [`House`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq, Serialize)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
#[serde(transparent)]
pub struct Address(String);

/// Amount of money in minor currency units.
#[derive(
    Clone,
    Copy,
    Debug,
    Display,
    Eq,
    From,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
#[serde(transparent)]
pub struct Price(i32);

/// ID of a facility a [`House`] provides.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq, Serialize,
)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
#[serde(transparent)]
pub struct FacilityId(i32);

/// [`DateTime`] when a [`House`] was listed.
pub type CreationDateTime = DateTimeOf<(House, unit::Creation)>;

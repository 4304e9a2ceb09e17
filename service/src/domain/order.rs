//! [`Order`] definitions.

use common::{define_kind, Date};
use derive_more::{AsRef, Display, From, Into};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

use crate::domain::{house, user};

/// Booking of a [`House`] for an inclusive range of days.
///
/// [`House`]: crate::domain::House
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// ID of the booked [`House`].
    ///
    /// [`House`]: crate::domain::House
    pub house_id: house::Id,

    /// ID of the [`User`] who booked.
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// First booked day.
    pub begin_date: Date,

    /// Last booked day.
    pub end_date: Date,

    /// [`Status`] of this [`Order`].
    pub status: Status,

    /// [`Comment`] left by the guest, if any.
    pub comment: Option<Comment>,
}

/// ID of an [`Order`].
#[derive(Clone, Copy, Debug, Display, Eq, From, Hash, Into, PartialEq)]
#[cfg_attr(feature = "postgres", derive(ToSql, FromSql), postgres(transparent))]
pub struct Id(i32);

/// Guest comment on a completed [`Order`].
#[derive(AsRef, Clone, Debug, Display, Eq, From, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Comment(String);

define_kind! {
    #[doc = "Status of an [`Order`]."]
    enum Status {
        #[doc = "Waiting for the owner to accept."]
        #[as_str = "WAIT_ACCEPT"]
        WaitAccept = 1,

        #[doc = "Accepted and waiting for payment."]
        #[as_str = "WAIT_PAYMENT"]
        WaitPayment = 2,

        #[doc = "Paid."]
        #[as_str = "PAID"]
        Paid = 3,

        #[doc = "Stay is over, waiting for the guest's comment."]
        #[as_str = "WAIT_COMMENT"]
        WaitComment = 4,

        #[doc = "Completed and commented."]
        #[as_str = "COMPLETE"]
        Complete = 5,

        #[doc = "Canceled by the guest."]
        #[as_str = "CANCELED"]
        Canceled = 6,

        #[doc = "Rejected by the owner."]
        #[as_str = "REJECTED"]
        Rejected = 7,
    }
}

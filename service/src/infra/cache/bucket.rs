//! Search results bucket definitions.
//!
//! All pages of the same search share a single bucket, expiring together.

use common::page;
use derive_more::{AsRef, Display};

use crate::{
    infra::cache::Ttl,
    read::{search::Filter, Payload},
};

/// Key of a bucket holding the pages of a single search.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct Key(String);

impl Key {
    /// Returns the bucket [`Key`] of the search with the provided [`Filter`].
    ///
    /// Absent criteria are rendered empty, so field-wise equal [`Filter`]s
    /// share the bucket.
    #[must_use]
    pub fn search(filter: &Filter) -> Self {
        fn opt(v: Option<impl ToString>) -> String {
            v.map(|v| v.to_string()).unwrap_or_default()
        }

        Self(format!(
            "houses_{}_{}_{}_{}",
            opt(filter.area),
            opt(filter.dates.start()),
            opt(filter.dates.end()),
            filter.sort,
        ))
    }
}

/// Single page slot in a bucket.
#[derive(Clone, Debug, Display, Eq, Hash, PartialEq)]
#[display("{key}#{page}")]
pub struct Slot {
    /// [`Key`] of the bucket.
    pub key: Key,

    /// Number of the page.
    pub page: page::Number,
}

/// Page of search results to store in a bucket.
///
/// Storing a [`PageEntry`] refreshes the [`Ttl`] of the whole bucket.
#[derive(Clone, Debug, Display)]
#[display("{slot}")]
pub struct PageEntry {
    /// [`Slot`] to store the page in.
    pub slot: Slot,

    /// Serialized page.
    pub payload: Payload,

    /// [`Ttl`] of the bucket.
    pub ttl: Ttl,
}

//! Plain [`Cache`] [`Entry`] definitions.

use std::time::Duration;

use derive_more::{AsRef, Display};

use crate::{domain::house, read::Payload};
#[cfg(doc)]
use crate::infra::Cache;

/// Key of a plain [`Cache`] [`Entry`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str)]
pub struct Key(String);

impl Key {
    /// [`Key`] of the areas list.
    #[must_use]
    pub fn areas() -> Self {
        Self("area_info".into())
    }

    /// [`Key`] of the home page highlights.
    #[must_use]
    pub fn home_page() -> Self {
        Self("home_page_data".into())
    }

    /// [`Key`] of the detail page of the [`House`] with the provided `id`.
    ///
    /// [`House`]: crate::domain::House
    #[must_use]
    pub fn house(id: house::Id) -> Self {
        Self(format!("house_info_{id}"))
    }
}

/// Expiration time of a [`Cache`] [`Entry`], whole seconds only.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ttl(u64);

impl Ttl {
    /// Creates a new [`Ttl`] out of the provided [`Duration`], truncating it to
    /// whole seconds.
    ///
    /// [`None`] is returned if the [`Duration`] is shorter than a second.
    #[must_use]
    pub fn new(duration: Duration) -> Option<Self> {
        let secs = duration.as_secs();
        (secs > 0).then_some(Self(secs))
    }

    /// Returns this [`Ttl`] in seconds.
    #[must_use]
    pub const fn secs(self) -> u64 {
        self.0
    }
}

/// Value to store in a [`Cache`] under some [`Key`].
///
/// Every [`Entry`] expires, so stale values are eventually dropped.
#[derive(Clone, Debug, Display)]
#[display("{key}")]
pub struct Entry {
    /// [`Key`] to store the value under.
    pub key: Key,

    /// Stored value.
    pub payload: Payload,

    /// [`Ttl`] of the value.
    pub ttl: Ttl,
}

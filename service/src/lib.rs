//! Service contains the business logic of the application.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::time::Duration;

use common::page;

use crate::infra::cache::Ttl;
#[cfg(doc)]
use crate::infra::{Cache, Database};

pub use self::query::Query;

/// [`Service`] configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Expiration times of cached data.
    pub ttl: Ttls,

    /// Maximum number of houses highlighted on the home page.
    pub home_page_houses: usize,

    /// Number of houses on a single search results page.
    pub page_size: page::Size,

    /// Maximum number of comments shown on a house detail page.
    pub comments_limit: usize,

    /// Public URL prefix of the stored images.
    pub image_url_prefix: String,

    /// Time a single [`Database`] operation is allowed to take.
    pub store_timeout: Duration,

    /// Time a single [`Cache`] operation is allowed to take.
    ///
    /// Once exceeded, the [`Cache`] is considered unavailable for this
    /// operation.
    pub cache_timeout: Duration,
}

/// Expiration times of cached data.
#[derive(Clone, Copy, Debug)]
pub struct Ttls {
    /// [`Ttl`] of the areas list.
    pub areas: Ttl,

    /// [`Ttl`] of the home page highlights.
    pub home_page: Ttl,

    /// [`Ttl`] of a house detail page.
    pub house: Ttl,

    /// [`Ttl`] of a search results bucket.
    pub search: Ttl,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Ch> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Cache`] of this [`Service`].
    cache: Ch,
}

impl<Db, Ch> Service<Db, Ch> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub const fn new(config: Config, database: Db, cache: Ch) -> Self {
        Self {
            config,
            database,
            cache,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub const fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Cache`] of this [`Service`].
    #[must_use]
    pub const fn cache(&self) -> &Ch {
        &self.cache
    }
}

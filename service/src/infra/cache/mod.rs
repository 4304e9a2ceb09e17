//! [`Cache`]-related implementations.

pub mod bucket;
mod entry;
#[cfg(test)]
pub(crate) mod memory;
#[cfg(feature = "redis")]
pub mod redis;

use derive_more::{Display, Error as StdError, From};
use tokio::time::error::Elapsed;

#[cfg(feature = "redis")]
pub use self::redis::Redis;
pub use self::entry::{Entry, Key, Ttl};

/// Cache operation.
pub use common::Handler as Cache;

/// [`Cache`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "redis")]
    /// [`Redis`] error.
    #[display("`Redis` error: {_0}")]
    Redis(redis::Error),

    /// [`Cache`] didn't respond in time.
    #[display("`Cache` operation timed out")]
    Timeout(Elapsed),

    /// Cached value is not a valid JSON document.
    #[display("Malformed cached value: {_0}")]
    Malformed(serde_json::Error),
}

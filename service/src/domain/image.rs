//! [`Image`] definitions.

use derive_more::{AsRef, Display, From};
#[cfg(feature = "postgres")]
use postgres_types::{FromSql, ToSql};

/// Reference to an image in the object storage, relative to its public URL
/// prefix.
#[derive(AsRef, Clone, Debug, Display, Eq, From, Hash, PartialEq)]
#[as_ref(str, String)]
#[cfg_attr(feature = "postgres", derive(FromSql, ToSql), postgres(transparent))]
pub struct Image(String);

impl Image {
    /// Returns the public URL of this [`Image`] under the provided `prefix`.
    #[must_use]
    pub fn url(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.0)
    }
}

//! [`Payload`] definitions.

use std::fmt;

use serde::{de::IgnoredAny, Deserialize, Serialize};
use serde_json::value::RawValue;

/// Serialized JSON document, as it is stored in the cache and served to
/// clients.
///
/// A [`Payload`] read from the cache is returned byte-for-byte, without being
/// re-serialized.
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct Payload(Box<RawValue>);

impl Payload {
    /// Serializes the provided `value` into a new [`Payload`].
    ///
    /// # Errors
    ///
    /// If the `value` cannot be represented as JSON.
    pub fn new<T>(value: &T) -> Result<Self, serde_json::Error>
    where
        T: Serialize + ?Sized,
    {
        serde_json::value::to_raw_value(value).map(Self)
    }

    /// Wraps the provided raw `json` into a [`Payload`].
    ///
    /// # Errors
    ///
    /// If the `json` is not a valid JSON document.
    pub fn from_json(json: String) -> Result<Self, serde_json::Error> {
        RawValue::from_string(json).map(Self)
    }

    /// Indicates whether this [`Payload`] is a whole response envelope (an
    /// object with an `errno` field) rather than the `data` of one.
    ///
    /// Search pages written by the legacy deployment are stored this way.
    #[must_use]
    pub fn is_envelope(&self) -> bool {
        #[derive(Deserialize)]
        struct Envelope {
            #[expect(dead_code, reason = "only presence matters")]
            errno: IgnoredAny,
        }

        self.as_str().trim_start().starts_with('{')
            && serde_json::from_str::<Envelope>(self.as_str()).is_ok()
    }

    /// Returns the JSON text of this [`Payload`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.get()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Eq for Payload {}
impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

#[cfg(test)]
mod spec {
    use serde::Serialize;

    use super::Payload;

    #[derive(Serialize)]
    struct Wrapper {
        inner: Payload,
    }

    #[test]
    fn keeps_json_verbatim() {
        let payload =
            Payload::from_json(r#"[{"area_id":1,"name":"Beijing"}]"#.into())
                .unwrap();

        let wrapped = serde_json::to_string(&Wrapper { inner: payload })
            .unwrap();

        assert_eq!(wrapped, r#"{"inner":[{"area_id":1,"name":"Beijing"}]}"#);
    }

    #[test]
    fn detects_response_envelope() {
        let legacy = Payload::from_json(
            r#"{"errno": 0, "errmsg": "OK", "data": {"houses": []}}"#.into(),
        )
        .unwrap();
        let listing = Payload::from_json(
            r#"{"houses":[],"total_page":0,"current_page":1}"#.into(),
        )
        .unwrap();
        let areas = Payload::from_json(r#"[{"errno":1}]"#.into()).unwrap();

        assert!(legacy.is_envelope());
        assert!(!listing.is_envelope());
        assert!(!areas.is_envelope());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(Payload::from_json("{\"houses\":".into()).is_err());
    }
}

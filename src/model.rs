//! Request and response bodies for the shorten endpoint

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Request payload for shortening a URL
///
/// Decoding is lenient in the way browser clients expect: the `url` key is
/// matched ignoring ASCII case, the last matching key wins, `null` leaves the
/// value untouched and unknown keys are skipped. A missing key means the empty
/// string.
///
/// # Example
/// ```json
/// { "url": "https://example.com/page" }
/// ```
#[derive(Debug, Default)]
pub struct ShortenRequest {
    /// The URL to shorten, stored as-is
    pub url: String,
}

impl<'de> Deserialize<'de> for ShortenRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ShortenRequestVisitor)
    }
}

struct ShortenRequestVisitor;

impl<'de> Visitor<'de> for ShortenRequestVisitor {
    type Value = ShortenRequest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object with a string `url` field")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = ShortenRequest::default();

        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("url") {
                if let Some(url) = map.next_value::<Option<String>>()? {
                    request.url = url;
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(request)
    }
}

/// Response returned after a URL has been shortened
///
/// # Example
/// ```json
/// { "short_url": "https://fer.link/AbC123" }
/// ```
#[derive(Serialize, Debug)]
pub struct ShortenResponse {
    pub short_url: String,
}

//! RFC 9457 Problem Details for HTTP APIs (pure data model, no HTTP framework dependencies)

use std::str::FromStr;

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::error::{JsonKind, ProblemError};
use crate::escape::to_vec_html_safe;
use crate::extensions::Extensions;

/// Content type for Problem Details as per RFC 9457.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

const STATUS: &str = "status";
const INSTANCE: &str = "instance";
const DETAIL: &str = "detail";
const TITLE: &str = "title";
const TYPE: &str = "type";

/// Member names owned by the typed fields of [`Problem`]. They never end up in
/// [`Problem::extensions`] when a document is deserialized.
pub const RESERVED_MEMBERS: [&str; 5] = [STATUS, INSTANCE, DETAIL, TITLE, TYPE];

/// RFC 9457 Problem Details for HTTP APIs.
///
/// Every member is optional. A `status` of zero or below and empty strings are
/// treated as absent and left out of the serialized document. Extension members
/// are written at the same level as the reserved ones.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Problem {
    /// The HTTP status code for this occurrence of the problem; `<= 0` means unset.
    pub status: i64,
    /// A URI reference that identifies the specific occurrence of the problem.
    pub instance: String,
    /// A human-readable explanation specific to this occurrence of the problem.
    pub detail: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// A URI reference that identifies the problem type.
    /// Serialized as `type`.
    pub type_url: String,
    extensions: Extensions,
}

impl Problem {
    /// Create an empty Problem with every member absent.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: i64) -> Self {
        self.status = status;
        self
    }

    pub fn with_status_code(self, status: StatusCode) -> Self {
        self.with_status(i64::from(status.as_u16()))
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = uri.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    /// Add an extension member, replacing any previous value under `key`.
    ///
    /// The key is not checked against [`RESERVED_MEMBERS`]: on output an
    /// extension named like a reserved member replaces that member.
    /// A value that cannot be represented as JSON is kept and makes
    /// serialization fail with [`ProblemError::Encoding`].
    pub fn with_extension<V>(mut self, key: impl Into<String>, value: V) -> Self
    where
        V: Serialize,
    {
        self.extensions.insert(key.into(), value);
        self
    }

    /// Remove an extension member. Does nothing if `key` is not present.
    pub fn without_extension(mut self, key: &str) -> Self {
        self.extensions.remove(key);
        self
    }

    #[must_use]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    #[must_use]
    pub fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions.get(key)
    }

    /// Build the flat JSON object for this problem.
    ///
    /// Reserved members are inserted first, then every extension, so an
    /// extension with a reserved name overwrites the reserved member.
    ///
    /// # Errors
    /// Returns [`ProblemError::Encoding`] if an extension has no JSON representation.
    pub fn to_map(&self) -> Result<Map<String, Value>, ProblemError> {
        let mut map = Map::new();
        if self.status > 0 {
            map.insert(STATUS.to_owned(), Value::from(self.status));
        }
        for (key, value) in [
            (INSTANCE, &self.instance),
            (DETAIL, &self.detail),
            (TITLE, &self.title),
            (TYPE, &self.type_url),
        ] {
            if !value.is_empty() {
                map.insert(key.to_owned(), Value::String(value.clone()));
            }
        }
        self.extensions.write_into(&mut map)?;
        Ok(map)
    }

    /// Encode as compact JSON with `<`, `>` and `&` escaped for HTML embedding.
    ///
    /// # Errors
    /// Returns [`ProblemError::Encoding`] if an extension has no JSON representation.
    pub fn to_json(&self) -> Result<Vec<u8>, ProblemError> {
        let map = self.to_map()?;
        to_vec_html_safe(&map).map_err(|err| ProblemError::Encoding(err.to_string()))
    }

    /// Parse a problem document from JSON bytes.
    ///
    /// # Errors
    /// Returns [`ProblemError::MalformedInput`] if `bytes` is not a JSON object and
    /// [`ProblemError::InvalidStatusType`] if `status` is not integer-convertible.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ProblemError> {
        let map: Map<String, Value> = serde_json::from_slice(bytes)?;
        Self::from_map(map)
    }

    /// Build a problem from an already parsed JSON value.
    ///
    /// # Errors
    /// Same as [`Problem::from_slice`].
    pub fn from_value(value: Value) -> Result<Self, ProblemError> {
        let map: Map<String, Value> = serde_json::from_value(value)?;
        Self::from_map(map)
    }

    /// Build a problem from a JSON object map.
    ///
    /// Reserved members are consumed into the typed fields; reserved string
    /// members of any other JSON type are dropped. Everything else becomes an
    /// extension with its parsed value left untouched.
    ///
    /// # Errors
    /// Returns [`ProblemError::InvalidStatusType`] if `status` is not integer-convertible.
    pub fn from_map(mut map: Map<String, Value>) -> Result<Self, ProblemError> {
        let status = match map.remove(STATUS) {
            Some(value) => status_from_value(&value)?,
            None => 0,
        };
        let instance = take_string(&mut map, INSTANCE);
        let detail = take_string(&mut map, DETAIL);
        let title = take_string(&mut map, TITLE);
        let type_url = take_string(&mut map, TYPE);

        Ok(Self {
            status,
            instance,
            detail,
            title,
            type_url,
            extensions: Extensions::from(map),
        })
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> String {
    match map.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

fn status_from_value(value: &Value) -> Result<i64, ProblemError> {
    match value {
        Value::Number(n) => Ok(status_from_number(n)),
        Value::String(s) => s
            .parse::<i64>()
            .map_err(|_| ProblemError::InvalidStatusType(JsonKind::String)),
        other => Err(ProblemError::InvalidStatusType(JsonKind::of(other))),
    }
}

// Floats truncate toward zero; `as` saturates out-of-range values.
#[allow(clippy::cast_possible_truncation)]
fn status_from_number(n: &Number) -> i64 {
    if let Some(i) = n.as_i64() {
        return i;
    }
    if let Some(u) = n.as_u64() {
        return i64::try_from(u).unwrap_or(i64::MAX);
    }
    n.as_f64().map_or(0, |f| f as i64)
}

impl Serialize for Problem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let map = self
            .to_map()
            .map_err(<S::Error as serde::ser::Error>::custom)?;
        map.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Problem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Self::from_map(map).map_err(serde::de::Error::custom)
    }
}

impl FromStr for Problem {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

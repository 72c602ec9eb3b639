//! RFC 7807 problem record (pure data model, no HTTP framework dependencies)

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ProblemDetailsError;

/// Standard problem fields in the order RFC 7807 defines them.
pub const STANDARD_FIELDS: [&str; 5] = ["type", "title", "status", "detail", "instance"];

/// Insertion-ordered extension members of a problem record.
///
/// Values are reduced to [`serde_json::Value`] when inserted, so anything
/// that serializes to JSON (dates, decimals, nested structs, ...) can be
/// carried without the encoders knowing about it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extensions(Map<String, Value>);

impl Extensions {
    #[must_use]
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Insert a serializable value under `key`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemDetailsError::Extension`] if `value` cannot be
    /// represented as JSON (e.g. a map with non-string keys).
    pub fn insert<T>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Option<Value>, ProblemDetailsError>
    where
        T: Serialize + ?Sized,
    {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => Ok(self.0.insert(key, value)),
            Err(source) => Err(ProblemDetailsError::Extension { key, source }),
        }
    }

    /// Insert an already reduced JSON value.
    pub fn insert_value(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Extensions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Extensions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Extensions {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// RFC 7807 problem record as produced by an adapter.
///
/// Every standard field is optional; only the fields that are set end up in
/// the rendered document.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct ProblemDetails {
    /// A URI reference that identifies the problem type.
    pub type_url: Option<String>,
    /// A short, human-readable summary of the problem type.
    pub title: Option<String>,
    /// The HTTP status code for this occurrence of the problem.
    pub status: Option<u16>,
    /// A human-readable explanation specific to this occurrence of the problem.
    pub detail: Option<String>,
    /// A URI reference that identifies the specific occurrence of the problem.
    pub instance: Option<String>,
    /// Domain-specific extension members.
    pub extensions: Extensions,
}

impl ProblemDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = Some(type_url.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_instance(mut self, uri: impl Into<String>) -> Self {
        self.instance = Some(uri.into());
        self
    }

    /// Add an extension member.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemDetailsError::Extension`] if `value` is not
    /// JSON-encodable.
    pub fn with_extension<T>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self, ProblemDetailsError>
    where
        T: Serialize + ?Sized,
    {
        self.extensions.insert(key, value)?;
        Ok(self)
    }

    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    #[must_use]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }

    /// Split the record into its standard fields (in [`STANDARD_FIELDS`]
    /// order) and its extensions.
    pub(crate) fn into_parts(self) -> ([(&'static str, Option<Value>); 5], Extensions) {
        let fields = [
            ("type", self.type_url.map(Value::from)),
            ("title", self.title.map(Value::from)),
            ("status", self.status.map(Value::from)),
            ("detail", self.detail.map(Value::from)),
            ("instance", self.instance.map(Value::from)),
        ];
        (fields, self.extensions)
    }
}

/// Errors that know their own problem details and need no adapter.
pub trait AsProblemDetails {
    fn as_problem_details(&self) -> ProblemDetails;
}

//! Normalization of arbitrary errors into problem documents

use std::error::Error;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::FALLBACK_STATUS;
use crate::registry::ProblemLookup;
use crate::warning::{Anomaly, ProblemLog};

/// Flat, ordered mapping of problem fields ready for encoding.
///
/// Holds only the fields that are actually present; there is never a `null`
/// placeholder for a missing standard field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProblemDocument(Map<String, Value>);

impl ProblemDocument {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn status(&self) -> Option<&Value> {
        self.0.get("status")
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
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ProblemDocument {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<'a> IntoIterator for &'a ProblemDocument {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Normalize `error` into a problem document.
///
/// With an adapter, the record's extensions are copied first and the
/// standard fields present on the record are laid over them. A colliding
/// extension key is reported; its value survives only when the record leaves
/// that standard field unset. Without an adapter, a
/// minimal document is synthesized: status 500, the error's message as
/// `detail` and its category title as `title`, each only when non-blank.
pub fn normalize(
    error: &(dyn Error + 'static),
    lookup: &dyn ProblemLookup,
    log: &dyn ProblemLog,
) -> ProblemDocument {
    let Some(record) = lookup.lookup(error) else {
        return fallback(error, lookup);
    };

    let (fields, extensions) = record.into_parts();
    let mut data = extensions.into_map();
    for (name, value) in fields {
        if data.contains_key(name) {
            log.warn(&Anomaly::ExtensionFieldCollision {
                key: name.to_owned(),
            });
        }
        if let Some(value) = value {
            data.insert(name.to_owned(), value);
        }
    }
    ProblemDocument(data)
}

fn fallback(error: &(dyn Error + 'static), lookup: &dyn ProblemLookup) -> ProblemDocument {
    let mut data = Map::new();
    data.insert("status".to_owned(), Value::from(FALLBACK_STATUS.as_u16()));

    let message = error.to_string();
    let detail = message.trim();
    if !detail.is_empty() {
        data.insert("detail".to_owned(), Value::from(detail));
    }

    if let Some(title) = lookup
        .category_title(error)
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        data.insert("title".to_owned(), Value::from(title));
    }

    ProblemDocument(data)
}

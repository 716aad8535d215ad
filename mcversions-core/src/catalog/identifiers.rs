//! Identifiers already known to a catalog

use std::collections::HashSet;

use super::CatalogEntry;
use crate::error::CatalogError;

/// Version identifiers recorded in a catalog (`name`s plus differing `id`s)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownIdentifiers {
    ids: HashSet<String>,
}

impl KnownIdentifiers {
    pub fn contains(&self, identifier: &str) -> bool {
        self.ids.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for KnownIdentifiers {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Collect the identifiers a catalog already covers
///
/// Every entry with a `name` contributes it, plus its `id` when that
/// differs. Entries without a `name` contribute nothing.
///
/// A malformed catalog is reported as an error rather than an empty set:
/// an empty set would make every remote version look new.
pub fn extract_identifiers(entries: &[CatalogEntry]) -> Result<KnownIdentifiers, CatalogError> {
    let mut ids = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let object = entry.as_object().ok_or_else(|| {
            malformed(index, format!("expected an object, found {}", kind_of(entry)))
        })?;

        let Some(name) = object.get("name") else {
            continue;
        };
        let name = name
            .as_str()
            .ok_or_else(|| malformed(index, format!("`name` is {}", kind_of(name))))?;
        ids.insert(name.to_string());

        if let Some(id) = object.get("id") {
            let id = id
                .as_str()
                .ok_or_else(|| malformed(index, format!("`id` is {}", kind_of(id))))?;
            if id != name {
                ids.insert(id.to_string());
            }
        }
    }

    Ok(KnownIdentifiers { ids })
}

fn malformed(index: usize, reason: String) -> CatalogError {
    let err = CatalogError::MalformedEntry { index, reason };
    tracing::error!("{}", err);
    err
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_only() {
        let entries = vec![json!({"name": "1.20"}), json!({"name": "1.21"})];
        let known = extract_identifiers(&entries).unwrap();

        assert_eq!(known.len(), 2);
        assert!(known.contains("1.20"));
        assert!(known.contains("1.21"));
    }

    #[test]
    fn test_id_included_when_different() {
        let entries = vec![json!({"name": "1.21", "id": "21w01a"})];
        let known = extract_identifiers(&entries).unwrap();

        assert_eq!(known.len(), 2);
        assert!(known.contains("1.21"));
        assert!(known.contains("21w01a"));
    }

    #[test]
    fn test_id_equal_to_name_counted_once() {
        let entries = vec![json!({"name": "1.20.4", "id": "1.20.4"})];
        let known = extract_identifiers(&entries).unwrap();

        assert_eq!(known.len(), 1);
        assert!(known.contains("1.20.4"));
    }

    #[test]
    fn test_entries_without_name_are_skipped() {
        // Older runs wrote `{"id": ...}` when a download failed
        let entries = vec![json!({"id": "23w31a"}), json!({"name": "23w32a"})];
        let known = extract_identifiers(&entries).unwrap();

        assert_eq!(known.len(), 1);
        assert!(!known.contains("23w31a"));
        assert!(known.contains("23w32a"));
    }

    #[test]
    fn test_empty_catalog() {
        let known = extract_identifiers(&[]).unwrap();
        assert!(known.is_empty());
    }

    #[test]
    fn test_non_object_entry_is_an_error() {
        let entries = vec![json!({"name": "1.20"}), json!("1.21")];
        let err = extract_identifiers(&entries).unwrap_err();

        match err {
            CatalogError::MalformedEntry { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("a string"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_string_name_is_an_error() {
        let entries = vec![json!({"name": 120})];
        let err = extract_identifiers(&entries).unwrap_err();
        assert!(matches!(err, CatalogError::MalformedEntry { index: 0, .. }));
    }

    #[test]
    fn test_from_iterator() {
        let known: KnownIdentifiers = ["1.20", "1.21"].into_iter().collect();
        assert!(known.contains("1.20"));
        assert_eq!(known.iter().count(), 2);
    }
}

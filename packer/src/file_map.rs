//! File map parsing and validation.
//!
//! Callers hand over either a ready-made mapping or a serialized JSON blob;
//! both resolve once into a canonical [`FileMap`] here, so nothing
//! downstream dispatches on the input form. Keys are relative paths, values
//! are UTF-8 text content. Path safety is enforced later, at staging time,
//! by [`crate::sanitize`].

use crate::error::{PackError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

/// Untrusted file map input, before validation.
///
/// # Examples
///
/// ```
/// use wharf_packer::file_map::{FileMap, FileMapInput};
///
/// let input = FileMapInput::from(r##"{"README.md": "# Demo\n"}"##);
/// let map = FileMap::parse(input).unwrap();
/// assert_eq!(map.get("README.md"), Some("# Demo\n"));
/// ```
#[derive(Debug, Clone)]
pub enum FileMapInput {
    /// A JSON object mapping relative paths to content.
    Mapping(serde_json::Map<String, Value>),
    /// A serialized JSON text blob, parsed on demand.
    Text(String),
}

impl From<&str> for FileMapInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for FileMapInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<BTreeMap<String, String>> for FileMapInput {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        )
    }
}

/// A validated mapping from relative path to UTF-8 text content.
///
/// Iteration order is the sorted key order, which makes staging and archive
/// entry order deterministic for a given map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap(BTreeMap<String, String>);

impl FileMap {
    /// Resolve untrusted input into a canonical string-to-string mapping.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidJson`] if text input is not valid JSON,
    /// or [`PackError::InvalidFileMap`] if the input (or the parsed text)
    /// is not an object with string values. The offending key is named in
    /// the error.
    pub fn parse(input: FileMapInput) -> Result<Self> {
        match input {
            FileMapInput::Mapping(object) => Self::from_object(object),
            FileMapInput::Text(text) => {
                let value: Value = serde_json::from_str(&text)?;
                match value {
                    Value::Object(object) => Self::from_object(object),
                    other => Err(PackError::InvalidFileMap {
                        reason: format!(
                            "file map JSON must be an object, got {}",
                            json_type_name(&other)
                        ),
                    }),
                }
            }
        }
    }

    /// Validate that every value in the object is a string.
    fn from_object(object: serde_json::Map<String, Value>) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (key, value) in object {
            match value {
                Value::String(content) => {
                    entries.insert(key, content);
                }
                other => {
                    return Err(PackError::InvalidFileMap {
                        reason: format!(
                            "value for key \"{key}\" must be a string, got {}",
                            json_type_name(&other)
                        ),
                    });
                }
            }
        }
        Ok(Self(entries))
    }

    /// Look up the content for a relative path.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(relative_path, content)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// Human-readable JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_mapping() -> FileMapInput {
        let mut entries = BTreeMap::new();
        entries.insert("src/main.py".to_owned(), "print('hello')\n".to_owned());
        entries.insert("README.md".to_owned(), "# Demo\n".to_owned());
        FileMapInput::from(entries)
    }

    #[test]
    fn parses_native_mapping() {
        let map = FileMap::parse(sample_mapping()).expect("valid mapping");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("src/main.py"), Some("print('hello')\n"));
    }

    #[test]
    fn parses_json_text() {
        let input = FileMapInput::from(r#"{"a.txt": "A\n", "dir/b.txt": "B\n"}"#);
        let map = FileMap::parse(input).expect("valid JSON object");
        assert_eq!(map.get("dir/b.txt"), Some("B\n"));
    }

    #[test]
    fn rejects_invalid_json_text() {
        let result = FileMap::parse(FileMapInput::from("{not valid json}"));
        assert!(matches!(result, Err(PackError::InvalidJson { .. })));
    }

    #[rstest]
    #[case::array("[1, 2, 3]")]
    #[case::number("42")]
    #[case::string("\"just text\"")]
    fn rejects_non_object_json(#[case] text: &str) {
        let result = FileMap::parse(FileMapInput::from(text));
        assert!(matches!(result, Err(PackError::InvalidFileMap { .. })));
    }

    #[test]
    fn rejects_non_string_value_and_names_the_key() {
        let input = FileMapInput::from(r#"{"a.txt": 123}"#);
        let result = FileMap::parse(input);
        match result {
            Err(PackError::InvalidFileMap { reason }) => {
                assert!(reason.contains("a.txt"));
                assert!(reason.contains("a number"));
            }
            other => panic!("expected InvalidFileMap, got {other:?}"),
        }
    }

    #[test]
    fn iterates_in_sorted_key_order() {
        let map = FileMap::parse(sample_mapping()).expect("valid mapping");
        let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["README.md", "src/main.py"]);
    }
}

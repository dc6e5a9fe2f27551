//! Project name newtype for archive and staging-directory naming.
//!
//! Validates that the value is a non-empty string usable as a single path
//! component: no forward or backward slashes, and no `..` substring
//! anywhere. The substring check is stricter than per-segment checking on
//! purpose; the name must never widen into a multi-level path.

use crate::error::{PackError, Result};
use std::fmt;

/// A validated project name.
///
/// The name becomes the staging directory name, the archive filename stem,
/// and the top-level directory inside the archive.
///
/// # Examples
///
/// ```
/// use wharf_packer::project_name::ProjectName;
///
/// let name: ProjectName = "demo".try_into().unwrap();
/// assert_eq!(name.as_str(), "demo");
/// assert!(ProjectName::try_from("a/b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Return the archive filename for this project (`<name>.zip`).
    #[must_use]
    pub fn archive_filename(&self) -> String {
        format!("{}.zip", self.0)
    }
}

impl TryFrom<&str> for ProjectName {
    type Error = PackError;

    fn try_from(value: &str) -> Result<Self> {
        validate_project_name(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for ProjectName {
    type Error = PackError;

    fn try_from(value: String) -> Result<Self> {
        validate_project_name(&value)?;
        Ok(Self(value))
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate that `value` is usable as a single path component.
fn validate_project_name(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PackError::InvalidProjectName {
            name: value.to_owned(),
            reason: "name must not be empty".to_owned(),
        });
    }
    if value.contains('/') || value.contains('\\') {
        return Err(PackError::InvalidProjectName {
            name: value.to_owned(),
            reason: "name must not contain path separators".to_owned(),
        });
    }
    if value.contains("..") {
        return Err(PackError::InvalidProjectName {
            name: value.to_owned(),
            reason: "name must not contain '..'".to_owned(),
        });
    }
    // "." would alias the staging root itself: recreate would wipe the
    // whole root and the archive would be named ".zip".
    if value == "." {
        return Err(PackError::InvalidProjectName {
            name: value.to_owned(),
            reason: "name must not be '.'".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("demo")]
    #[case::hyphenated("my-project")]
    #[case::single_dot_suffix("demo.v2")]
    fn accepts_valid_names(#[case] name: &str) {
        let parsed = ProjectName::try_from(name);
        assert!(parsed.is_ok());
    }

    #[rstest]
    #[case::empty("")]
    #[case::forward_slash("a/b")]
    #[case::backslash("a\\b")]
    #[case::dot_dot("..")]
    #[case::trailing_dot_dot("demo..")]
    #[case::embedded_dot_dot("de..mo")]
    #[case::current_dir(".")]
    fn rejects_invalid_names(#[case] name: &str) {
        let result = ProjectName::try_from(name);
        assert!(matches!(
            result,
            Err(PackError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn archive_filename_appends_zip_suffix() {
        let name = ProjectName::try_from("demo").expect("valid name");
        assert_eq!(name.archive_filename(), "demo.zip");
    }

    #[test]
    fn display_shows_name() {
        let name = ProjectName::try_from("scallion").expect("valid name");
        assert_eq!(format!("{name}"), "scallion");
    }
}

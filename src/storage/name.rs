//! Folder/file name validation and the generated-name scheme.
//!
//! Every name taken from a request path or multipart filename passes
//! through [`validate_name`] before any filesystem path is built, so a
//! folder or file name can never escape the storage root.

use chrono::Utc;

use crate::{FilegateError, Result};

/// Maximum length for a folder or file name (in characters).
pub const MAX_NAME_LENGTH: usize = 255;

/// Validate a folder or file name as a single safe path segment.
///
/// Rejects empty names, over-long names, separators, NUL bytes, and the
/// `.` / `..` traversal segments.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(FilegateError::Validation("name must not be empty".to_string()));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(FilegateError::Validation(format!(
            "name exceeds {MAX_NAME_LENGTH} characters"
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(FilegateError::Validation(
            "name must not contain path separators".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(FilegateError::Validation(
            "name must not contain NUL bytes".to_string(),
        ));
    }

    if name == "." || name == ".." {
        return Err(FilegateError::Validation(
            "name must not be a traversal segment".to_string(),
        ));
    }

    Ok(())
}

/// Build the on-disk name for an upload: `<millis>_<original>`.
pub fn generated_name(timestamp_millis: i64, original: &str) -> String {
    format!("{timestamp_millis}_{original}")
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_accepts_plain_names() {
        assert!(validate_name("ProjectA").is_ok());
        assert!(validate_name("report.pdf").is_ok());
        assert!(validate_name("1712345678901_hello.txt").is_ok());
        assert!(validate_name("日本語ファイル.txt").is_ok());
        assert!(validate_name("with spaces and-dashes_01").is_ok());
    }

    #[test]
    fn test_validate_name_rejects_empty() {
        assert!(validate_name("").is_err());
    }

    #[test]
    fn test_validate_name_rejects_separators() {
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("/etc").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("../escape").is_err());
    }

    #[test]
    fn test_validate_name_rejects_traversal_segments() {
        assert!(validate_name(".").is_err());
        assert!(validate_name("..").is_err());
    }

    #[test]
    fn test_validate_name_allows_inner_dots() {
        // Dots inside a name are not traversal
        assert!(validate_name("archive..old.tar").is_ok());
        assert!(validate_name(".hidden").is_ok());
    }

    #[test]
    fn test_validate_name_rejects_nul() {
        assert!(validate_name("bad\0name").is_err());
    }

    #[test]
    fn test_validate_name_rejects_too_long() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(validate_name(&long).is_err());

        let max = "x".repeat(MAX_NAME_LENGTH);
        assert!(validate_name(&max).is_ok());
    }

    #[test]
    fn test_generated_name_format() {
        assert_eq!(generated_name(1712345678901, "hello.txt"), "1712345678901_hello.txt");
    }

    #[test]
    fn test_now_millis_is_recent() {
        // Sanity check: after 2020, before 2100
        let millis = now_millis();
        assert!(millis > 1_577_836_800_000);
        assert!(millis < 4_102_444_800_000);
    }
}

//! Upload descriptor validation.
//!
//! The repository never receives raw bytes; blob storage happens upstream
//! and hands over a stored-file descriptor. Validation here is therefore
//! limited to the descriptor: extension allowlist and size bounds.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::defaults::MAX_FILE_SIZE_BYTES;

/// Accepted file extensions (case-insensitive).
static ALLOWED_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["pdf", "doc", "docx", "txt", "jpg", "jpeg", "png"]
        .into_iter()
        .collect()
});

/// Result of descriptor validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub allowed: bool,
    pub block_reason: Option<String>,
}

impl ValidationResult {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            block_reason: None,
        }
    }

    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            block_reason: Some(reason.into()),
        }
    }
}

/// Extract the lowercase extension of a file name, if any.
pub fn extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}

/// Derive the stored `file_type` from a file name: the extension,
/// uppercased. `None` when the name has no extension.
pub fn file_type_from_name(file_name: &str) -> Option<String> {
    extension(file_name).map(|e| e.to_uppercase())
}

/// Validate a stored-file descriptor against the extension allowlist and
/// size bounds.
pub fn validate_descriptor(file_name: &str, file_size: i64) -> ValidationResult {
    if file_size <= 0 {
        return ValidationResult::blocked("file size must be greater than zero");
    }
    if file_size > MAX_FILE_SIZE_BYTES {
        return ValidationResult::blocked(format!(
            "file exceeds maximum size of {} bytes",
            MAX_FILE_SIZE_BYTES
        ));
    }

    match extension(file_name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(ext.as_str()) => ValidationResult::allowed(),
        Some(ext) => ValidationResult::blocked(format!(
            "file extension .{} is not allowed (accepted: pdf, doc, docx, txt, jpg, jpeg, png)",
            ext
        )),
        None => ValidationResult::blocked("file name has no extension"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_lowercases() {
        assert_eq!(extension("Notes.PDF"), Some("pdf".to_string()));
    }

    #[test]
    fn test_extension_none_cases() {
        assert_eq!(extension("README"), None);
        assert_eq!(extension(".gitignore"), None);
        assert_eq!(extension("trailing."), None);
    }

    #[test]
    fn test_file_type_uppercased() {
        assert_eq!(file_type_from_name("calc.pdf"), Some("PDF".to_string()));
        assert_eq!(file_type_from_name("scan.jpeg"), Some("JPEG".to_string()));
    }

    #[test]
    fn test_allowed_descriptor() {
        let result = validate_descriptor("calc-notes.pdf", 1_048_576);
        assert!(result.allowed);
        assert!(result.block_reason.is_none());
    }

    #[test]
    fn test_blocked_extension() {
        let result = validate_descriptor("payload.exe", 1024);
        assert!(!result.allowed);
        assert!(result.block_reason.unwrap().contains(".exe"));
    }

    #[test]
    fn test_blocked_oversize() {
        let result = validate_descriptor("huge.pdf", MAX_FILE_SIZE_BYTES + 1);
        assert!(!result.allowed);
    }

    #[test]
    fn test_blocked_zero_size() {
        let result = validate_descriptor("empty.pdf", 0);
        assert!(!result.allowed);
    }

    #[test]
    fn test_size_boundary_is_inclusive() {
        assert!(validate_descriptor("max.pdf", MAX_FILE_SIZE_BYTES).allowed);
    }
}

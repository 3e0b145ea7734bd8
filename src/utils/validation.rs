// file: src/utils/validation.rs
// description: request and input validation helpers
// reference: input validation patterns

use crate::error::{AglaError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_json_file(path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(AglaError::Validation(format!(
                "Path is not a file: {}",
                path.display()
            )));
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(()),
            _ => Err(AglaError::Validation(format!(
                "File is not a JSON file: {}",
                path.display()
            ))),
        }
    }

    pub fn validate_depth(depth: usize, max_depth: usize) -> Result<()> {
        if depth > max_depth {
            return Err(AglaError::Validation(format!(
                "Graph depth {} exceeds maximum of {}",
                depth, max_depth
            )));
        }
        Ok(())
    }

    pub fn validate_not_empty(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(AglaError::InvalidRequest(format!("{} must not be empty", field)));
        }
        Ok(())
    }

    /// Truncate on a character boundary, appending "..." when shortened.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            None => text.to_string(),
            Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_json_file() {
        let temp = TempDir::new().unwrap();
        let json_path = temp.path().join("corpus.json");
        let txt_path = temp.path().join("corpus.txt");
        fs::write(&json_path, "[]").unwrap();
        fs::write(&txt_path, "[]").unwrap();

        assert!(Validator::validate_json_file(&json_path).is_ok());
        assert!(Validator::validate_json_file(&txt_path).is_err());
        assert!(Validator::validate_json_file(Path::new("/nonexistent.json")).is_err());
    }

    #[test]
    fn test_validate_depth() {
        assert!(Validator::validate_depth(2, 5).is_ok());
        assert!(Validator::validate_depth(5, 5).is_ok());
        assert!(Validator::validate_depth(6, 5).is_err());
    }

    #[test]
    fn test_validate_not_empty_is_client_error() {
        let err = Validator::validate_not_empty("response", "  ").unwrap_err();
        assert!(err.is_client_error());
        assert!(Validator::validate_not_empty("response", "ok").is_ok());
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
        assert_eq!(Validator::truncate_text("ééééé", 2), "éé...");
    }
}

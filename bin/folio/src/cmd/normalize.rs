//! Normalize command - flattens a raw CMS response

use std::{fs, path::Path};

use color_eyre::eyre::{Result, WrapErr};
use folio_core::normalize_value;
use serde_json::Value;

/// Normalize the response in `file` and return pretty-printed JSON.
pub fn normalize_file(file: &Path) -> Result<String> {
    let raw = fs::read_to_string(file)
        .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
    let response: Value = serde_json::from_str(&raw)
        .wrap_err_with(|| format!("{} is not valid JSON", file.display()))?;

    let normalized = normalize_value(response);
    tracing::debug!(records = normalized.len(), "normalized response");

    Ok(serde_json::to_string_pretty(&normalized)?)
}

/// Run the normalize command.
pub fn run(file: &Path) -> Result<()> {
    println!("{}", normalize_file(file)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_normalize_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"data":{{"id":3,"attributes":{{"title":"Hi"}}}},"meta":{{}}}}"#
        )
        .unwrap();

        let output: Value = serde_json::from_str(&normalize_file(file.path()).unwrap()).unwrap();
        assert_eq!(output, json!({ "id": 3, "title": "Hi" }));
    }

    #[test]
    fn test_normalize_file_missing() {
        assert!(normalize_file(Path::new("/nonexistent/response.json")).is_err());
    }
}

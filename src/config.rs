//! Exclusion-list configuration.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::gpa::ExclusionSet;

/// Course codes to leave out of the GPA, stored as a JSON array on disk:
/// ```json
/// ["CS1013", "EN1001", "ma2012"]
/// ```
/// Codes are normalized like the `--exclude` flag (trimmed, uppercased).
pub struct ExclusionConfig {
    codes: Vec<String>,
}

impl ExclusionConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read exclusion file {}", path.display()))?;
        let codes: Vec<String> = serde_json::from_str(&content)
            .with_context(|| format!("Exclusion file {} is not a JSON array of course codes", path.display()))?;
        Ok(Self { codes })
    }

    pub fn to_exclusions(&self) -> ExclusionSet {
        self.codes.iter().map(String::as_str).collect()
    }
}

/// Merges the comma-separated `list` with the codes in `file`, if given.
pub fn resolve_exclusions(list: Option<&str>, file: Option<&Path>) -> Result<ExclusionSet> {
    let mut excluded = list.map(ExclusionSet::parse).unwrap_or_default();

    if let Some(path) = file {
        excluded.extend(ExclusionConfig::load(path)?.to_exclusions());
    }

    debug!(count = excluded.len(), "Exclusion list resolved");
    Ok(excluded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_load_exclusion_file() {
        let path = temp_path("gpa_rater_test_exclusions.json");
        fs::write(&path, r#"["cs1013", " EN1001 ", ""]"#).unwrap();

        let excluded = ExclusionConfig::load(&path).unwrap().to_exclusions();
        assert_eq!(excluded.len(), 2);
        assert!(excluded.contains("CS1013"));
        assert!(excluded.contains("EN1001"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_rejects_non_array() {
        let path = temp_path("gpa_rater_test_exclusions_bad.json");
        fs::write(&path, r#"{"CS1013": true}"#).unwrap();

        assert!(ExclusionConfig::load(&path).is_err());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_merges_flag_and_file() {
        let path = temp_path("gpa_rater_test_exclusions_merge.json");
        fs::write(&path, r#"["MA2012"]"#).unwrap();

        let excluded = resolve_exclusions(Some("cs1013,"), Some(&path)).unwrap();
        assert_eq!(excluded.len(), 2);
        assert!(excluded.contains("CS1013"));
        assert!(excluded.contains("MA2012"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_resolve_without_inputs() {
        assert!(resolve_exclusions(None, None).unwrap().is_empty());
    }
}

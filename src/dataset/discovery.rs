// Mon Oct 19 2026 - Alex

use crate::dataset::error::DatasetError;
use std::path::PathBuf;

/// Expands `pattern` into the list of input files, sorted so runs are
/// reproducible regardless of directory iteration order.
pub fn discover_inputs(pattern: &str) -> Result<Vec<PathBuf>, DatasetError> {
    let mut files = Vec::new();

    for entry in glob::glob(pattern)? {
        let path = entry?;
        if path.is_file() {
            files.push(path);
        } else {
            log::debug!("Ignoring non-file match {}", path.display());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_discover_sorted_files_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.parquet"), b"").unwrap();
        fs::write(dir.path().join("a.parquet"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("c.parquet")).unwrap();

        let pattern = format!("{}/*.parquet", dir.path().display());
        let files = discover_inputs(&pattern).unwrap();

        let names: Vec<_> = files.iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.parquet", "b.parquet"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(discover_inputs("data/[*.parquet"), Err(DatasetError::InvalidGlob(_))));
    }
}

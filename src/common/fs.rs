use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;
use zip::ZipArchive;

/// Create the directory if it doesn’t exist; error if a non-directory exists there.
pub(crate) fn ensure_dir_exists(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", path.display());
        }
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))?;
    }
    Ok(())
}

/// Extracts the given `.zip` file to the target directory.
pub(crate) fn extract_zip(zip_path: &Path, dest_dir: &Path) -> Result<()> {
    let file = fs::File::open(zip_path)
        .with_context(|| format!("failed to open {:?}", zip_path))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("failed to read zip archive {:?}", zip_path))?;

    archive
        .extract(dest_dir)
        .with_context(|| format!("failed to extract {:?} to {:?}", zip_path, dest_dir))?;

    Ok(())
}

/// Find the first file under `dir` (recursively, in sorted order) with the given extension.
pub(crate) fn find_file_with_extension(dir: &Path, extension: &str) -> Option<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .find(|path| has_extension(path, extension))
}

/// Case-insensitive extension check.
pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_extension(Path::new("france.SHP"), "shp"));
        assert!(!has_extension(Path::new("france.shx"), "shp"));
        assert!(!has_extension(Path::new("france"), "shp"));
    }

    #[test]
    fn finds_nested_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let nested = dir.path().join("France Data");
        ensure_dir_exists(&nested)?;
        fs::write(nested.join("regions.dbf"), b"")?;
        fs::write(nested.join("regions.shp"), b"")?;

        assert_eq!(find_file_with_extension(dir.path(), "shp"), Some(nested.join("regions.shp")));
        assert_eq!(find_file_with_extension(dir.path(), "prj"), None);
        Ok(())
    }
}

use crate::error::Result;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Extensions a shapefile may own besides `.shp`
const SHAPEFILE_PARTS: [&str; 9] = [
    "shp", "shx", "dbf", "prj", "cpg", "qix", "sbn", "sbx", "shp.xml",
];

/// Remove every file in `dir` named `{base}.*`. Returns how many were removed.
pub fn remove_scratch_files(dir: &Path, base: &str) -> Result<usize> {
    let prefix = format!("{base}.");
    let mut removed = 0;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_scratch = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(&prefix));
        if is_scratch && entry.file_type()?.is_file() {
            debug!("Removing {}", entry.path().display());
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    if removed > 0 {
        info!("Removed {} scratch files", removed);
    }
    Ok(removed)
}

/// Delete a shapefile and its sidecars, leaving other files sharing the stem
/// (such as a GeoTIFF) alone
pub fn remove_shapefile(dir: &Path, stem: &str) -> Result<usize> {
    let mut removed = 0;
    for ext in SHAPEFILE_PARTS {
        let path = dir.join(format!("{stem}.{ext}"));
        if path.is_file() {
            debug!("Removing stale {}", path.display());
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_remove_scratch_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["temp.shp", "temp.shx", "temp.dbf", "temp.prj", "temperature.tif", "M1.tif"] {
            touch(dir.path(), name);
        }

        assert_eq!(remove_scratch_files(dir.path(), "temp").unwrap(), 4);
        assert!(!dir.path().join("temp.shp").exists());
        assert!(dir.path().join("temperature.tif").exists());
        assert!(dir.path().join("M1.tif").exists());
        assert_eq!(remove_scratch_files(dir.path(), "temp").unwrap(), 0);
    }

    #[test]
    fn test_remove_shapefile_keeps_rasters() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["M1_tracking.shp", "M1_tracking.dbf", "M1_tracking.shx", "M1_tracking.tif"] {
            touch(dir.path(), name);
        }

        assert_eq!(remove_shapefile(dir.path(), "M1_tracking").unwrap(), 3);
        assert!(dir.path().join("M1_tracking.tif").exists());
    }
}

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, info, warn};
use serde_json::Value as JsonValue;

use super::model::CourseRecord;
use super::normalize::normalize;
use crate::error::CatalogError;

// ---------------------------------------------------------------------------
// CatalogStore – the full normalized catalog
// ---------------------------------------------------------------------------

/// All course records, in source row order. Replaced wholesale on refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStore {
    records: Vec<CourseRecord>,
}

impl CatalogStore {
    /// Normalize every raw row in order.
    ///
    /// Malformed rows are logged with their raw content and kept in their
    /// partially normalized form; one bad row never drops the batch.
    pub fn rebuild(rows: &[JsonValue]) -> Self {
        let mut records = Vec::with_capacity(rows.len());
        let mut malformed = 0usize;

        for (i, row) in rows.iter().enumerate() {
            match normalize(row) {
                Ok(rec) => records.push(rec),
                Err(err) => {
                    malformed += 1;
                    warn!("row {i}: {err}; raw row: {row}");
                    records.push(err.record);
                }
            }
        }

        info!("Parsed {} classes ({malformed} malformed)", records.len());
        Self { records }
    }

    pub fn from_records(records: Vec<CourseRecord>) -> Self {
        Self { records }
    }

    /// Read a snapshot written by [`CatalogStore::save`].
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CatalogError::CacheMissing(path.to_path_buf()));
            }
            Err(source) => {
                return Err(CatalogError::CacheRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let records: Vec<CourseRecord> =
            serde_json::from_str(&text).map_err(|source| CatalogError::CacheCorrupt {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Read {} cached classes from {}", records.len(), path.display());
        Ok(Self { records })
    }

    /// Write the whole catalog as one snapshot, replacing any previous one.
    ///
    /// The snapshot goes to a sibling temp file first and is renamed into
    /// place, so readers never see a partial file.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let write_err = |source| CatalogError::CacheWrite {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let json = serde_json::to_string(&self.records)
            .map_err(|e| write_err(std::io::Error::new(ErrorKind::InvalidData, e)))?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = Path::new(&tmp);

        fs::write(tmp, json).map_err(write_err)?;
        fs::rename(tmp, path).map_err(write_err)?;

        debug!("Saved {} classes to {}", self.records.len(), path.display());
        Ok(())
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(crn: &str, subject: &str) -> JsonValue {
        json!([
            "1", crn, subject, "1000", "001", "Intro", "Doe", "", "", "", "", "",
            "", "x,y,10:00,10:50,Hall,1,TR", "", "Doe", "", ""
        ])
    }

    #[test]
    fn rebuild_keeps_source_order() {
        let store = CatalogStore::rebuild(&[row("3", "MATH"), row("1", "CS"), row("2", "PHYS")]);
        let crns: Vec<&str> = store.records().iter().map(|r| r.crn.as_str()).collect();
        assert_eq!(crns, vec!["3", "1", "2"]);
    }

    #[test]
    fn malformed_rows_are_kept_not_dropped() {
        let store = CatalogStore::rebuild(&[row("1", "CS"), json!("garbage"), row("2", "CS")]);
        assert_eq!(store.len(), 3);
        assert_eq!(store.records()[1], CourseRecord::default());
        assert_eq!(store.records()[2].crn, "2");
    }

    #[test]
    fn load_of_absent_file_is_cache_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogStore::load(&dir.path().join("classes.json")).unwrap_err();
        assert!(matches!(err, CatalogError::CacheMissing(_)));
    }

    #[test]
    fn load_rejects_non_catalog_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classes.json");
        fs::write(&path, r#"{"aaData": []}"#).unwrap();
        let err = CatalogStore::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::CacheCorrupt { .. }));
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("classes.json");

        CatalogStore::rebuild(&[row("1", "CS"), row("2", "CS")]).save(&path).unwrap();
        let second = CatalogStore::rebuild(&[row("9", "ART")]);
        second.save(&path).unwrap();

        let loaded = CatalogStore::load(&path).unwrap();
        assert_eq!(loaded, second);
        assert!(!dir.path().join("nested").join("classes.json.tmp").exists());
    }
}

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;
use crate::data::filter::{apply, FilterCriteria};
use crate::data::store::CatalogStore;
use crate::error::CatalogError;
use crate::fetch::CatalogSource;
use crate::session::FilterSession;
use crate::ui::prompt::TerminalPrompt;
use crate::ui::report::write_results;

// ---------------------------------------------------------------------------
// Catalog bootstrap
// ---------------------------------------------------------------------------

/// Pull the catalog, normalize it and write a fresh snapshot.
pub fn refresh_catalog(config: &Config, source: &dyn CatalogSource) -> Result<CatalogStore> {
    let rows = source.pull()?;
    let store = CatalogStore::rebuild(&rows);
    store.save(&config.cache_path)?;
    Ok(store)
}

/// Use the cached snapshot, building it first if there is none.
pub fn load_or_refresh(config: &Config, source: &dyn CatalogSource) -> Result<CatalogStore> {
    match CatalogStore::load(&config.cache_path) {
        Ok(store) => Ok(store),
        Err(CatalogError::CacheMissing(path)) => {
            info!("No cached classes at {}, building cache", path.display());
            refresh_catalog(config, source)
        }
        Err(e) => Err(anyhow::Error::new(e).context("loading cached classes")),
    }
}

// ---------------------------------------------------------------------------
// Interactive loop
// ---------------------------------------------------------------------------

/// The interactive tool: collect filters, print matches, optionally refine.
pub struct App<R, W> {
    store: CatalogStore,
    prompt: TerminalPrompt<R, W>,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(store: CatalogStore, input: R, output: W) -> Self {
        Self {
            store,
            prompt: TerminalPrompt::new(input, output),
        }
    }

    /// Runs searches until the user declines to refine. Returns the last
    /// criteria applied.
    pub fn run<O: Write>(&mut self, results_out: &mut O) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria::new();
        loop {
            criteria = FilterSession::resume(criteria).run(&mut self.prompt)?;

            let results = apply(&self.store, &criteria);
            info!("{} of {} classes match", results.len(), self.store.len());
            write_results(results_out, &results).context("printing results")?;

            if !self.prompt.confirm("Refine this search?")? {
                return Ok(criteria);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CourseRecord;
    use serde_json::{json, Value as JsonValue};
    use std::cell::Cell;
    use std::io::Cursor;

    struct CountingSource {
        rows: Vec<JsonValue>,
        pulls: Cell<usize>,
    }

    impl CatalogSource for CountingSource {
        fn pull(&self) -> Result<Vec<JsonValue>, CatalogError> {
            self.pulls.set(self.pulls.get() + 1);
            Ok(self.rows.clone())
        }
    }

    struct FailingSource;

    impl CatalogSource for FailingSource {
        fn pull(&self) -> Result<Vec<JsonValue>, CatalogError> {
            Err(CatalogError::fetch("http://example.invalid", "connection refused"))
        }
    }

    fn config_in(dir: &tempfile::TempDir) -> Config {
        Config {
            cache_path: dir.path().join("classes.json"),
            ..Config::default()
        }
    }

    fn source() -> CountingSource {
        CountingSource {
            rows: vec![json!(["1", "111", "CS"]), json!(["2", "222", "MATH"])],
            pulls: Cell::new(0),
        }
    }

    #[test]
    fn missing_cache_is_built_once() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(&dir);
        let src = source();

        let first = load_or_refresh(&cfg, &src).unwrap();
        let second = load_or_refresh(&cfg, &src).unwrap();

        assert_eq!(src.pulls.get(), 1);
        assert_eq!(first, second);
        assert!(cfg.cache_path.exists());
    }

    #[test]
    fn fetch_failure_surfaces() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_or_refresh(&config_in(&dir), &FailingSource).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn corrupt_cache_is_not_silently_rebuilt() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config_in(&dir);
        std::fs::write(&cfg.cache_path, "not json").unwrap();
        let src = source();
        assert!(load_or_refresh(&cfg, &src).is_err());
        assert_eq!(src.pulls.get(), 0);
    }

    #[test]
    fn refine_keeps_earlier_filters() {
        let store = CatalogStore::from_records(vec![
            CourseRecord {
                crn: "1".into(),
                subject: "CS".into(),
                room: "120".into(),
                ..Default::default()
            },
            CourseRecord {
                crn: "2".into(),
                subject: "CS".into(),
                room: "204".into(),
                ..Default::default()
            },
        ]);
        // subject=cs, apply, refine: room=204, apply, stop
        let input = "4\ncs\n8\ny\n2\n204\n8\nn\n";
        let mut app = App::new(store, Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let mut results = Vec::new();

        let criteria = app.run(&mut results).unwrap();

        assert_eq!(criteria.len(), 2);
        let text = String::from_utf8(results).unwrap();
        assert!(text.contains("2 classes found"));
        assert!(text.ends_with("1 class found\n"));
    }
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use crate::error::CatalogError;

/// ureq 2 always bounds the connect phase, so it gets a day. Reads and
/// writes are left unbounded; a stalled endpoint stalls the run.
const CONNECT_TIMEOUT_MS: u64 = 24 * 60 * 60 * 1000;
/// How much of an error body to keep in a diagnostic.
const BODY_EXCERPT: usize = 200;

/// Somewhere raw catalog rows can be pulled from.
pub trait CatalogSource {
    fn pull(&self) -> Result<Vec<JsonValue>, CatalogError>;
}

#[derive(Deserialize)]
struct Payload {
    #[serde(rename = "aaData")]
    rows: Vec<JsonValue>,
}

/// Decode a catalog response body into its raw rows.
pub fn parse_payload(body: &str, origin: &str) -> Result<Vec<JsonValue>, CatalogError> {
    serde_json::from_str::<Payload>(body)
        .map(|p| p.rows)
        .map_err(|e| CatalogError::fetch(origin, format!("unexpected response shape: {e}")))
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

pub struct HttpSource {
    url: Url,
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(url: Url) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_millis(CONNECT_TIMEOUT_MS))
            .build();
        Self { url, agent }
    }
}

impl CatalogSource for HttpSource {
    fn pull(&self) -> Result<Vec<JsonValue>, CatalogError> {
        info!("Fetching classes");
        let url = self.url.as_str();
        let body = match self.agent.get(url).call() {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| CatalogError::fetch(url, e))?,
            Err(ureq::Error::Status(code, resp)) => {
                let text = resp.into_string().unwrap_or_default();
                let excerpt: String = text.chars().take(BODY_EXCERPT).collect();
                return Err(CatalogError::fetch(url, format!("HTTP {code}: {excerpt}")));
            }
            Err(err) => return Err(CatalogError::fetch(url, err)),
        };

        let rows = parse_payload(&body, url)?;
        info!("Fetched {} classes", rows.len());
        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// Local payload file
// ---------------------------------------------------------------------------

/// A payload saved to disk in the same shape the endpoint returns.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for FileSource {
    fn pull(&self) -> Result<Vec<JsonValue>, CatalogError> {
        let origin = self.path.display().to_string();
        let body =
            std::fs::read_to_string(&self.path).map_err(|e| CatalogError::fetch(&origin, e))?;
        parse_payload(&body, &origin)
    }
}

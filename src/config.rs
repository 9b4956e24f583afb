use std::path::PathBuf;

use url::Url;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_ENDPOINT: &str = "https://classnav.ou.edu/index_ajax.php";
pub const DEFAULT_SEMESTER: &str = "202220";
pub const DEFAULT_CACHE_FILE: &str = "classes.json";

/// Fixed query parameters sent with every catalog request, in order.
const FIXED_QUERY: &[(&str, &str)] = &[
    ("iColumns", "18"),
    ("iDisplayLength", "30"),
    ("subject", "all"),
    ("schedule", "all"),
    ("delivery", "all"),
    ("term", "all"),
    ("available", "false"),
    ("waitlist", "false"),
];

/// Where the catalog comes from and where its snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: String,
    pub semester: String,
    pub cache_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            semester: DEFAULT_SEMESTER.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
        }
    }
}

impl Config {
    /// Full catalog URL for the configured semester, query values encoded.
    pub fn catalog_url(&self) -> Result<Url, url::ParseError> {
        let mut pairs: Vec<(&str, &str)> = FIXED_QUERY.to_vec();
        pairs.insert(2, ("semester", self.semester.as_str()));
        Url::parse_with_params(&self.endpoint, pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_matches_live_endpoint() {
        let cfg = Config::default();
        assert_eq!(
            cfg.catalog_url().unwrap().as_str(),
            "https://classnav.ou.edu/index_ajax.php?iColumns=18&iDisplayLength=30\
             &semester=202220&subject=all&schedule=all&delivery=all&term=all\
             &available=false&waitlist=false"
        );
    }

    #[test]
    fn semester_is_configurable() {
        let cfg = Config {
            semester: "202310".into(),
            ..Config::default()
        };
        assert!(cfg.catalog_url().unwrap().as_str().contains("&semester=202310&"));
    }

    #[test]
    fn semester_value_is_encoded_not_spliced() {
        let cfg = Config {
            semester: "2022 20&term=x".into(),
            ..Config::default()
        };
        let url = cfg.catalog_url().unwrap();
        assert!(!url.as_str().contains(' '));
        let terms: Vec<_> = url.query_pairs().filter(|(k, _)| k == "term").collect();
        assert_eq!(terms.len(), 1);
        let semester = url.query_pairs().find(|(k, _)| k == "semester").map(|(_, v)| v);
        assert_eq!(semester.as_deref(), Some("2022 20&term=x"));
    }

    #[test]
    fn invalid_endpoint_is_an_error() {
        let cfg = Config {
            endpoint: "not a url".into(),
            ..Config::default()
        };
        assert!(cfg.catalog_url().is_err());
    }
}

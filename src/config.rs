//! Runtime configuration.
//!
//! The dashboard has exactly two knobs: where the sampling dataset lives and
//! the (optional) map-styling access token. Both come from the environment;
//! the CLI can override them with flags.

use std::fmt;
use std::path::PathBuf;

/// Published sampling dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/hidabril/ISOTOPOS_BOGOTA_SUB/main/Base_PGW_FULL.csv";

/// Environment variable holding the dataset URL or file path.
pub const DATASET_ENV: &str = "ISOTOPOS_DATASET";

/// Environment variable holding the map-styling access token.
pub const MAPBOX_TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Where the dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// Remote delimited file fetched over HTTP(S).
    Url(String),
    /// Local delimited file.
    Path(PathBuf),
}

impl DatasetSource {
    /// `http://` and `https://` locations are URLs, anything else is a path.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DatasetSource::Url(s.to_string())
        } else {
            DatasetSource::Path(PathBuf::from(s))
        }
    }
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Url(DEFAULT_DATASET_URL.to_string())
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Url(u) => f.write_str(u),
            DatasetSource::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub dataset: DatasetSource,
    pub mapbox_token: Option<String>,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from any key lookup (the environment in
    /// production, a map in tests). Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let dataset = non_blank(DATASET_ENV)
            .map(|s| DatasetSource::parse(&s))
            .unwrap_or_default();
        let mapbox_token = non_blank(MAPBOX_TOKEN_ENV).map(|s| s.trim().to_string());
        Self {
            dataset,
            mapbox_token,
        }
    }
}

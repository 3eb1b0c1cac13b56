//! Dataset loader for the groundwater sampling table.
//!
//! The table is read exactly once at startup, from a remote URL or a local
//! file, and is then shared read-only for the lifetime of the process.
//! There are no retries: any failure is returned as a [`LoadError`] and the
//! caller is expected to abort.
//!
//! Typical usage:
//! ```no_run
//! # use isotopos::{DatasetLoader, config::DatasetSource};
//! let loader = DatasetLoader::new()?;
//! let dataset = loader.load(&DatasetSource::default())?;
//! println!("{} samples", dataset.len());
//! # Ok::<(), isotopos::LoadError>(())
//! ```

use crate::config::DatasetSource;
use crate::error::LoadError;
use crate::models::{REQUIRED_COLUMNS, SampleRecord, Selection};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

/// Immutable, cheaply clonable view of the loaded records.
#[derive(Debug, Clone)]
pub struct Dataset {
    origin: Arc<str>,
    records: Arc<[SampleRecord]>,
}

impl Dataset {
    /// Wrap already-parsed records. Fails on an empty table.
    pub fn new(origin: impl Into<String>, records: Vec<SampleRecord>) -> Result<Self, LoadError> {
        let origin: String = origin.into();
        if records.is_empty() {
            return Err(LoadError::Empty { origin });
        }
        Ok(Self {
            origin: origin.into(),
            records: records.into(),
        })
    }

    /// Parse a delimited table with a header row.
    pub fn from_reader<R: Read>(origin: &str, rdr: R) -> Result<Self, LoadError> {
        let csv_err = |source| LoadError::Csv {
            origin: origin.to_string(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);

        let headers = reader.headers().map_err(csv_err)?.clone();
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !headers.iter().any(|h| h == **c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns {
                origin: origin.to_string(),
                missing,
            });
        }

        let records = reader
            .deserialize::<SampleRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)?;

        Self::new(origin, records)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&SampleRecord> {
        self.records.get(index)
    }

    /// Records referenced by `selection`, or every record when it is empty.
    /// Out-of-range positions are skipped.
    pub fn select<'a>(
        &'a self,
        selection: &'a Selection,
    ) -> Box<dyn Iterator<Item = &'a SampleRecord> + 'a> {
        if selection.is_empty() {
            Box::new(self.records.iter())
        } else {
            Box::new(selection.indices().iter().filter_map(|&i| self.records.get(i)))
        }
    }

    /// Count of records per categorical type, sorted by type name.
    pub fn kind_counts(&self) -> Vec<(String, usize)> {
        let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
        for r in self.records.iter() {
            *counts.entry(r.kind.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(k, n)| (k.to_string(), n))
            .collect()
    }
}

/// Blocking loader. Holds the HTTP client used for remote sources.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    http: HttpClient,
}

impl DatasetLoader {
    pub fn new() -> Result<Self, LoadError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("isotopos/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(LoadError::Client)?;
        Ok(Self { http })
    }

    /// Load the dataset from `source`. One read, no retries.
    pub fn load(&self, source: &DatasetSource) -> Result<Dataset, LoadError> {
        let dataset = match source {
            DatasetSource::Url(url) => self.fetch_url(url)?,
            DatasetSource::Path(path) => {
                let origin = path.display().to_string();
                let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
                    path: origin.clone(),
                    source,
                })?;
                Dataset::from_reader(&origin, file)?
            }
        };
        log::info!("loaded {} samples from {}", dataset.len(), dataset.origin());
        Ok(dataset)
    }

    fn fetch_url(&self, url: &str) -> Result<Dataset, LoadError> {
        log::debug!("GET {}", url);
        let resp = self.http.get(url).send().map_err(|source| LoadError::Http {
            url: url.to_string(),
            source,
        })?;
        if !resp.status().is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: resp.status(),
            });
        }
        let body = resp.bytes().map_err(|source| LoadError::Http {
            url: url.to_string(),
            source,
        })?;
        Dataset::from_reader(url, body.as_ref())
    }
}

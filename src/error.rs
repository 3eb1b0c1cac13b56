use thiserror::Error;

/// Failures while loading the sampling dataset. All of them are fatal at
/// startup: the dashboard has nothing to show without the dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),

    #[error("GET {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed csv in {origin}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("{origin} is missing required column(s): {}", .missing.join(", "))]
    MissingColumns { origin: String, missing: Vec<String> },

    #[error("{origin} contains no sample records")]
    Empty { origin: String },
}

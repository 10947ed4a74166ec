use thiserror::Error;

/// Failure taxonomy for the choropleth pipeline.
///
/// Every way the pipeline can fail is a named variant so callers can
/// branch on it; the binary wraps these with `anyhow` context on the way
/// out.
#[derive(Error, Debug)]
pub enum ChoroplethError {
    /// Could not build the shared HTTP client.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// Transport-level fetch failure: connect, TLS, timeout, or body read.
    #[error("request for {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The remote answered with a non-success status code.
    #[error("request for {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body was not the JSON document we expected.
    #[error("malformed JSON from {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The topology has no object collection under the requested name.
    #[error("topology has no object named {0:?}")]
    UnknownObject(String),

    /// A ring referenced an arc outside the topology's arc table.
    #[error("arc index {0} outside the topology's arc table")]
    ArcOutOfRange(i32),

    /// A drawable feature arrived without a usable identifier.
    #[error("feature {index} in topology object {object:?} carries no id")]
    MissingFeatureId { object: String, index: usize },

    /// Join miss: a geometry identifier absent from the attainment index.
    #[error("unknown county identifier {0}")]
    UnknownCounty(u32),

    /// The education dataset decoded to zero records.
    #[error("education dataset contains no records")]
    EmptyDataset,

    /// Nothing drawable came out of the topology.
    #[error("no drawable geometry in the topology")]
    EmptyTopology,

    /// The observed value range collapsed to a point; no buckets fit.
    #[error("degenerate attainment range: every value is {0}")]
    DegenerateRange(f64),

    /// No sequential palette with that many buckets.
    #[error("no {0}-bucket palette available (3 through 9 are)")]
    PaletteSize(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Type alias for results using [`ChoroplethError`].
pub type Result<T> = std::result::Result<T, ChoroplethError>;

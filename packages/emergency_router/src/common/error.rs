//! Error types shared by the loading and routing layers. Every routing error
//! is recoverable: the API reports it to the user and carries on serving.

use thiserror::Error;

/// Everything which can go wrong while loading a graph or planning a route
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A node index or coordinate could not be resolved to a graph node
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// The destination cannot be reached from the origin under the current
    /// edge weights
    #[error("no path found from node {from} to node {to}")]
    NoPathFound { from: usize, to: usize },

    /// The route has no edges to sum over
    #[error("route has fewer than two nodes")]
    EmptyRoute,

    #[error("edge {0} not found in graph")]
    EdgeNotFound(usize),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unable to render query: {0}")]
    Query(#[from] aho_corasick::BuildError),

    #[error("route planning task failed: {0}")]
    Task(String),
}

pub type RoutingResult<T> = Result<T, RoutingError>;

/// Problems with the service configuration, reported once at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

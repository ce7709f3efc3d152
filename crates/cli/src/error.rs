use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("malformed request envelope: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Catalogue(#[from] transit_catalogue::catalogue::Error),
    #[error(transparent)]
    Graph(#[from] transit_catalogue::routing::transport_graph::Error),
    #[error(transparent)]
    Persistence(#[from] transit_catalogue::persistence::Error),
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

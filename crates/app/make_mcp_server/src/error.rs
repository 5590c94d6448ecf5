use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] make_core::ConfigError),

    #[error("Make API error: {0}")]
    Make(#[from] make_core::MakeError),

    #[error(transparent)]
    Discovery(#[from] make_mcp::registry::DiscoveryError),

    #[error(transparent)]
    Serve(#[from] make_mcp::ServeError),

    #[error("Json::{:?}: {}", .0, .0)]
    Json(#[from] serde_json::Error),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),
}

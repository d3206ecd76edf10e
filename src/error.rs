use thiserror::Error;

#[derive(Error, Debug)]
pub enum StargazerError {
    #[error("authentication error: {0}")]
    Auth(String),

    #[error("GitHub API rate limit exceeded, retry after {0}s")]
    RateLimited(u64),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, StargazerError>;

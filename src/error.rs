use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid selector: {0}")]
    ParseInvalidSelector(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Browser Error: {0}")]
    Browser(String),

    #[error("Invalid URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Csv Error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub(crate) fn browser(context: &str, err: impl std::fmt::Display) -> Self {
        Error::Browser(format!("{context}: {err}"))
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("bundled asset not found: {0}")]
    MissingAsset(String),

    #[error("invalid JSON in {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn json(name: &str, source: serde_json::Error) -> Self {
        Error::Json {
            name: name.to_string(),
            source,
        }
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration: {0}")]
    Config(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("transport: {0}")]
    Http(#[from] reqwest::Error),

    #[error("telegram api error {code}: {description}")]
    Telegram { code: i64, description: String },

    /// Another process is polling getUpdates with the same token.
    #[error("conflicting bot instance detected")]
    Conflict,

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0} is missing in .env")]
    MissingConfig(&'static str),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("quote request for region {region} failed with status {status}")]
    QuoteStatus {
        region: String,
        status: reqwest::StatusCode,
    },

    #[error("notification webhook returned status {0}")]
    WebhookStatus(reqwest::StatusCode),
}

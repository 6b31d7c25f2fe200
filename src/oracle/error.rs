use thiserror::Error;

/// Shown to the user for every oracle failure. The specific cause goes to the logs.
pub const USER_FACING_MESSAGE: &str =
    "Unable to analyze content at this moment. Please check your connection.";

#[derive(Error, Debug)]
pub enum OracleError {
    #[error("Oracle request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Oracle returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Oracle returned no content")]
    EmptyResponse,

    #[error("Oracle reply is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Oracle reply does not match the analysis shape: {0}")]
    Shape(String),
}

impl OracleError {
    /// The single generic message end users get to see.
    pub fn user_message(&self) -> &'static str {
        USER_FACING_MESSAGE
    }
}

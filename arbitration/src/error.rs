use thiserror::Error;

/// Why the arbitration step could not produce a call
#[derive(Debug, Error)]
pub enum ArbitrationError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("authentication rejected by model endpoint")]
    Unauthorized,

    #[error("rate limited by model endpoint")]
    RateLimited,

    #[error("model endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("model returned an empty reply")]
    EmptyReply,

    #[error("unparsable reply: {0}")]
    Unparsable(String),
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum DrugLabelError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Out of range: {0}")]
    OutOfRange(String),

    #[error("API key is required and must not be empty")]
    EmptyCredential,

    #[error("field list has {fields} entries but item list has {items}; they must match")]
    LengthMismatch { fields: usize, items: usize },

    #[error("Cannot add a drug without a name")]
    MissingName,

    #[error("Drug '{0}' is already on the shelf")]
    DuplicateName(String),

    #[error("Shelf is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("Drug '{0}' not found on shelf")]
    NotFound(String),

    #[error("HTTP request failed: {0}")]
    RequestFailure(#[from] RequestFailure),

    #[error("API JSON error from openfda: {source}")]
    ApiJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response from openfda: {0}")]
    UnexpectedResponse(String),
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum RequestFailure {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {excerpt}")]
    Status {
        status: reqwest::StatusCode,
        excerpt: String,
    },

    #[error("response body exceeded {limit} bytes")]
    BodyTooLarge { limit: usize },
}

impl From<reqwest::Error> for DrugLabelError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailure(RequestFailure::Transport(err))
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverpassError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Overpass request timed out: {0}")]
    Timeout(String),

    #[error("unexpected HTTP status {status} from Overpass: {body_preview}")]
    UnexpectedStatus { status: u16, body_preview: String },

    #[error("JSON deserialization error for Overpass response: {source}")]
    Deserialize {
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Overpass endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

use http::StatusCode;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

impl Error {
    /// Build the error for a non-success answer, `body` being the raw
    /// response body. The service answers with plain text on failure.
    pub fn api(status: StatusCode, body: &str) -> Error {
        let body = body.trim();
        let message = match body.is_empty() {
            true => String::from(status.canonical_reason().unwrap_or("Unknown status")),
            false => String::from(body),
        };
        Error::Api {
            status: status.as_u16(),
            message,
        }
    }

    pub fn not_found(message: &str) -> Error {
        Error::api(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: &str) -> Error {
        Error::api(StatusCode::BAD_REQUEST, message)
    }

    pub fn empty_content() -> Error {
        Error::Validation(String::from("comment content must not be empty"))
    }

    /// Status to answer with when serving this error over HTTP
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Transport(_) => StatusCode::BAD_GATEWAY,
            Error::Api { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Body to answer with when serving this error over HTTP
    pub fn contents(&self) -> String {
        match self {
            Error::Validation(msg) | Error::Transport(msg) => msg.clone(),
            Error::Api { message, .. } => message.clone(),
        }
    }
}

use reqwest::StatusCode;

/// Errors returned by the Meteomatics client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service answered with a non-2xx status.
    #[error("{url}: {status} {reason}{}", body_suffix(.body))]
    Http {
        url: String,
        status: u16,
        reason: String,
        body: Vec<u8>,
    },

    /// The request never produced a response (connection, TLS, timeout).
    ///
    /// Any [`Transport`](crate::Transport) reports its own failures here.
    #[error("could not connect: {0}")]
    Transport(#[source] BoxError),

    /// The request could not be built, e.g. a header that is not valid HTTP.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("csv parse error")]
    CsvParse,

    #[error("failed to parse API JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A well-formed JSON document whose `status` is not `OK`.
    #[error("{}", service_text(.status, .message))]
    Service {
        status: String,
        message: Option<String>,
    },

    /// Credential/configuration loading failed.
    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(Box::new(e))
    }
}

impl Error {
    /// Wraps a failure of a custom transport.
    pub fn transport(e: impl Into<BoxError>) -> Self {
        Error::Transport(e.into())
    }

    pub(crate) fn http(url: &str, status: u16, body: Vec<u8>) -> Self {
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
            .to_string();
        Error::Http {
            url: url.to_string(),
            status,
            reason,
            body,
        }
    }

    /// HTTP status code, for [`Error::Http`] only.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Best-effort extraction of the service's own explanation.
    ///
    /// Error bodies are usually `{"status":"error","message":...}`; when the body
    /// is not such a document nothing is returned.
    pub fn service_message(&self) -> Option<String> {
        match self {
            Error::Http { body, .. } => serde_json::from_slice::<ServiceErrorBody>(body)
                .ok()
                .and_then(|e| e.message.or(e.detail)),
            Error::Service { message, .. } => message.clone(),
            _ => None,
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    message: Option<String>,
    // Some gateways respond with {"detail":...}
    #[serde(default)]
    detail: Option<String>,
}

fn body_suffix(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        String::new()
    } else {
        format!(": {}", text)
    }
}

fn service_text(status: &str, message: &Option<String>) -> String {
    match message.as_deref() {
        Some(m) if !m.is_empty() => format!("{} (status: {})", m, status),
        _ => status.to_string(),
    }
}

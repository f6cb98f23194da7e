#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A record could not be turned into a canonical [`Card`](crate::models::Card).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The upstream catalog confirmed the entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The upstream catalog answered with a fault other than "not found".
    #[error("Upstream error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Wrap an unanticipated fault with a generic prefix, keeping the underlying
    /// text for diagnostics.
    pub fn internal(context: &str, err: impl std::fmt::Display) -> Self {
        Self::Internal(format!("{context}: {err}"))
    }

    /// `true` for faults that came from talking to the upstream catalog.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::Http(_))
    }

    /// HTTP status a transport layer should answer with for this error.
    ///
    /// Upstream faults the catalog itself classified as 404 stay 404, every
    /// other upstream fault becomes 502. Anything else is a 500.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::Upstream {
                status: Some(404), ..
            } => 404,
            Self::Upstream { .. } | Self::Http(_) => 502,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

//! Error types for the request pipeline.
//!
//! # Design
//! Every stage (classify, build, execute, decode) returns the first failure
//! straight to its caller, so one flat enum covers the whole pipeline.
//! `ErrorKind` groups the variants into the six categories callers usually
//! branch on; the variants themselves keep the detail and the source chain.

use thiserror::Error;

use crate::method::Method;
use crate::types::PayloadKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by the classifier, builder, session and response wrapper.
#[derive(Debug, Error)]
pub enum Error {
    /// Form and JSON payloads were both supplied.
    #[error("form and json data can not be set at the same time")]
    ArgumentConflict,

    /// A bare string was neither an absolute URL nor a usable method keyword.
    #[error("invalid string `{0}`")]
    InvalidString(String),

    /// No URL was supplied.
    #[error("url is required")]
    MissingUrl,

    /// The form or JSON payload could not be encoded.
    #[error("failed to marshal {payload} data")]
    Serialization {
        payload: PayloadKind,
        #[source]
        source: BoxError,
    },

    /// The transport request could not be assembled from the descriptor.
    #[error("failed to create request for {method} {url}")]
    RequestConstruction {
        method: Method,
        url: String,
        #[source]
        source: http::Error,
    },

    /// Connection, DNS or TLS failure reported by the transport.
    #[error(transparent)]
    Transport(#[from] ureq::Error),

    /// The response body is not valid JSON for the requested type.
    #[error("failed to decode response body as json")]
    DecodeJson(#[source] serde_json::Error),

    /// The response body could not be read, or was not valid UTF-8 text.
    #[error("failed to read response body")]
    ReadBody(#[source] std::io::Error),

    /// The response body was already decoded or closed.
    #[error("response body already consumed")]
    BodyConsumed,
}

/// Coarse classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ArgumentConflict,
    ArgumentFormat,
    Serialization,
    RequestConstruction,
    Transport,
    Decode,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ArgumentConflict => ErrorKind::ArgumentConflict,
            Error::InvalidString(_) | Error::MissingUrl => ErrorKind::ArgumentFormat,
            Error::Serialization { .. } => ErrorKind::Serialization,
            Error::RequestConstruction { .. } => ErrorKind::RequestConstruction,
            Error::Transport(_) => ErrorKind::Transport,
            Error::DecodeJson(_) | Error::ReadBody(_) | Error::BodyConsumed => ErrorKind::Decode,
        }
    }

    pub(crate) fn serialization(
        payload: PayloadKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Serialization {
            payload,
            source: Box::new(source),
        }
    }
}

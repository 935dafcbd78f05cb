//! Session configuration.

use serde::Deserialize;

/// Transport settings applied when a [`Session`](crate::Session) is built.
///
/// Deserializable so it can sit inside an application's own config file;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Redirects followed before giving up.
    pub max_redirects: u32,
    /// When false, 4xx/5xx statuses come back as ordinary responses.
    pub http_status_as_error: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_redirects: 10,
            http_status_as_error: false,
        }
    }
}

//! One-shot response wrapper.
//!
//! # Design
//! The body is held as `Option<ureq::Body>`. Each decode helper takes it out
//! of the option, so the body is dropped (and the connection handed back to
//! the agent's pool) on every exit path, error or not. A second decode finds
//! `None` and fails with [`Error::BodyConsumed`].

use std::fmt;
use std::io::Read;

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use ureq::Body;

use crate::error::{Error, Result};

/// A received response whose body can be decoded exactly once.
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Body>,
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("closed", &self.body.is_none())
            .finish()
    }
}

impl Response {
    pub(crate) fn new(response: http::Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            status: parts.status,
            headers: parts.headers,
            body: Some(body),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// A header value as text, if present and visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decode the body as JSON, then release it.
    pub fn json<T: DeserializeOwned>(&mut self) -> Result<T> {
        let body = self.take_body()?;
        serde_json::from_reader(body.into_reader()).map_err(Error::DecodeJson)
    }

    /// Read the whole body as text, then release it.
    ///
    /// There is no size cap. A body that is not valid UTF-8 is a
    /// [`Error::ReadBody`] rather than being patched with replacement chars.
    pub fn content(&mut self) -> Result<String> {
        let body = self.take_body()?;
        let mut text = String::new();
        body.into_reader()
            .read_to_string(&mut text)
            .map_err(Error::ReadBody)?;
        Ok(text)
    }

    /// Release the body without reading it. Closing twice is a no-op.
    pub fn close(&mut self) {
        if self.body.take().is_some() {
            tracing::trace!(status = %self.status, "response body closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.body.is_none()
    }

    fn take_body(&mut self) -> Result<Body> {
        self.body.take().ok_or(Error::BodyConsumed)
    }
}

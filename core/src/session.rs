//! Sessions: a long-lived transport agent plus the classify → build → send
//! pipeline.
//!
//! # Design
//! `Session` wraps a `ureq::Agent`, which pools connections and is cheap to
//! clone and safe to share between threads. Nothing else is held between
//! calls; every `issue` classifies, builds and sends a fresh request.
//!
//! The per-verb helpers append their method to the end of the caller's
//! options. Method options are last-write-wins, so the verb always beats any
//! method the caller passed earlier in the list.

use std::iter;

use crate::builder::build;
use crate::classify::classify;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::method::Method;
use crate::response::Response;
use crate::types::RequestOption;

/// Issues requests over one shared transport agent.
#[derive(Clone)]
pub struct Session {
    agent: ureq::Agent,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(&SessionConfig::default())
    }

    pub fn with_config(config: &SessionConfig) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(config.http_status_as_error)
            .max_redirects(config.max_redirects)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Classify `options`, build the request and send it.
    ///
    /// The first failing stage aborts the call; nothing is retried.
    pub fn issue<I>(&self, options: I) -> Result<Response>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        let descriptor = classify(options)?;
        let method = descriptor.method;
        let url = descriptor.url.to_string();
        let request = build(descriptor)?;

        tracing::debug!(%method, %url, "sending request");
        let (parts, body) = request.into_parts();
        let sent = if body.is_empty() {
            self.agent.run(http::Request::from_parts(parts, ()))
        } else {
            self.agent.run(http::Request::from_parts(parts, body))
        };
        let response = sent.inspect_err(|e| {
            tracing::debug!(%method, %url, error = %e, "transport failure");
        })?;

        tracing::debug!(%method, %url, status = %response.status(), "received response");
        Ok(Response::new(response))
    }

    pub fn get<I>(&self, options: I) -> Result<Response>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        self.issue_as(Method::Get, options)
    }

    pub fn post<I>(&self, options: I) -> Result<Response>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        self.issue_as(Method::Post, options)
    }

    pub fn put<I>(&self, options: I) -> Result<Response>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        self.issue_as(Method::Put, options)
    }

    pub fn patch<I>(&self, options: I) -> Result<Response>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        self.issue_as(Method::Patch, options)
    }

    pub fn delete<I>(&self, options: I) -> Result<Response>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        self.issue_as(Method::Delete, options)
    }

    pub fn head<I>(&self, options: I) -> Result<Response>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        self.issue_as(Method::Head, options)
    }

    pub fn options<I>(&self, options: I) -> Result<Response>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        self.issue_as(Method::Options, options)
    }

    fn issue_as<I>(&self, method: Method, options: I) -> Result<Response>
    where
        I: IntoIterator<Item = RequestOption>,
    {
        self.issue(options.into_iter().chain(iter::once(RequestOption::Method(method))))
    }
}

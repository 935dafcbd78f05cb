//! Option classification: turns an ordered option list into a
//! [`RequestDescriptor`].
//!
//! # Design
//! Options are applied strictly in the order given. Method, headers, params
//! and URL are last-write-wins; a body (form or JSON) can be committed only
//! once per pass. Bodies are encoded the moment they are committed, so a
//! payload that cannot be represented fails here rather than at send time.
//!
//! A bare string is tried as an absolute URL first and as a method keyword
//! second. Keywords are only accepted while no method has been chosen in the
//! current pass.

use url::Url;

use crate::error::{Error, Result};
use crate::method::Method;
use crate::types::{Headers, Params, Payload, PayloadKind, RequestOption};

/// A fully classified request, ready for [`build`](crate::builder::build).
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub url: Url,
    pub headers: Headers,
    pub params: Params,
    pub payload: Option<Payload>,
    /// Encoded body bytes; present exactly when `payload` is.
    pub body: Option<Vec<u8>>,
}

impl RequestDescriptor {
    /// Media type of the committed body, if any.
    pub fn content_type(&self) -> Option<&'static str> {
        self.payload.as_ref().map(|p| p.kind().content_type())
    }
}

/// Classify an option list into a descriptor.
pub fn classify<I>(options: I) -> Result<RequestDescriptor>
where
    I: IntoIterator<Item = RequestOption>,
{
    let mut classifier = Classifier::default();
    for option in options {
        classifier.apply(option)?;
    }
    classifier.finish()
}

#[derive(Debug, Default)]
struct Classifier {
    method: Option<Method>,
    url: Option<Url>,
    headers: Headers,
    params: Params,
    payload: Option<(Payload, Vec<u8>)>,
}

impl Classifier {
    fn apply(&mut self, option: RequestOption) -> Result<()> {
        match option {
            RequestOption::Method(method) => {
                tracing::trace!(%method, "method option");
                self.method = Some(method);
            }
            RequestOption::Headers(headers) => {
                tracing::trace!(count = headers.len(), "headers option");
                self.headers = headers;
            }
            RequestOption::Params(params) => {
                tracing::trace!(count = params.len(), "params option");
                self.params = params;
            }
            RequestOption::Url(url) => {
                tracing::trace!(%url, "url option");
                self.url = Some(url);
            }
            RequestOption::Text(text) => self.apply_text(text)?,
            RequestOption::Form(form) => {
                self.ensure_no_body()?;
                let encoded = form
                    .encode()
                    .map_err(|e| Error::serialization(PayloadKind::Form, e))?;
                tracing::trace!(len = encoded.len(), "form option");
                self.payload = Some((Payload::Form(form), encoded.into_bytes()));
            }
            RequestOption::Json(json) => {
                self.ensure_no_body()?;
                let value = json
                    .into_value()
                    .map_err(|e| Error::serialization(PayloadKind::Json, e))?;
                let encoded = serde_json::to_vec(&value)
                    .map_err(|e| Error::serialization(PayloadKind::Json, e))?;
                tracing::trace!(len = encoded.len(), "json option");
                self.payload = Some((Payload::Json(value), encoded));
            }
        }
        Ok(())
    }

    fn apply_text(&mut self, text: String) -> Result<()> {
        if let Ok(url) = Url::parse(&text) {
            tracing::trace!(%url, "string option parsed as url");
            self.url = Some(url);
            return Ok(());
        }
        match Method::from_keyword(&text) {
            Some(method) if self.method.is_none() => {
                tracing::trace!(%method, "string option parsed as method");
                self.method = Some(method);
                Ok(())
            }
            _ => Err(Error::InvalidString(text)),
        }
    }

    fn ensure_no_body(&self) -> Result<()> {
        if self.payload.is_some() {
            return Err(Error::ArgumentConflict);
        }
        Ok(())
    }

    fn finish(self) -> Result<RequestDescriptor> {
        let method = self.method.unwrap_or_default();
        let url = self.url.ok_or(Error::MissingUrl)?;
        let mut headers = self.headers;

        let (payload, body) = match self.payload {
            Some((payload, body)) => {
                headers.retain(|k, _| !k.eq_ignore_ascii_case("content-type"));
                headers.insert("Content-Type", payload.kind().content_type());
                (Some(payload), Some(body))
            }
            None => (None, None),
        };

        tracing::trace!(%method, %url, "classified request");
        Ok(RequestDescriptor {
            method,
            url,
            headers,
            params: self.params,
            payload,
            body,
        })
    }
}

//! Convenience façade for issuing HTTP requests from a loose option list.
//!
//! # Overview
//! Callers hand over an ordered list of options (method, URL, headers, query
//! parameters, a form or a JSON body) in any order. The list is classified
//! into a `RequestDescriptor`, built into an `http::Request`, and sent over a
//! pooled `ureq` agent. The reply comes back as a `Response` whose body can
//! be decoded once.
//!
//! ```no_run
//! use requests_core::{options, Params};
//!
//! let mut resp = requests_core::get(options![
//!     "http://localhost:3000/api/get",
//!     Params::from([("name", "john")]),
//! ])?;
//! let echoed: serde_json::Value = resp.json()?;
//! # Ok::<(), requests_core::Error>(())
//! ```
//!
//! # Design
//! - Classification, building and sending are separate stages; the first
//!   failure is returned as is and nothing is retried.
//! - Bodies are encoded at classification time, so payload errors surface
//!   before any network activity.
//! - The process-wide default session is created lazily on first use.

pub mod builder;
pub mod classify;
pub mod config;
pub mod error;
pub mod method;
pub mod response;
pub mod session;
pub mod types;

use std::sync::LazyLock;

pub use builder::build;
pub use classify::{classify, RequestDescriptor};
pub use config::SessionConfig;
pub use error::{Error, ErrorKind, Result};
pub use method::Method;
pub use response::Response;
pub use session::Session;
pub use types::{
    Form, Headers, Json, Params, Payload, PayloadKind, RequestOption, FORM_CONTENT_TYPE,
    JSON_CONTENT_TYPE,
};
pub use url::Url;

/// Build a `Vec<RequestOption>` from mixed option values.
#[macro_export]
macro_rules! options {
    ($($option:expr),* $(,)?) => {
        ::std::vec![$($crate::RequestOption::from($option)),*]
    };
}

static DEFAULT_SESSION: LazyLock<Session> = LazyLock::new(Session::new);

/// The shared session used by the free functions below.
pub fn default_session() -> &'static Session {
    &DEFAULT_SESSION
}

/// Send a request on the default session. See [`Session::issue`].
pub fn request<I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption>,
{
    default_session().issue(options)
}

pub fn get<I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption>,
{
    default_session().get(options)
}

pub fn post<I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption>,
{
    default_session().post(options)
}

pub fn put<I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption>,
{
    default_session().put(options)
}

pub fn patch<I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption>,
{
    default_session().patch(options)
}

pub fn delete<I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption>,
{
    default_session().delete(options)
}

pub fn head<I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption>,
{
    default_session().head(options)
}

pub fn options<I>(options: I) -> Result<Response>
where
    I: IntoIterator<Item = RequestOption>,
{
    default_session().options(options)
}

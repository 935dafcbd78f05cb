//! Turns a [`RequestDescriptor`] into a transport request.

use http::header::{HeaderName, HeaderValue};

use crate::classify::RequestDescriptor;
use crate::error::{Error, Result};

/// Build an `http::Request` carrying the descriptor's method, headers and
/// body. Query parameters are appended to the URL's existing query string;
/// same-named pairs already in the URL are kept.
pub fn build(descriptor: RequestDescriptor) -> Result<http::Request<Vec<u8>>> {
    let RequestDescriptor {
        method,
        mut url,
        headers,
        params,
        body,
        ..
    } = descriptor;

    if !params.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in params.iter() {
            query.append_pair(key, value);
        }
    }

    let construction = |source: http::Error| Error::RequestConstruction {
        method,
        url: url.to_string(),
        source,
    };

    let mut request = http::Request::builder()
        .method(http::Method::from(method))
        .uri(url.as_str())
        .body(body.unwrap_or_default())
        .map_err(construction)?;

    let map = request.headers_mut();
    for (key, value) in headers.iter() {
        let name = HeaderName::try_from(key).map_err(|e| construction(e.into()))?;
        let value = HeaderValue::try_from(value).map_err(|e| construction(e.into()))?;
        map.insert(name, value);
    }

    Ok(request)
}

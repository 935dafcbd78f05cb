//! Option types accepted by the classifier.
//!
//! # Design
//! Each option kind is its own type so that a mixed option list is still
//! strongly typed: everything converts into the closed [`RequestOption`] enum
//! through `From`, and the `options!` macro does the conversions for a whole
//! list at once. Headers and query parameters are distinct newtypes over the
//! same map shape so the two can never be confused.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::method::Method;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const JSON_CONTENT_TYPE: &str = "application/json";

macro_rules! string_map {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(BTreeMap<String, String>);

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Insert a pair, returning the previous value for `key`.
            pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
                self.0.insert(key.into(), value.into())
            }

            pub fn get(&self, key: &str) -> Option<&str> {
                self.0.get(key).map(String::as_str)
            }

            pub fn remove(&mut self, key: &str) -> Option<String> {
                self.0.remove(key)
            }

            pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
                self.0.retain(|k, v| keep(k, v));
            }

            pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
                self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for $name {
            fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
                Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
            }
        }

        impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for $name {
            fn from(pairs: [(K, V); N]) -> Self {
                pairs.into_iter().collect()
            }
        }
    };
}

string_map! {
    /// Request headers. Keys are kept exactly as given.
    Headers
}

string_map! {
    /// Query parameters, appended to whatever query the URL already carries.
    Params
}

/// Form fields, sent as `application/x-www-form-urlencoded`.
///
/// Values may be strings, numbers or booleans. Nested values and `null` have
/// no url-encoded representation and fail classification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Form(BTreeMap<String, Value>);

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.0)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Form {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Form {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// A JSON body.
///
/// The value is converted to a `serde_json::Value` on construction. If that
/// conversion fails the error is held and reported when the option list is
/// classified, before anything touches the network.
#[derive(Debug)]
pub struct Json(Result<Value, serde_json::Error>);

impl Json {
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Self {
        Self(serde_json::to_value(value))
    }

    pub(crate) fn into_value(self) -> Result<Value, serde_json::Error> {
        self.0
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        Self(Ok(value))
    }
}

/// Which kind of body a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Form,
    Json,
}

impl PayloadKind {
    pub fn content_type(&self) -> &'static str {
        match self {
            PayloadKind::Form => FORM_CONTENT_TYPE,
            PayloadKind::Json => JSON_CONTENT_TYPE,
        }
    }
}

impl std::fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadKind::Form => f.write_str("form"),
            PayloadKind::Json => f.write_str("json"),
        }
    }
}

/// The committed body of a request. At most one per request.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Form(Form),
    Json(Value),
}

impl Payload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Form(_) => PayloadKind::Form,
            Payload::Json(_) => PayloadKind::Json,
        }
    }
}

/// One entry of an option list.
///
/// `Text` is the ambiguous case: an absolute URL, or else a method keyword.
/// Prefer `Url` and `Method` when the intent is known.
#[derive(Debug)]
pub enum RequestOption {
    Method(Method),
    Headers(Headers),
    Params(Params),
    Form(Form),
    Json(Json),
    Url(Url),
    Text(String),
}

impl From<Method> for RequestOption {
    fn from(method: Method) -> Self {
        RequestOption::Method(method)
    }
}

impl From<Headers> for RequestOption {
    fn from(headers: Headers) -> Self {
        RequestOption::Headers(headers)
    }
}

impl From<Params> for RequestOption {
    fn from(params: Params) -> Self {
        RequestOption::Params(params)
    }
}

impl From<Form> for RequestOption {
    fn from(form: Form) -> Self {
        RequestOption::Form(form)
    }
}

impl From<Json> for RequestOption {
    fn from(json: Json) -> Self {
        RequestOption::Json(json)
    }
}

impl From<Value> for RequestOption {
    fn from(value: Value) -> Self {
        RequestOption::Json(Json::from(value))
    }
}

impl From<Url> for RequestOption {
    fn from(url: Url) -> Self {
        RequestOption::Url(url)
    }
}

impl From<&str> for RequestOption {
    fn from(text: &str) -> Self {
        RequestOption::Text(text.to_string())
    }
}

impl From<String> for RequestOption {
    fn from(text: String) -> Self {
        RequestOption::Text(text)
    }
}

impl From<&String> for RequestOption {
    fn from(text: &String) -> Self {
        RequestOption::Text(text.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_map_last_write_wins() {
        let headers = Headers::from([("X-A", "1"), ("X-A", "2")]);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-A"), Some("2"));
    }

    #[test]
    fn header_keys_keep_their_case() {
        let headers = Headers::from([("content-type", "a"), ("Content-Type", "b")]);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("content-type"), Some("a"));
    }

    #[test]
    fn form_encodes_scalars() {
        let form = Form::new().field("name", "john").field("age", 30).field("admin", false);
        let encoded = form.encode().unwrap();
        assert_eq!(encoded, "admin=false&age=30&name=john");
    }

    #[test]
    fn form_encoding_escapes_reserved_characters() {
        let form = Form::from([("q", "a b&c=d")]);
        assert_eq!(form.encode().unwrap(), "q=a+b%26c%3Dd");
    }

    #[test]
    fn form_rejects_nested_values() {
        let form = Form::new().field("tags", json!(["a", "b"]));
        assert!(form.encode().is_err());
    }

    #[test]
    fn json_holds_conversion_failure() {
        let bad: BTreeMap<(i32, i32), i32> = BTreeMap::from([((1, 2), 3)]);
        assert!(Json::new(&bad).into_value().is_err());
        assert_eq!(
            Json::new(&json!({"a": 1})).into_value().unwrap(),
            json!({"a": 1})
        );
    }

    #[test]
    fn strings_become_text_options() {
        assert!(matches!(RequestOption::from("get"), RequestOption::Text(ref s) if s == "get"));
        assert!(matches!(
            RequestOption::from(json!({"k": "v"})),
            RequestOption::Json(_)
        ));
    }

    #[test]
    fn payload_kind_content_types() {
        assert_eq!(PayloadKind::Form.content_type(), FORM_CONTENT_TYPE);
        assert_eq!(PayloadKind::Json.content_type(), JSON_CONTENT_TYPE);
        assert_eq!(Payload::Json(json!(1)).kind(), PayloadKind::Json);
    }
}

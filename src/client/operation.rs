//! Request descriptors for a single Penguin API call.

use reqwest::{Method, StatusCode, Url};
use serde::Serialize;

use super::error::ClientError;

/// One request/response exchange: method, path, query, body and the statuses
/// that count as success.
#[derive(Clone, Debug)]
pub(crate) struct Operation {
    pub(crate) method: Method,
    pub(crate) segments: Vec<String>,
    pub(crate) query: Vec<(&'static str, String)>,
    pub(crate) body: Option<Vec<u8>>,
    pub(crate) accepted: &'static [StatusCode],
}

impl Operation {
    pub(crate) fn new(method: Method, path: &[&str], accepted: &'static [StatusCode]) -> Self {
        Self {
            method,
            segments: path.iter().map(|segment| (*segment).to_owned()).collect(),
            query: Vec::new(),
            body: None,
            accepted,
        }
    }

    pub(crate) fn get(path: &[&str], accepted: &'static [StatusCode]) -> Self {
        Self::new(Method::GET, path, accepted)
    }

    pub(crate) fn post(path: &[&str], accepted: &'static [StatusCode]) -> Self {
        Self::new(Method::POST, path, accepted)
    }

    pub(crate) fn delete(path: &[&str], accepted: &'static [StatusCode]) -> Self {
        Self::new(Method::DELETE, path, accepted)
    }

    /// Appends a path segment. The value is percent-encoded as a single
    /// segment when the URL is built, so `/` and other reserved characters in
    /// identifiers never change the route.
    #[must_use]
    pub(crate) fn segment(mut self, value: impl Into<String>) -> Self {
        self.segments.push(value.into());
        self
    }

    #[must_use]
    pub(crate) fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }

    /// Adds the query parameter only when `value` is non-empty.
    #[must_use]
    pub(crate) fn optional_query(self, key: &'static str, value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(text) if !text.is_empty() => self.query(key, text),
            _ => self,
        }
    }

    /// Serialises `payload` as the JSON request body.
    pub(crate) fn json<T: Serialize + ?Sized>(mut self, payload: &T) -> Result<Self, ClientError> {
        let bytes =
            serde_json::to_vec(payload).map_err(|err| ClientError::Encode(err.to_string()))?;
        self.body = Some(bytes);
        Ok(self)
    }

    pub(crate) fn accepts(&self, status: StatusCode) -> bool {
        self.accepted.contains(&status)
    }

    /// Joins the operation path onto `base`, whose path must not end in `/`.
    pub(crate) fn url(&self, base: &Url) -> Result<Url, ClientError> {
        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ClientError::Configuration(format!("endpoint {base} cannot be a base URL"))
            })?;
            path.pop_if_empty();
            path.extend(self.segments.iter().map(String::as_str));
        }
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(key, value)| (*key, value.as_str())));
        }
        Ok(url)
    }
}

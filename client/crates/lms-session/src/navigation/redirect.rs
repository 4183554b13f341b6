use reqwest::Url;
use serde::Serialize;

const QUERY_BASE: &str = "http://localhost/";

/// A navigation target: path plus query parameters in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Redirect {
    pub fn to(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Parses `path?k=v&...`, decoding the query as form data. Fragments are dropped.
    pub fn parse(location: &str) -> Self {
        let without_fragment = location.split('#').next().unwrap_or_default();
        let (path, query) = match without_fragment.split_once('?') {
            Some((path, query)) => (path, decode_query(query)),
            None => (without_fragment, Vec::new()),
        };

        Self {
            path: path.to_string(),
            query,
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }
}

impl std::fmt::Display for Redirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_url())
    }
}

/// Path component of a location (query and fragment stripped).
pub fn path_of(location: &str) -> &str {
    location
        .split(['?', '#'])
        .next()
        .unwrap_or(location)
}

/// Only the query of the placeholder base is used; the path stays as given.
fn decode_query(query: &str) -> Vec<(String, String)> {
    let Ok(mut url) = Url::parse(QUERY_BASE) else {
        return Vec::new();
    };
    url.set_query(Some(query));
    url.query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

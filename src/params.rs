//! Filters for the random photo endpoint and their query encoding.
//!
//! See <https://unsplash.com/documentation#get-a-random-photo> for what each
//! filter means. Values are passed through untouched; the API reports invalid
//! ones.

use url::Url;

/// Optional filters for a random photo. Empty fields are not applied.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FilterParams {
    collections: String,
    topics: String,
    username: String,
    query: String,
    orientation: String,
    content_filter: String,
}

impl FilterParams {
    /// No filters at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds filters from the flat text fields used at the process boundary.
    pub fn from_fields(
        collections: &str,
        topics: &str,
        username: &str,
        query: &str,
        orientation: &str,
        content_filter: &str,
    ) -> Self {
        Self {
            collections: collections.to_string(),
            topics: topics.to_string(),
            username: username.to_string(),
            query: query.to_string(),
            orientation: orientation.to_string(),
            content_filter: content_filter.to_string(),
        }
    }

    /// Comma separated collection ids
    pub fn collections(mut self, value: impl Into<String>) -> Self {
        self.collections = value.into();
        self
    }

    /// Comma separated topic ids or slugs
    pub fn topics(mut self, value: impl Into<String>) -> Self {
        self.topics = value.into();
        self
    }

    /// Limit to photos from one user
    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.username = value.into();
        self
    }

    /// Free text search
    pub fn query(mut self, value: impl Into<String>) -> Self {
        self.query = value.into();
        self
    }

    /// `landscape`, `portrait` or `squarish`
    pub fn orientation(mut self, value: impl Into<String>) -> Self {
        self.orientation = value.into();
        self
    }

    /// `low` or `high`
    pub fn content_filter(mut self, value: impl Into<String>) -> Self {
        self.content_filter = value.into();
        self
    }

    /// Turns the filters into query pairs, skipping empty ones.
    pub fn encode(&self) -> Query {
        let pairs = [
            ("collections", &self.collections),
            ("topics", &self.topics),
            ("username", &self.username),
            ("query", &self.query),
            ("orientation", &self.orientation),
            ("content_filter", &self.content_filter),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (key, value.clone()))
        .collect();
        Query { pairs }
    }
}

/// Encoded filters, ready to be put on a request URL.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Query {
    pairs: Vec<(&'static str, String)>,
}

impl Query {
    /// Key/value pairs in the order they will be sent.
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// True when no filter applies.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Appends the pairs to `url`'s query string.
    pub fn apply_to(&self, url: &mut Url) {
        if self.pairs.is_empty() {
            return;
        }
        let mut serializer = url.query_pairs_mut();
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
    }
}

//! Route parameter extraction and query string parsing
//!
//! This module provides types for working with URL parameters captured from
//! path patterns (like `:id`) and query strings (like `?page=1&sort=name`).

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::HashMap;

/// Characters kept verbatim by [`encode_uri_component`]: the unreserved set.
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-decode a URI component.
///
/// Returns `None` when the expanded bytes are not valid UTF-8; callers keep
/// the raw value in that case. Stray `%` sequences that do not form a valid
/// escape pass through literally.
pub(crate) fn decode_uri_component(value: &str) -> Option<String> {
    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Percent-encode a URI component, keeping only unreserved characters.
pub(crate) fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).to_string()
}

/// Route parameters captured from path segments
///
/// # Example
///
/// ```
/// use ranked_router::RouteParams;
///
/// // Pattern: /users/:id
/// // Matched path: /users/123
/// let mut params = RouteParams::new();
/// params.insert("id".to_string(), "123".to_string());
///
/// assert_eq!(params.get("id"), Some(&"123".to_string()));
/// assert_eq!(params.get_as::<i32>("id"), Some(123));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Create new empty route params
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from hashmap
    pub fn from_map(params: HashMap<String, String>) -> Self {
        Self { params }
    }

    /// Get a parameter value as a string
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)
    }

    /// Get a parameter and parse it as a specific type
    ///
    /// Returns `None` if the parameter doesn't exist or cannot be parsed.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.params.get(key)?.parse().ok()
    }

    /// Insert a parameter
    pub fn insert(&mut self, key: String, value: String) {
        self.params.insert(key, value);
    }

    /// Check if parameter exists
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Merge another parameter set on top of this one, producing a new set
    ///
    /// Values from `other` win on key collision. Neither input is modified;
    /// per-level match results each hold their own merged snapshot.
    #[must_use]
    pub fn merged(&self, other: &RouteParams) -> RouteParams {
        let mut params = self.params.clone();
        for (key, value) in &other.params {
            params.insert(key.clone(), value.clone());
        }
        Self { params }
    }

    /// Get all parameters as a reference to the HashMap
    pub fn all(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Iterate over all parameters
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.params.iter()
    }

    /// Check if parameters are empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters parsed from a URL query string
///
/// Supports multiple values for the same key.
///
/// # Example
///
/// ```
/// use ranked_router::QueryParams;
///
/// let query = QueryParams::from_query_string("page=1&sort=name&tag=rust&tag=router");
///
/// assert_eq!(query.get("page"), Some(&"1".to_string()));
/// assert_eq!(query.get_as::<i32>("page"), Some(1));
/// assert_eq!(query.get_all("tag").unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    params: HashMap<String, Vec<String>>,
}

impl QueryParams {
    /// Create new empty query params
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a query string
    ///
    /// A leading `?` marker is accepted and ignored. `+` decodes to a space
    /// per the form-encoding convention. Pairs whose value fails to decode
    /// keep the raw text.
    ///
    /// # Example
    ///
    /// ```
    /// use ranked_router::QueryParams;
    ///
    /// let query = QueryParams::from_query_string("?page=1&sort=name");
    /// assert_eq!(query.get("page"), Some(&"1".to_string()));
    /// ```
    pub fn from_query_string(query: &str) -> Self {
        let mut params: HashMap<String, Vec<String>> = HashMap::new();

        for pair in query.trim_start_matches('?').split('&') {
            if let Some((key, value)) = pair.split_once('=') {
                let key = decode_query_text(key);
                let value = decode_query_text(value);

                params.entry(key).or_default().push(value);
            }
        }

        Self { params }
    }

    /// Get first value for a parameter
    pub fn get(&self, key: &str) -> Option<&String> {
        self.params.get(key)?.first()
    }

    /// Get all values for a parameter
    ///
    /// Useful for parameters that can appear multiple times like `?tag=a&tag=b`
    pub fn get_all(&self, key: &str) -> Option<&Vec<String>> {
        self.params.get(key)
    }

    /// Get parameter as a specific type
    ///
    /// Returns the first value parsed as type T.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        self.get(key)?.parse().ok()
    }

    /// Insert a parameter
    ///
    /// If the key already exists, the value is appended to the list.
    pub fn insert(&mut self, key: String, value: String) {
        self.params.entry(key).or_default().push(value);
    }

    /// Check if parameter exists
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Convert to a query string (no leading `?`)
    ///
    /// # Example
    ///
    /// ```
    /// use ranked_router::QueryParams;
    ///
    /// let mut query = QueryParams::new();
    /// query.insert("page".to_string(), "1".to_string());
    /// let s = query.to_query_string();
    /// assert!(s.contains("page=1"));
    /// ```
    pub fn to_query_string(&self) -> String {
        let pairs: Vec<String> = self
            .params
            .iter()
            .flat_map(|(key, values)| {
                values.iter().map(move |value| {
                    format!(
                        "{}={}",
                        encode_uri_component(key),
                        encode_uri_component(value)
                    )
                })
            })
            .collect();

        pairs.join("&")
    }

    /// Check if parameters are empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of unique parameter keys
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

/// Decode one key or value from a query string, keeping raw text on failure
fn decode_query_text(text: &str) -> String {
    let text = text.replace('+', " ");
    decode_uri_component(&text).unwrap_or(text)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Route parameters tests

    #[test]
    fn test_route_params_basic() {
        let mut params = RouteParams::new();
        params.insert("id".to_string(), "123".to_string());

        assert_eq!(params.get("id"), Some(&"123".to_string()));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
    }

    #[test]
    fn test_route_params_get_as() {
        let mut params = RouteParams::new();
        params.insert("id".to_string(), "123".to_string());
        params.insert("active".to_string(), "true".to_string());

        assert_eq!(params.get_as::<i32>("id"), Some(123));
        assert_eq!(params.get_as::<u32>("id"), Some(123));
        assert_eq!(params.get_as::<bool>("active"), Some(true));
        assert_eq!(params.get_as::<i32>("missing"), None);
    }

    #[test]
    fn test_route_params_from_map() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), "John".to_string());
        map.insert("age".to_string(), "30".to_string());

        let params = RouteParams::from_map(map);

        assert_eq!(params.get("name"), Some(&"John".to_string()));
        assert_eq!(params.get_as::<i32>("age"), Some(30));
    }

    #[test]
    fn test_route_params_merged() {
        let mut base = RouteParams::new();
        base.insert("id".to_string(), "1".to_string());
        base.insert("lang".to_string(), "en".to_string());

        let mut overlay = RouteParams::new();
        overlay.insert("id".to_string(), "2".to_string());
        overlay.insert("tab".to_string(), "posts".to_string());

        let merged = base.merged(&overlay);

        // Deeper level wins on collision
        assert_eq!(merged.get("id"), Some(&"2".to_string()));
        assert_eq!(merged.get("lang"), Some(&"en".to_string()));
        assert_eq!(merged.get("tab"), Some(&"posts".to_string()));

        // Inputs untouched
        assert_eq!(base.get("id"), Some(&"1".to_string()));
        assert!(!base.contains("tab"));
        assert_eq!(overlay.len(), 2);
    }

    #[test]
    fn test_route_params_iter() {
        let mut params = RouteParams::new();
        params.insert("x".to_string(), "1".to_string());
        params.insert("y".to_string(), "2".to_string());

        let count = params.iter().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_route_params_empty() {
        let params = RouteParams::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);

        let mut params = RouteParams::new();
        params.insert("key".to_string(), "value".to_string());
        assert!(!params.is_empty());
        assert_eq!(params.len(), 1);
    }

    // Decoding helpers

    #[test]
    fn test_decode_uri_component() {
        assert_eq!(
            decode_uri_component("hello%20world"),
            Some("hello world".to_string())
        );
        assert_eq!(
            decode_uri_component("caf%C3%A9"),
            Some("café".to_string())
        );
        // Stray percent passes through literally
        assert_eq!(decode_uri_component("100%"), Some("100%".to_string()));
    }

    #[test]
    fn test_decode_uri_component_invalid_utf8() {
        // %FF expands to a byte that is not valid UTF-8
        assert_eq!(decode_uri_component("%FF"), None);
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("hello world"), "hello%20world");
        assert!(encode_uri_component("test@example.com").contains("%40"));
        assert_eq!(encode_uri_component("a-b_c.d~e"), "a-b_c.d~e");
    }

    // Query parameters tests

    #[test]
    fn test_query_params_basic() {
        let query = QueryParams::from_query_string("page=1&sort=name&filter=active");

        assert_eq!(query.get("page"), Some(&"1".to_string()));
        assert_eq!(query.get("sort"), Some(&"name".to_string()));
        assert_eq!(query.get("filter"), Some(&"active".to_string()));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn test_query_params_leading_marker() {
        let query = QueryParams::from_query_string("?page=1");
        assert_eq!(query.get("page"), Some(&"1".to_string()));
    }

    #[test]
    fn test_query_params_multiple_values() {
        let query = QueryParams::from_query_string("tag=rust&tag=router&tag=url");

        let tags = query.get_all("tag").unwrap();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0], "rust");

        // get() returns first value
        assert_eq!(query.get("tag"), Some(&"rust".to_string()));
    }

    #[test]
    fn test_query_params_decoding() {
        let query = QueryParams::from_query_string("q=hello+world&name=caf%C3%A9");

        assert_eq!(query.get("q"), Some(&"hello world".to_string()));
        assert_eq!(query.get("name"), Some(&"café".to_string()));
    }

    #[test]
    fn test_query_params_insert() {
        let mut query = QueryParams::new();
        query.insert("key".to_string(), "value1".to_string());
        query.insert("key".to_string(), "value2".to_string());

        let values = query.get_all("key").unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0], "value1");
        assert_eq!(values[1], "value2");
    }

    #[test]
    fn test_to_query_string() {
        let mut query = QueryParams::new();
        query.insert("page".to_string(), "1".to_string());
        query.insert("sort".to_string(), "name".to_string());

        let s = query.to_query_string();
        // Order may vary, check both keys are present
        assert!(s.contains("page=1"));
        assert!(s.contains("sort=name"));
    }

    #[test]
    fn test_empty_query_string() {
        let query = QueryParams::from_query_string("");
        assert!(query.is_empty());
        assert_eq!(QueryParams::from_query_string("?").len(), 0);
    }
}

//! Path parsing and string utilities
//!
//! A location is carried as a pathname/search/hash triple. This module
//! provides the [`Path`] and [`PartialPath`] types, conversion between the
//! triple and its single-string form, and the small path-string helpers the
//! flattener, matcher, and resolver share.

use crate::error::ConfigurationError;
use crate::params::RouteParams;
use std::fmt;

/// A complete location triple
///
/// `search` and `hash` are normalized: when non-empty they include their
/// leading `?`/`#` marker, and a bare marker collapses to the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// URL pathname, always beginning with `/`
    pub pathname: String,
    /// URL search string, `""` or beginning with `?`
    pub search: String,
    /// URL fragment, `""` or beginning with `#`
    pub hash: String,
}

impl Default for Path {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
            search: String::new(),
            hash: String::new(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// A location triple with every component optional
///
/// Produced by [`parse_path`] and accepted as a navigation target by the
/// resolver. A missing component means "unspecified", which the resolver
/// treats differently from an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialPath {
    pub pathname: Option<String>,
    pub search: Option<String>,
    pub hash: Option<String>,
}

impl From<&str> for PartialPath {
    /// Parse a target string into its components.
    ///
    /// The empty string is the "current route" target: it parses to an empty
    /// pathname rather than an absent one, which the resolver maps to the
    /// deepest matched route pathname.
    fn from(value: &str) -> Self {
        if value.is_empty() {
            PartialPath {
                pathname: Some(String::new()),
                search: None,
                hash: None,
            }
        } else {
            parse_path(value)
        }
    }
}

impl From<String> for PartialPath {
    fn from(value: String) -> Self {
        PartialPath::from(value.as_str())
    }
}

impl From<Path> for PartialPath {
    fn from(value: Path) -> Self {
        PartialPath {
            pathname: Some(value.pathname),
            search: Some(value.search),
            hash: Some(value.hash),
        }
    }
}

/// Parse a string URL path into its separate pathname, search, and hash components
///
/// # Example
///
/// ```
/// use ranked_router::parse_path;
///
/// let parsed = parse_path("/users/42?tab=posts#bio");
/// assert_eq!(parsed.pathname.as_deref(), Some("/users/42"));
/// assert_eq!(parsed.search.as_deref(), Some("?tab=posts"));
/// assert_eq!(parsed.hash.as_deref(), Some("#bio"));
/// ```
pub fn parse_path(path: &str) -> PartialPath {
    let mut parsed = PartialPath::default();
    let mut path = path;

    if !path.is_empty() {
        if let Some(hash_index) = path.find('#') {
            parsed.hash = Some(path[hash_index..].to_string());
            path = &path[..hash_index];
        }

        if let Some(search_index) = path.find('?') {
            parsed.search = Some(path[search_index..].to_string());
            path = &path[..search_index];
        }

        if !path.is_empty() {
            parsed.pathname = Some(path.to_string());
        }
    }

    parsed
}

/// Join a location triple back into a single string
pub fn create_path(path: &Path) -> String {
    path.to_string()
}

/// Join path fragments with `/`, collapsing any run of separators into one
///
/// # Example
///
/// ```
/// use ranked_router::join_paths;
///
/// assert_eq!(join_paths(&["/users", "/42"]), "/users/42");
/// assert_eq!(join_paths(&["/", "dashboard"]), "/dashboard");
/// ```
pub fn join_paths(paths: &[&str]) -> String {
    let joined = paths.join("/");

    let mut out = String::with_capacity(joined.len());
    let mut prev_was_separator = false;
    for c in joined.chars() {
        if c == '/' {
            if !prev_was_separator {
                out.push(c);
            }
            prev_was_separator = true;
        } else {
            out.push(c);
            prev_was_separator = false;
        }
    }
    out
}

/// Normalize a pathname: strip trailing separators, force one leading `/`
pub fn normalize_pathname(pathname: &str) -> String {
    let trimmed = pathname.trim_end_matches('/');
    format!("/{}", trimmed.trim_start_matches('/'))
}

/// Collapse trailing separators, always keeping at least one character
///
/// `/users//` becomes `/users`; a bare `/` (or `///`) stays `/`.
pub(crate) fn strip_trailing_slashes(s: &str) -> &str {
    let trimmed = s.trim_end_matches('/');
    if trimmed.is_empty() && !s.is_empty() {
        &s[..1]
    } else {
        trimmed
    }
}

/// Strip a fixed basename prefix from a pathname
///
/// The comparison is case-insensitive and boundary-safe: the basename must be
/// followed by a separator or the end of the pathname. Returns `None` when
/// the pathname does not live under the basename.
///
/// # Example
///
/// ```
/// use ranked_router::strip_basename;
///
/// assert_eq!(strip_basename("/app/users", "/app"), Some("/users".to_string()));
/// assert_eq!(strip_basename("/App/users", "/app"), Some("/users".to_string()));
/// assert_eq!(strip_basename("/apple/users", "/app"), None);
/// assert_eq!(strip_basename("/app", "/app"), Some("/".to_string()));
/// ```
pub fn strip_basename(pathname: &str, basename: &str) -> Option<String> {
    if basename == "/" {
        return Some(pathname.to_string());
    }

    if pathname.len() < basename.len()
        || !pathname.is_char_boundary(basename.len())
        || !pathname[..basename.len()].eq_ignore_ascii_case(basename)
    {
        return None;
    }

    let rest = &pathname[basename.len()..];
    match rest.chars().next() {
        // pathname does not start with basename/
        Some(c) if c != '/' => None,
        Some(_) => Some(rest.to_string()),
        None => Some("/".to_string()),
    }
}

/// Substitute parameters into a path pattern, producing a concrete pathname
///
/// Each `:name` token is replaced with the matching parameter value; a
/// missing value is a [`ConfigurationError::MissingParam`]. A trailing
/// wildcard is replaced with the `*` parameter when present and dropped
/// (together with its separator) when absent.
///
/// # Example
///
/// ```
/// use ranked_router::{generate_path, RouteParams};
///
/// let mut params = RouteParams::new();
/// params.insert("id".to_string(), "42".to_string());
///
/// assert_eq!(generate_path("/users/:id", &params).unwrap(), "/users/42");
/// assert_eq!(generate_path("/files/*", &params).unwrap(), "/files");
/// ```
pub fn generate_path(path: &str, params: &RouteParams) -> Result<String, ConfigurationError> {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' {
            let mut name = String::new();
            while let Some(&next) = chars.peek() {
                if next.is_ascii_alphanumeric() || next == '_' {
                    name.push(next);
                    chars.next();
                } else {
                    break;
                }
            }

            if name.is_empty() {
                out.push(':');
            } else {
                match params.get(&name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(ConfigurationError::MissingParam {
                            name,
                            path: path.to_string(),
                        })
                    }
                }
            }
        } else {
            out.push(c);
        }
    }

    if out.ends_with('*') {
        while out.ends_with('*') || out.ends_with('/') {
            out.pop();
        }
        if let Some(splat) = params.get("*") {
            out.push('/');
            out.push_str(splat.trim_start_matches('/'));
        }
    }

    Ok(out)
}

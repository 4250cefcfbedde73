//! Path pattern compilation and route matching
//!
//! A [`PathPattern`] compiles to a regular expression: literal text is
//! escaped, each `:name` segment becomes a capture of one-or-more
//! non-separator characters, and a trailing `*` captures the remainder of
//! the pathname. [`match_path`] tests one pattern; [`match_routes`] runs the
//! whole pipeline (flatten, rank, first full branch match) over a route
//! tree and produces one [`RouteMatch`] per level of the winning branch.

use crate::branch::{flatten_routes, rank_route_branches, RouteBranch};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ConfigurationError;
use crate::params::{decode_uri_component, RouteParams};
use crate::path::{join_paths, parse_path, strip_basename, strip_trailing_slashes};
use crate::route::RouteNode;
use crate::trace_log;
use regex::{Regex, RegexBuilder};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "cache")]
use crate::cache::PatternCache;

/// A single path pattern to match against a pathname
///
/// A bare string converts to `{path, case_sensitive: false, end: true}`.
///
/// # Example
///
/// ```
/// use ranked_router::PathPattern;
///
/// let pattern = PathPattern::new("/users/:id").case_sensitive(true);
/// assert!(pattern.end);
/// assert_eq!(PathPattern::from("/users"), PathPattern::new("/users"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    /// Pattern text, possibly with `:name` segments and a trailing `/*`
    pub path: String,
    /// Match case-sensitively
    pub case_sensitive: bool,
    /// Require the match to consume the entire remaining pathname
    pub end: bool,
}

impl PathPattern {
    /// Create a pattern with the defaults for a standalone match
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            case_sensitive: false,
            end: true,
        }
    }

    /// Match case-sensitively
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set whether the match must consume the entire remaining pathname
    pub fn end(mut self, end: bool) -> Self {
        self.end = end;
        self
    }
}

impl From<&str> for PathPattern {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PathPattern {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// A pattern compiled to its matching rule
#[derive(Debug, Clone)]
pub struct CompiledPath {
    regex: Regex,
    param_names: Vec<String>,
}

impl CompiledPath {
    /// Ordered names of the pattern's captures; a wildcard contributes a
    /// trailing `"*"` entry
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}

/// Outcome of matching one pattern against a pathname
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Captured parameters, percent-decoded (the special name `*` holds the
    /// wildcard remainder)
    pub params: RouteParams,
    /// The portion of the pathname that was consumed
    pub pathname: String,
    /// `pathname` with a trailing separator collapsed and any
    /// wildcard-captured suffix excluded
    pub pathname_base: String,
    /// The pattern that produced this match
    pub pattern: PathPattern,
}

/// One level of a successful multi-level match
///
/// A branch match is an ordered sequence of these, root-first. Each level's
/// `params` is its own merged snapshot of every level up to and including it.
pub struct RouteMatch<'a, T> {
    /// Parameters merged from the root level down to this one
    pub params: RouteParams,
    /// Accumulated pathname consumed through this level
    pub pathname: String,
    /// Accumulated pathname excluding this level's wildcard remainder
    pub pathname_base: String,
    /// The originating route node
    pub route: &'a RouteNode<T>,
}

impl<T> Clone for RouteMatch<'_, T> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            pathname: self.pathname.clone(),
            pathname_base: self.pathname_base.clone(),
            route: self.route,
        }
    }
}

impl<T> fmt::Debug for RouteMatch<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("params", &self.params)
            .field("pathname", &self.pathname)
            .field("pathname_base", &self.pathname_base)
            .field("route", &self.route)
            .finish()
    }
}

/// The matched ancestor pathnames, root-first, as the resolver expects them
pub fn route_pathnames<T>(matches: &[RouteMatch<'_, T>]) -> Vec<String> {
    matches.iter().map(|m| m.pathname_base.clone()).collect()
}

// ============================================================================
// Pattern Compilation
// ============================================================================

/// Compile a pattern into its regular expression and capture names
///
/// A pattern ending in a bare `*` not preceded by `/` is compiled as if `/*`
/// had been written and reported as a [`Diagnostic::SplatWithoutSlash`].
pub fn compile_path(pattern: &PathPattern, diagnostics: &mut Diagnostics) -> CompiledPath {
    let path = pattern.path.as_str();

    if path != "*" && path.ends_with('*') && !path.ends_with("/*") {
        diagnostics.push(Diagnostic::SplatWithoutSlash {
            path: path.to_string(),
        });
    }

    // Ignore the trailing `/` and `/*`; they are handled below.
    let trimmed = path.strip_suffix('*').unwrap_or(path);
    let trimmed = trimmed.trim_end_matches('/');
    // Make sure the pattern has exactly one leading `/`.
    let base = format!("/{}", trimmed.trim_start_matches('/'));

    let mut param_names: Vec<String> = Vec::new();
    let mut source = String::from("^");
    let mut literal = String::new();

    let mut chars = base.chars().peekable();
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

            // A lone `:` is literal text, not a parameter.
            if name.is_empty() {
                literal.push(':');
            } else {
                source.push_str(&regex::escape(&literal));
                literal.clear();
                param_names.push(name);
                source.push_str("([^/]+)");
            }
        } else {
            literal.push(c);
        }
    }
    source.push_str(&regex::escape(&literal));

    if path.ends_with('*') {
        param_names.push("*".to_string());
        if path == "*" || path == "/*" {
            // Already matched the initial `/`, just match the rest.
            source.push_str("(.*)$");
        } else {
            // The remainder capture never begins with a separator: the
            // slashes-only arm comes first, so a remainder consisting only
            // of separators leaves the capture empty instead of swallowing
            // a separator into it.
            source.push_str("(?:/*$|/(.+)$)");
        }
    } else if pattern.end {
        // When matching to the end, ignore trailing slashes.
        source.push_str("/*$");
    } else {
        // Otherwise require at least a word boundary, so a parent pattern
        // matches only its own words: "/home" must not match "/home2".
        source.push_str("(?:\\b|$)");
    }

    let regex = RegexBuilder::new(&source)
        .case_insensitive(!pattern.case_sensitive)
        .build()
        .expect("compiled route pattern should be a valid regular expression");

    CompiledPath { regex, param_names }
}

// ============================================================================
// Single-Pattern Matching
// ============================================================================

/// Match a pattern against a pathname
///
/// Advisory diagnostics are logged and discarded; use [`match_path_with`] to
/// collect them.
///
/// # Example
///
/// ```
/// use ranked_router::match_path;
///
/// let m = match_path("/users/:id", "/users/42").unwrap();
/// assert_eq!(m.params.get("id"), Some(&"42".to_string()));
/// assert_eq!(m.pathname, "/users/42");
///
/// assert!(match_path("/users/:id", "/orders/42").is_none());
/// ```
pub fn match_path(pattern: impl Into<PathPattern>, pathname: &str) -> Option<PathMatch> {
    let mut diagnostics = Diagnostics::new();
    match_path_with(pattern, pathname, &mut diagnostics)
}

/// Match a pattern against a pathname, collecting advisory diagnostics
pub fn match_path_with(
    pattern: impl Into<PathPattern>,
    pathname: &str,
    diagnostics: &mut Diagnostics,
) -> Option<PathMatch> {
    let pattern = pattern.into();
    let compiled = compile_path(&pattern, diagnostics);
    match_compiled_path(&compiled, &pattern, pathname, diagnostics)
}

/// Execute an already-compiled pattern against a pathname
fn match_compiled_path(
    compiled: &CompiledPath,
    pattern: &PathPattern,
    pathname: &str,
    diagnostics: &mut Diagnostics,
) -> Option<PathMatch> {
    let captures = compiled.regex.captures(pathname)?;

    let matched_pathname = captures.get(0).map_or("", |m| m.as_str());
    let mut pathname_base = strip_trailing_slashes(matched_pathname).to_string();

    let mut params = RouteParams::new();
    for (index, name) in compiled.param_names.iter().enumerate() {
        let raw = captures.get(index + 1).map_or("", |m| m.as_str());

        if name == "*" {
            // The base is computed from the raw capture: the decoded value
            // may differ in length.
            let prefix_len = matched_pathname.len() - raw.len();
            pathname_base = strip_trailing_slashes(&matched_pathname[..prefix_len]).to_string();
        }

        let value = match decode_uri_component(raw) {
            Some(decoded) => decoded,
            None => {
                diagnostics.push(Diagnostic::MalformedParamEncoding {
                    param: name.clone(),
                    value: raw.to_string(),
                });
                raw.to_string()
            }
        };
        params.insert(name.clone(), value);
    }

    Some(PathMatch {
        params,
        pathname: matched_pathname.to_string(),
        pathname_base,
        pattern: pattern.clone(),
    })
}

// ============================================================================
// Route Tree Matching
// ============================================================================

/// Match a route tree against a location
///
/// The location may carry a search and hash (`/users/42?tab=posts#bio`);
/// only the pathname participates in matching. Returns `Ok(None)` when no
/// branch matches.
///
/// # Errors
///
/// Flattening surfaces invalid route declarations as [`ConfigurationError`].
///
/// # Example
///
/// ```
/// use ranked_router::{match_routes, IndexRoute, PathRoute, RouteNode};
///
/// let routes: Vec<RouteNode<&str>> = vec![
///     PathRoute::new("/users")
///         .view("users-layout")
///         .child(IndexRoute::new().view("user-list"))
///         .child(PathRoute::new(":id").view("user-detail"))
///         .into(),
/// ];
///
/// let matches = match_routes(&routes, "/users/42").unwrap().unwrap();
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[1].params.get("id"), Some(&"42".to_string()));
/// assert_eq!(matches[1].route.view(), Some(&"user-detail"));
/// ```
pub fn match_routes<'a, T>(
    routes: &'a [RouteNode<T>],
    location: &str,
) -> Result<Option<Vec<RouteMatch<'a, T>>>, ConfigurationError> {
    let mut diagnostics = Diagnostics::new();
    match_routes_with(routes, location, "/", &mut diagnostics)
}

/// Match a route tree against a location under a basename, collecting
/// advisory diagnostics
///
/// The basename is stripped case-insensitively before matching begins; a
/// pathname outside the basename yields `Ok(None)`.
pub fn match_routes_with<'a, T>(
    routes: &'a [RouteNode<T>],
    location: &str,
    basename: &str,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Vec<RouteMatch<'a, T>>>, ConfigurationError> {
    let mut compile = |pattern: &PathPattern, diags: &mut Diagnostics| {
        Arc::new(compile_path(pattern, diags))
    };
    match_routes_impl(routes, location, basename, diagnostics, &mut compile)
}

/// Match a route tree against a location, reusing compiled patterns
///
/// Identical to [`match_routes_with`] except that pattern compilations are
/// served from (and recorded into) the given [`PatternCache`].
#[cfg(feature = "cache")]
#[cfg_attr(docsrs, doc(cfg(feature = "cache")))]
pub fn match_routes_cached<'a, T>(
    routes: &'a [RouteNode<T>],
    location: &str,
    basename: &str,
    cache: &mut PatternCache,
    diagnostics: &mut Diagnostics,
) -> Result<Option<Vec<RouteMatch<'a, T>>>, ConfigurationError> {
    let mut compile = |pattern: &PathPattern, diags: &mut Diagnostics| {
        cache.get_or_compile(pattern, diags)
    };
    match_routes_impl(routes, location, basename, diagnostics, &mut compile)
}

fn match_routes_impl<'a, T, C>(
    routes: &'a [RouteNode<T>],
    location: &str,
    basename: &str,
    diagnostics: &mut Diagnostics,
    compile: &mut C,
) -> Result<Option<Vec<RouteMatch<'a, T>>>, ConfigurationError>
where
    C: FnMut(&PathPattern, &mut Diagnostics) -> Arc<CompiledPath>,
{
    let parsed = parse_path(location);
    let full_pathname = parsed.pathname.unwrap_or_else(|| "/".to_string());

    let Some(pathname) = strip_basename(&full_pathname, basename) else {
        return Ok(None);
    };

    let mut branches = flatten_routes(routes)?;
    rank_route_branches(&mut branches);

    let mut matches = None;
    for branch in &branches {
        if matches.is_some() {
            break;
        }
        matches = match_route_branch(branch, &pathname, diagnostics, compile);
    }

    match &matches {
        None => diagnostics.push(Diagnostic::NoBranchMatched {
            pathname: pathname.clone(),
        }),
        Some(chain) => {
            if let Some(leaf) = chain.last() {
                if leaf.route.view().is_none() {
                    diagnostics.push(Diagnostic::MatchedLeafWithoutView {
                        path: leaf.pathname.clone(),
                    });
                }
            }
        }
    }

    Ok(matches)
}

/// Try every level of a branch's segment chain against successive remainders
/// of the pathname
fn match_route_branch<'a, T, C>(
    branch: &RouteBranch<'a, T>,
    pathname: &str,
    diagnostics: &mut Diagnostics,
    compile: &mut C,
) -> Option<Vec<RouteMatch<'a, T>>>
where
    C: FnMut(&PathPattern, &mut Diagnostics) -> Arc<CompiledPath>,
{
    trace_log!(
        "Trying branch '{}' against pathname '{}'",
        branch.full_path,
        pathname
    );

    let mut matched_params = RouteParams::new();
    let mut matched_pathname = "/".to_string();
    let mut matches = Vec::with_capacity(branch.segments.len());

    for (i, meta) in branch.segments.iter().enumerate() {
        let end = i == branch.segments.len() - 1;
        let remaining_pathname = if matched_pathname == "/" {
            pathname
        } else {
            match pathname.get(matched_pathname.len()..) {
                Some("") | None => "/",
                Some(rest) => rest,
            }
        };

        let pattern = PathPattern {
            path: meta.relative_path.clone(),
            case_sensitive: meta.case_sensitive,
            end,
        };
        let compiled = compile(&pattern, diagnostics);
        let level = match_compiled_path(&compiled, &pattern, remaining_pathname, diagnostics)?;

        // Immutable accumulation: every level keeps its own merged snapshot.
        matched_params = matched_params.merged(&level.params);

        matches.push(RouteMatch {
            params: matched_params.clone(),
            pathname: join_paths(&[&matched_pathname, &level.pathname]),
            pathname_base: join_paths(&[&matched_pathname, &level.pathname_base]),
            route: meta.node,
        });

        if level.pathname_base != "/" {
            matched_pathname = join_paths(&[&matched_pathname, &level.pathname_base]);
        }
    }

    Some(matches)
}

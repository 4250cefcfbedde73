//! Route tree definition and configuration
//!
//! A route tree is declared as nested [`RouteNode`] values. The node shape is
//! a closed set of variants, each carrying only the fields valid for it:
//!
//! - [`PathRoute`] - matches a path pattern, may have children
//! - [`IndexRoute`] - matches exactly its parent's path; has no path and no
//!   children by construction
//! - [`LayoutRoute`] - groups children without contributing a path segment
//!
//! The type parameter `T` is the caller's renderable unit (a view, a handler
//! id, a component reference). The engine never interprets it; matched levels
//! hand back a reference to the originating node so the caller can map each
//! level to its unit.

use crate::error::ConfigurationError;
use std::fmt;

// ============================================================================
// Route Validation
// ============================================================================

/// Validate a route path pattern
///
/// # Validation Rules
///
/// - Parameter names (`:name`) must be unique within the pattern
/// - Everything the matcher accepts passes: doubled separators, trailing
///   separators, a trailing `*` wildcard, and literal `:` characters not
///   followed by a word character
pub fn validate_route_path(path: &str) -> Result<(), ConfigurationError> {
    let mut param_names = std::collections::HashSet::new();
    let mut chars = path.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ':' {
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }

        if !name.is_empty() && !param_names.insert(name.clone()) {
            return Err(ConfigurationError::DuplicateParam {
                name,
                path: path.to_string(),
            });
        }
    }

    Ok(())
}

// ============================================================================
// Route Nodes
// ============================================================================

/// A route that matches a path pattern
///
/// The pattern may contain `:name` dynamic segments and a trailing `/*`
/// wildcard. An absolute pattern (starting with `/`) nested under a parent
/// must repeat the parent's accumulated path as a prefix; the flattener
/// rejects the tree otherwise.
#[derive(Clone)]
pub struct PathRoute<T> {
    /// Path pattern relative to the parent (or absolute, see above)
    pub path: String,
    /// Match the pattern case-sensitively
    pub case_sensitive: bool,
    /// The renderable unit for this level, if any
    pub view: Option<T>,
    /// Child routes
    pub children: Vec<RouteNode<T>>,
}

impl<T> PathRoute<T> {
    /// Create a path route with validation
    ///
    /// # Panics
    ///
    /// Panics if the path is invalid. Use `try_new` for non-panicking
    /// validation.
    pub fn new(path: impl Into<String>) -> Self {
        match Self::try_new(path) {
            Ok(route) => route,
            Err(e) => panic!("Invalid route path: {}", e),
        }
    }

    /// Create a path route with validation, returning Result
    pub fn try_new(path: impl Into<String>) -> Result<Self, ConfigurationError> {
        let path = path.into();
        validate_route_path(&path)?;
        Ok(Self {
            path,
            case_sensitive: false,
            view: None,
            children: Vec::new(),
        })
    }

    /// Match the pattern case-sensitively
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set the renderable unit for this route
    pub fn view(mut self, view: T) -> Self {
        self.view = Some(view);
        self
    }

    /// Add a child route
    pub fn child(mut self, child: impl Into<RouteNode<T>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Replace the child routes
    pub fn children(mut self, children: Vec<RouteNode<T>>) -> Self {
        self.children = children;
        self
    }
}

/// A route that matches exactly its parent's path
///
/// Index routes carry no path and cannot have children; the variant shape
/// makes both unrepresentable rather than checked at flatten time.
#[derive(Clone)]
pub struct IndexRoute<T> {
    /// Match the (empty) relative pattern case-sensitively
    pub case_sensitive: bool,
    /// The renderable unit for this level, if any
    pub view: Option<T>,
}

impl<T> IndexRoute<T> {
    /// Create an index route
    pub fn new() -> Self {
        Self {
            case_sensitive: false,
            view: None,
        }
    }

    /// Match case-sensitively
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Set the renderable unit for this route
    pub fn view(mut self, view: T) -> Self {
        self.view = Some(view);
        self
    }
}

impl<T> Default for IndexRoute<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A route that groups children without contributing a path segment
///
/// Layout routes are traversed for their children but never become a
/// matchable branch themselves.
#[derive(Clone)]
pub struct LayoutRoute<T> {
    /// The renderable unit wrapping the children, if any
    pub view: Option<T>,
    /// Child routes
    pub children: Vec<RouteNode<T>>,
}

impl<T> LayoutRoute<T> {
    /// Create a layout route
    pub fn new() -> Self {
        Self {
            view: None,
            children: Vec::new(),
        }
    }

    /// Set the renderable unit for this route
    pub fn view(mut self, view: T) -> Self {
        self.view = Some(view);
        self
    }

    /// Add a child route
    pub fn child(mut self, child: impl Into<RouteNode<T>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Replace the child routes
    pub fn children(mut self, children: Vec<RouteNode<T>>) -> Self {
        self.children = children;
        self
    }
}

impl<T> Default for LayoutRoute<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A node in the declared route tree
///
/// # Example
///
/// ```
/// use ranked_router::{IndexRoute, PathRoute, RouteNode};
///
/// let routes: Vec<RouteNode<&str>> = vec![
///     PathRoute::new("/dashboard")
///         .view("dashboard-layout")
///         .child(IndexRoute::new().view("overview"))
///         .child(PathRoute::new("settings").view("settings"))
///         .into(),
/// ];
///
/// assert_eq!(routes[0].path(), Some("/dashboard"));
/// assert_eq!(routes[0].children().len(), 2);
/// ```
#[derive(Clone)]
pub enum RouteNode<T> {
    /// A route matching a path pattern
    Path(PathRoute<T>),
    /// A route matching exactly its parent's path
    Index(IndexRoute<T>),
    /// A path-less grouping route
    Layout(LayoutRoute<T>),
}

impl<T> RouteNode<T> {
    /// The declared path pattern, if this node has one
    pub fn path(&self) -> Option<&str> {
        match self {
            RouteNode::Path(route) => Some(&route.path),
            RouteNode::Index(_) | RouteNode::Layout(_) => None,
        }
    }

    /// Check if this is an index route
    pub fn is_index(&self) -> bool {
        matches!(self, RouteNode::Index(_))
    }

    /// Whether this node's pattern matches case-sensitively
    pub fn is_case_sensitive(&self) -> bool {
        match self {
            RouteNode::Path(route) => route.case_sensitive,
            RouteNode::Index(route) => route.case_sensitive,
            RouteNode::Layout(_) => false,
        }
    }

    /// Child routes (empty for index routes)
    pub fn children(&self) -> &[RouteNode<T>] {
        match self {
            RouteNode::Path(route) => &route.children,
            RouteNode::Layout(route) => &route.children,
            RouteNode::Index(_) => &[],
        }
    }

    /// The renderable unit attached to this node, if any
    pub fn view(&self) -> Option<&T> {
        match self {
            RouteNode::Path(route) => route.view.as_ref(),
            RouteNode::Index(route) => route.view.as_ref(),
            RouteNode::Layout(route) => route.view.as_ref(),
        }
    }
}

impl<T> From<PathRoute<T>> for RouteNode<T> {
    fn from(route: PathRoute<T>) -> Self {
        RouteNode::Path(route)
    }
}

impl<T> From<IndexRoute<T>> for RouteNode<T> {
    fn from(route: IndexRoute<T>) -> Self {
        RouteNode::Index(route)
    }
}

impl<T> From<LayoutRoute<T>> for RouteNode<T> {
    fn from(route: LayoutRoute<T>) -> Self {
        RouteNode::Layout(route)
    }
}

impl<T> fmt::Debug for RouteNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteNode::Path(route) => f
                .debug_struct("PathRoute")
                .field("path", &route.path)
                .field("case_sensitive", &route.case_sensitive)
                .field("view", &route.view.is_some())
                .field("children", &route.children.len())
                .finish(),
            RouteNode::Index(route) => f
                .debug_struct("IndexRoute")
                .field("case_sensitive", &route.case_sensitive)
                .field("view", &route.view.is_some())
                .finish(),
            RouteNode::Layout(route) => f
                .debug_struct("LayoutRoute")
                .field("view", &route.view.is_some())
                .field("children", &route.children.len())
                .finish(),
        }
    }
}

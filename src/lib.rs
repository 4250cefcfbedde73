//! # Ranked Router
//!
//! A path-routing engine for declarative nested route trees:
//!
//! - **Route Flattening** - Nested route trees flatten into matchable
//!   root-to-leaf branches
//! - **Branch Ranking** - Branches are scored so static text outranks
//!   `:params`, which outrank `*` wildcards, with declaration order as the
//!   deterministic tie-break
//! - **Path Matching** - Patterns compile to regular expressions with
//!   per-segment captured parameters and percent-decoding
//! - **Relative Resolution** - `..`-style navigation targets resolve against
//!   the matched route hierarchy
//! - **Diagnostics** - Advisory warnings are collected explicitly, never in
//!   process-wide state
//! - **Pattern Caching** - Optional LRU reuse of compiled patterns
//!
//! Everything is synchronous and pure over its inputs: no I/O, no shared
//! mutable state, no interior caches unless you opt into one.
//!
//! # Quick Start
//!
//! ```
//! use ranked_router::{match_routes, IndexRoute, PathRoute, RouteNode};
//!
//! // The type parameter is your renderable unit; the engine never looks
//! // inside it.
//! let routes: Vec<RouteNode<&str>> = vec![
//!     PathRoute::new("/")
//!         .view("app-shell")
//!         .child(IndexRoute::new().view("home"))
//!         .child(
//!             PathRoute::new("users")
//!                 .view("users-layout")
//!                 .child(PathRoute::new(":id").view("user-detail")),
//!         )
//!         .into(),
//! ];
//!
//! let matches = match_routes(&routes, "/users/42").unwrap().unwrap();
//! let views: Vec<_> = matches.iter().filter_map(|m| m.route.view()).collect();
//! assert_eq!(views, [&"app-shell", &"users-layout", &"user-detail"]);
//! assert_eq!(matches[2].params.get("id"), Some(&"42".to_string()));
//! ```
//!
//! # Relative Navigation
//!
//! ```
//! use ranked_router::{match_routes, resolve_to, route_pathnames, PathRoute, RouteNode};
//!
//! let routes: Vec<RouteNode<&str>> = vec![
//!     PathRoute::new("/users")
//!         .child(PathRoute::new(":id").child(PathRoute::new("edit")))
//!         .into(),
//! ];
//!
//! let matches = match_routes(&routes, "/users/42/edit").unwrap().unwrap();
//! let ancestors = route_pathnames(&matches);
//!
//! // ".." walks up one *route*, not one URL segment
//! let destination = resolve_to("..", &ancestors, "/users/42/edit");
//! assert_eq!(destination.pathname, "/users/42");
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually
//!   exclusive with `log`)
//! - `cache` (default) - Enables the compiled-pattern LRU cache

#![doc(html_root_url = "https://docs.rs/ranked-router/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Core routing modules
pub mod branch;
pub mod matcher;
pub mod route;

// Path utilities and resolution
pub mod path;
pub mod resolve;

// Parameters
pub mod params;

// Error handling and diagnostics
pub mod diagnostics;
pub mod error;

// Re-export main types for convenient access
pub use branch::{flatten_routes, rank_route_branches, RouteBranch, RouteMeta};
#[cfg(feature = "cache")]
pub use cache::{CacheStats, PatternCache};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::ConfigurationError;
pub use matcher::{
    compile_path, match_path, match_path_with, match_routes, match_routes_with, route_pathnames,
    CompiledPath, PathMatch, PathPattern, RouteMatch,
};
#[cfg(feature = "cache")]
pub use matcher::match_routes_cached;
pub use params::{QueryParams, RouteParams};
pub use path::{
    create_path, generate_path, join_paths, normalize_pathname, parse_path, strip_basename,
    PartialPath, Path,
};
pub use resolve::{resolve_path, resolve_to};
pub use route::{validate_route_path, IndexRoute, LayoutRoute, PathRoute, RouteNode};

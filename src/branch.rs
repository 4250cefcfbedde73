//! Route tree flattening and branch ranking
//!
//! Matching does not walk the tree directly. The tree is first flattened
//! into [`RouteBranch`] candidates, one per matchable root-to-leaf chain,
//! then ranked so that more specific branches are tried first:
//!
//! - static segments outrank dynamic `:name` segments
//! - dynamic segments outrank a trailing `*` wildcard
//! - sibling declaration order is the final tie-break, so authors control
//!   ambiguous overlaps by ordering their routes

use crate::debug_log;
use crate::error::ConfigurationError;
use crate::path::join_paths;
use crate::route::RouteNode;
use std::cmp::Ordering;
use std::fmt;

/// One level of a branch's segment chain, root-first
pub struct RouteMeta<'a, T> {
    /// Path pattern relative to the parent level
    pub relative_path: String,
    /// Match this level case-sensitively
    pub case_sensitive: bool,
    /// Declaration index among the node's siblings
    pub children_index: usize,
    /// The originating node
    pub node: &'a RouteNode<T>,
}

impl<T> Clone for RouteMeta<'_, T> {
    fn clone(&self) -> Self {
        Self {
            relative_path: self.relative_path.clone(),
            case_sensitive: self.case_sensitive,
            children_index: self.children_index,
            node: self.node,
        }
    }
}

impl<T> fmt::Debug for RouteMeta<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMeta")
            .field("relative_path", &self.relative_path)
            .field("case_sensitive", &self.case_sensitive)
            .field("children_index", &self.children_index)
            .finish()
    }
}

/// A flattened root-to-leaf matching candidate
///
/// Branches borrow the input tree and are rebuilt on every flattening pass;
/// they are never cached across calls.
pub struct RouteBranch<'a, T> {
    /// Accumulated absolute path of the whole chain
    pub full_path: String,
    /// Specificity score used for ranking
    pub score: i32,
    /// Per-level metadata, root-first, the leaf level last
    pub segments: Vec<RouteMeta<'a, T>>,
}

impl<T> Clone for RouteBranch<'_, T> {
    fn clone(&self) -> Self {
        Self {
            full_path: self.full_path.clone(),
            score: self.score,
            segments: self.segments.clone(),
        }
    }
}

impl<T> fmt::Debug for RouteBranch<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteBranch")
            .field("full_path", &self.full_path)
            .field("score", &self.score)
            .field("segments", &self.segments)
            .finish()
    }
}

/// Flatten a route tree into matchable branches
///
/// Depth-first; children are visited before their own node is appended, so
/// deeper branches precede shallower ones in traversal order. Final order is
/// governed by [`rank_route_branches`], not traversal order. Path-less,
/// non-index nodes are traversed for their children but never become a
/// branch themselves.
///
/// # Errors
///
/// An absolute child path that does not extend its parent's accumulated path
/// is a [`ConfigurationError::AbsolutePathMismatch`].
pub fn flatten_routes<T>(
    routes: &[RouteNode<T>],
) -> Result<Vec<RouteBranch<'_, T>>, ConfigurationError> {
    let mut branches = Vec::new();
    flatten_into(routes, &mut branches, &[], "")?;
    debug_log!("Flattened route tree into {} branches", branches.len());
    Ok(branches)
}

fn flatten_into<'a, T>(
    routes: &'a [RouteNode<T>],
    branches: &mut Vec<RouteBranch<'a, T>>,
    parents_meta: &[RouteMeta<'a, T>],
    parent_path: &str,
) -> Result<(), ConfigurationError> {
    for (index, route) in routes.iter().enumerate() {
        let mut relative_path = route.path().unwrap_or("").to_string();

        // An absolute child path declares itself as already including all
        // ancestor paths; only the remainder is kept as its relative path.
        if relative_path.starts_with('/') {
            if !relative_path.starts_with(parent_path) {
                return Err(ConfigurationError::AbsolutePathMismatch {
                    path: relative_path,
                    parent_path: parent_path.to_string(),
                });
            }
            relative_path = relative_path[parent_path.len()..].to_string();
        }

        let path = join_paths(&[parent_path, &relative_path]);

        let meta = RouteMeta {
            relative_path,
            case_sensitive: route.is_case_sensitive(),
            children_index: index,
            node: route,
        };

        let mut routes_meta = parents_meta.to_vec();
        routes_meta.push(meta);

        // Children first, so deeper branches land before their parents.
        if !route.children().is_empty() {
            flatten_into(route.children(), branches, &routes_meta, &path)?;
        }

        // Path-less non-index nodes never match by themselves.
        if route.path().is_none() && !route.is_index() {
            continue;
        }

        let score = compute_score(&path, route.is_index());
        branches.push(RouteBranch {
            full_path: path,
            score,
            segments: routes_meta,
        });
    }

    Ok(())
}

// ============================================================================
// Ranking
// ============================================================================

const DYNAMIC_SEGMENT_VALUE: i32 = 3;
const INDEX_ROUTE_VALUE: i32 = 2;
const EMPTY_SEGMENT_VALUE: i32 = 1;
const STATIC_SEGMENT_VALUE: i32 = 10;
const SPLAT_PENALTY: i32 = -2;

fn is_splat(segment: &str) -> bool {
    segment == "*"
}

/// Whether a segment has the dynamic-parameter shape `:name`
fn is_dynamic_segment(segment: &str) -> bool {
    segment.strip_prefix(':').is_some_and(|name| {
        !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

/// Specificity score for a full path
fn compute_score(path: &str, index: bool) -> i32 {
    let segments: Vec<&str> = path.split('/').collect();

    let mut initial_score = segments.len() as i32;
    if segments.iter().copied().any(is_splat) {
        initial_score += SPLAT_PENALTY;
    }
    if index {
        initial_score += INDEX_ROUTE_VALUE;
    }

    segments
        .iter()
        .filter(|s| !is_splat(s))
        .fold(initial_score, |score, segment| {
            score
                + if is_dynamic_segment(segment) {
                    DYNAMIC_SEGMENT_VALUE
                } else if segment.is_empty() {
                    EMPTY_SEGMENT_VALUE
                } else {
                    STATIC_SEGMENT_VALUE
                }
        })
}

/// Order branches from most to least specific, in place
///
/// The sort is stable: equal-specificity branches that are not siblings keep
/// their relative input order, and re-ranking an already-ranked list is a
/// no-op.
pub fn rank_route_branches<T>(branches: &mut [RouteBranch<'_, T>]) {
    branches.sort_by(|a, b| {
        if a.score == b.score {
            compare_indexes(
                &a.segments.iter().map(|m| m.children_index).collect::<Vec<_>>(),
                &b.segments.iter().map(|m| m.children_index).collect::<Vec<_>>(),
            )
        } else {
            // Higher score first
            b.score.cmp(&a.score)
        }
    });
}

/// Sibling tie-break by declaration order
///
/// Two branches are siblings when their declaration-index chains agree on
/// every level but the last. Non-siblings compare equal so the stable sort
/// keeps their input order.
fn compare_indexes(a: &[usize], b: &[usize]) -> Ordering {
    match (a.split_last(), b.split_last()) {
        (Some((a_last, a_init)), Some((b_last, b_init))) if a_init == b_init => {
            a_last.cmp(b_last)
        }
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{IndexRoute, LayoutRoute, PathRoute};

    fn tree() -> Vec<RouteNode<&'static str>> {
        vec![
            PathRoute::new("/")
                .view("root-layout")
                .child(IndexRoute::new().view("home"))
                .child(
                    PathRoute::new("users")
                        .view("users-layout")
                        .child(IndexRoute::new().view("user-list"))
                        .child(PathRoute::new(":id").view("user-detail")),
                )
                .child(PathRoute::new("files/*").view("file-browser"))
                .into(),
        ]
    }

    #[test]
    fn test_flatten_produces_expected_paths() {
        let routes = tree();
        let branches = flatten_routes(&routes).unwrap();

        let paths: Vec<&str> = branches.iter().map(|b| b.full_path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/", "/users", "/users/:id", "/users", "/files/*", "/"]
        );
    }

    #[test]
    fn test_flatten_full_path_has_no_doubled_separators() {
        let routes: Vec<RouteNode<()>> = vec![PathRoute::new("/users/")
            .child(PathRoute::new("/users/:id/"))
            .into()];
        let branches = flatten_routes(&routes).unwrap();

        for branch in &branches {
            assert!(!branch.full_path.contains("//"), "{}", branch.full_path);
        }
    }

    #[test]
    fn test_flatten_skips_layout_nodes() {
        let routes: Vec<RouteNode<&str>> = vec![LayoutRoute::new()
            .view("shell")
            .child(PathRoute::new("a").view("a"))
            .child(PathRoute::new("b").view("b"))
            .into()];
        let branches = flatten_routes(&routes).unwrap();

        let paths: Vec<&str> = branches.iter().map(|b| b.full_path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);

        // The layout still participates in each branch's segment chain
        assert_eq!(branches[0].segments.len(), 2);
        assert_eq!(branches[0].segments[0].relative_path, "");
    }

    #[test]
    fn test_flatten_absolute_child_path() {
        let routes: Vec<RouteNode<()>> = vec![PathRoute::new("/users")
            .child(PathRoute::new("/users/:id"))
            .into()];
        let branches = flatten_routes(&routes).unwrap();

        let child = branches
            .iter()
            .find(|b| b.full_path == "/users/:id")
            .unwrap();
        assert_eq!(child.segments.last().unwrap().relative_path, "/:id");
    }

    #[test]
    fn test_flatten_rejects_absolute_path_outside_parent() {
        let routes: Vec<RouteNode<()>> = vec![PathRoute::new("/users")
            .child(PathRoute::new("/orders/:id"))
            .into()];
        let result = flatten_routes(&routes);

        assert!(matches!(
            result,
            Err(ConfigurationError::AbsolutePathMismatch { .. })
        ));
    }

    #[test]
    fn test_score_constants() {
        assert_eq!(compute_score("/users", false), 13);
        assert_eq!(compute_score("/users/:id", false), 17);
        assert_eq!(compute_score("/", false), 4);
        assert_eq!(compute_score("/", true), 6);
        assert_eq!(compute_score("/files/*", false), 12);
        // Doubled separator yields an empty segment worth 1
        assert_eq!(compute_score("/users//edit", false), 26);
    }

    #[test]
    fn test_score_monotonic_in_static_segments() {
        // Strictly more static literals, same dynamic/wildcard counts
        assert!(compute_score("/blog/feed", false) > compute_score("/blog", false));
        assert!(compute_score("/a/b/:id", false) > compute_score("/a/:id", false));
    }

    #[test]
    fn test_rank_orders_by_specificity() {
        let routes: Vec<RouteNode<()>> = vec![
            PathRoute::new("/files/*").into(),
            PathRoute::new("/files/:name").into(),
            PathRoute::new("/files/recent").into(),
        ];
        let mut branches = flatten_routes(&routes).unwrap();
        rank_route_branches(&mut branches);

        let paths: Vec<&str> = branches.iter().map(|b| b.full_path.as_str()).collect();
        assert_eq!(paths, vec!["/files/recent", "/files/:name", "/files/*"]);
    }

    #[test]
    fn test_rank_sibling_tie_break_by_declaration_order() {
        let routes: Vec<RouteNode<()>> = vec![
            PathRoute::new("/items/:id").into(),
            PathRoute::new("/items/:slug").into(),
        ];
        let mut branches = flatten_routes(&routes).unwrap();
        rank_route_branches(&mut branches);

        assert_eq!(branches[0].full_path, "/items/:id");
        assert_eq!(branches[1].full_path, "/items/:slug");
    }

    #[test]
    fn test_rank_is_idempotent() {
        let routes = tree();
        let mut branches = flatten_routes(&routes).unwrap();
        rank_route_branches(&mut branches);
        let once: Vec<String> = branches.iter().map(|b| b.full_path.clone()).collect();

        rank_route_branches(&mut branches);
        let twice: Vec<String> = branches.iter().map(|b| b.full_path.clone()).collect();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_compare_indexes_non_siblings_equal() {
        assert_eq!(compare_indexes(&[0, 1], &[1, 0]), Ordering::Equal);
        assert_eq!(compare_indexes(&[0], &[0, 1]), Ordering::Equal);
        assert_eq!(compare_indexes(&[0, 0], &[0, 1]), Ordering::Less);
    }
}

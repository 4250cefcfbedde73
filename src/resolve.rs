//! Relative navigation target resolution
//!
//! Given a matched route hierarchy and a possibly-relative navigation
//! target, [`resolve_to`] computes the absolute destination. Leading `..`
//! segments walk up the *route* hierarchy (one matched route per `..`), not
//! the URL segment structure; this is the key difference from how a plain
//! href resolves. [`resolve_path`] is the standalone directory-style
//! resolver used underneath.

use crate::path::{Path, PartialPath};

/// Resolve a target against a single "from" pathname
///
/// An absolute target pathname is used verbatim; a relative one is resolved
/// directory-style against `from_pathname` (`.` is a no-op, `..` pops one
/// segment and never pops past the root); a target with no pathname keeps
/// `from_pathname`. Search and hash are normalized onto the result.
///
/// # Example
///
/// ```
/// use ranked_router::resolve_path;
///
/// let path = resolve_path("settings?tab=profile", "/users/42");
/// assert_eq!(path.pathname, "/users/42/settings");
/// assert_eq!(path.search, "?tab=profile");
///
/// assert_eq!(resolve_path("../jobs", "/users/42").pathname, "/users/jobs");
/// assert_eq!(resolve_path("/about", "/users/42").pathname, "/about");
/// ```
pub fn resolve_path(to: impl Into<PartialPath>, from_pathname: &str) -> Path {
    let to = to.into();

    let pathname = match to.pathname.as_deref() {
        None | Some("") => from_pathname.to_string(),
        Some(p) if p.starts_with('/') => p.to_string(),
        Some(p) => resolve_pathname(p, from_pathname),
    };

    Path {
        pathname,
        search: normalize_search(to.search.as_deref().unwrap_or("")),
        hash: normalize_hash(to.hash.as_deref().unwrap_or("")),
    }
}

/// Directory-style resolution of a relative path against a base pathname
fn resolve_pathname(relative_path: &str, from_pathname: &str) -> String {
    let mut segments: Vec<&str> = from_pathname.trim_end_matches('/').split('/').collect();

    for segment in relative_path.split('/') {
        if segment == ".." {
            // Keep the root "" segment so the pathname starts at /
            if segments.len() > 1 {
                segments.pop();
            }
        } else if segment != "." {
            segments.push(segment);
        }
    }

    if segments.len() > 1 {
        segments.join("/")
    } else {
        "/".to_string()
    }
}

/// Resolve a navigation target against a matched route hierarchy
///
/// `route_pathnames` is the chain of matched ancestor pathnames, root first
/// (see [`route_pathnames`](crate::route_pathnames)); `location_pathname` is
/// the current location. Rules:
///
/// - a target with no pathname (search/hash only) resolves against
///   `location_pathname`, not any route pathname
/// - each leading `..` removes one entry from the route chain; more `..`
///   segments than routes falls back to the root
/// - the empty-string target resolves to the deepest matched route pathname
/// - an explicit trailing `/` on the target is preserved on the result
///
/// # Example
///
/// ```
/// use ranked_router::resolve_to;
///
/// let routes = vec![
///     "/".to_string(),
///     "/users".to_string(),
///     "/users/42".to_string(),
/// ];
///
/// let path = resolve_to("..", &routes, "/users/42/edit");
/// assert_eq!(path.pathname, "/users");
///
/// let path = resolve_to("?tab=posts", &routes, "/users/42/edit");
/// assert_eq!(path.pathname, "/users/42/edit");
/// assert_eq!(path.search, "?tab=posts");
/// ```
pub fn resolve_to(
    to: impl Into<PartialPath>,
    route_pathnames: &[String],
    location_pathname: &str,
) -> Path {
    let mut to = to.into();

    // The empty pathname is the "current route" target.
    let to_pathname: Option<String> = match to.pathname.as_deref() {
        None => None,
        Some("") => Some("/".to_string()),
        Some(p) => Some(p.to_string()),
    };

    // A target that provides a pathname resolves relative to the route
    // hierarchy; a search/hash-only target resolves relative to the current
    // location instead.
    let from: String = match to_pathname.as_deref() {
        None => location_pathname.to_string(),
        Some(tp) => {
            let mut route_pathname_index = route_pathnames.len() as isize - 1;

            if tp.starts_with("..") {
                let mut to_segments: Vec<&str> = tp.split('/').collect();

                // Each leading ".." segment means "go up one route" instead
                // of "go up one URL segment".
                while to_segments.first() == Some(&"..") {
                    to_segments.remove(0);
                    route_pathname_index -= 1;
                }

                to.pathname = Some(to_segments.join("/"));
            }

            // More ".." segments than parent routes resolves from the root.
            if route_pathname_index >= 0 {
                route_pathnames[route_pathname_index as usize].clone()
            } else {
                "/".to_string()
            }
        }
    };

    let mut path = resolve_path(to, &from);

    // Preserve the explicit trailing-slash intent of the original target.
    if let Some(tp) = to_pathname.as_deref() {
        if tp != "/" && tp.ends_with('/') && !path.pathname.ends_with('/') {
            path.pathname.push('/');
        }
    }

    path
}

/// Normalize a search string: `""` or `?...`
fn normalize_search(search: &str) -> String {
    if search.is_empty() || search == "?" {
        String::new()
    } else if search.starts_with('?') {
        search.to_string()
    } else {
        format!("?{}", search)
    }
}

/// Normalize a hash string: `""` or `#...`
fn normalize_hash(hash: &str) -> String {
    if hash.is_empty() || hash == "#" {
        String::new()
    } else if hash.starts_with('#') {
        hash.to_string()
    } else {
        format!("#{}", hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routes() -> Vec<String> {
        vec![
            "/".to_string(),
            "/users".to_string(),
            "/users/42".to_string(),
        ]
    }

    // resolve_path

    #[test]
    fn test_resolve_path_relative() {
        assert_eq!(resolve_path("settings", "/users/42").pathname, "/users/42/settings");
        assert_eq!(resolve_path("../jobs", "/users/42").pathname, "/users/jobs");
        assert_eq!(resolve_path("./settings", "/users/42").pathname, "/users/42/settings");
    }

    #[test]
    fn test_resolve_path_absolute_verbatim() {
        assert_eq!(resolve_path("/about", "/users/42").pathname, "/about");
        assert_eq!(resolve_path("/about/", "/users/42").pathname, "/about/");
    }

    #[test]
    fn test_resolve_path_never_pops_past_root() {
        assert_eq!(resolve_path("../../../up", "/users").pathname, "/up");
        assert_eq!(resolve_path("../..", "/users").pathname, "/");
    }

    #[test]
    fn test_resolve_path_no_pathname_keeps_from() {
        let path = resolve_path("?q=1#top", "/users/42");
        assert_eq!(path.pathname, "/users/42");
        assert_eq!(path.search, "?q=1");
        assert_eq!(path.hash, "#top");
    }

    // resolve_to

    #[test]
    fn test_resolve_to_dotdot_walks_route_chain() {
        let path = resolve_to("..", &routes(), "/users/42/edit");
        assert_eq!(path.pathname, "/users");

        let path = resolve_to("../..", &routes(), "/users/42/edit");
        assert_eq!(path.pathname, "/");
    }

    #[test]
    fn test_resolve_to_dotdot_with_suffix() {
        let path = resolve_to("../jobs", &routes(), "/users/42/edit");
        // One "..": resolve "jobs" from "/users"
        assert_eq!(path.pathname, "/users/jobs");
    }

    #[test]
    fn test_resolve_to_excess_dotdot_falls_back_to_root() {
        let path = resolve_to("../../../../x", &routes(), "/users/42/edit");
        assert_eq!(path.pathname, "/x");
    }

    #[test]
    fn test_resolve_to_relative_uses_deepest_route() {
        let path = resolve_to("edit", &routes(), "/users/42/edit");
        assert_eq!(path.pathname, "/users/42/edit");
    }

    #[test]
    fn test_resolve_to_search_only_uses_location() {
        // Relative to the current location, not the deepest route pathname
        let shallow_routes = vec!["/".to_string(), "/users".to_string()];
        let path = resolve_to("?page=2", &shallow_routes, "/users/42");
        assert_eq!(path.pathname, "/users/42");
        assert_eq!(path.search, "?page=2");
    }

    #[test]
    fn test_resolve_to_empty_target_is_current_route() {
        let path = resolve_to("", &routes(), "/users/42/edit");
        assert_eq!(path.pathname, "/users/42");
    }

    #[test]
    fn test_resolve_to_absolute_target() {
        let path = resolve_to("/about", &routes(), "/users/42");
        assert_eq!(path.pathname, "/about");
    }

    #[test]
    fn test_resolve_to_preserves_trailing_slash() {
        let path = resolve_to("settings/", &routes(), "/users/42");
        assert_eq!(path.pathname, "/users/42/settings/");

        let path = resolve_to("..", &routes(), "/users/42");
        assert!(!path.pathname.ends_with('/') || path.pathname == "/");
    }

    #[test]
    fn test_resolve_to_no_routes() {
        let path = resolve_to("anywhere", &[], "/current");
        // No matched routes: resolve from the root
        assert_eq!(path.pathname, "/anywhere");
    }

    // normalization

    #[test]
    fn test_normalize_search() {
        assert_eq!(normalize_search(""), "");
        assert_eq!(normalize_search("?"), "");
        assert_eq!(normalize_search("q=1"), "?q=1");
        assert_eq!(normalize_search("?q=1"), "?q=1");
    }

    #[test]
    fn test_normalize_hash() {
        assert_eq!(normalize_hash(""), "");
        assert_eq!(normalize_hash("#"), "");
        assert_eq!(normalize_hash("top"), "#top");
        assert_eq!(normalize_hash("#top"), "#top");
    }

    #[test]
    fn test_resolved_path_display() {
        let path = resolve_to("settings?tab=a#top", &routes(), "/users/42");
        assert_eq!(path.to_string(), "/users/42/settings?tab=a#top");
    }
}

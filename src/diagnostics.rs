//! Advisory diagnostics for matching and resolution
//!
//! Non-fatal conditions (a malformed percent-encoded parameter, a pattern
//! spelled with a bare `*`, an unmatched pathname) are collected into an
//! explicit [`Diagnostics`] value owned by the caller instead of being
//! funneled through process-wide warn-once state. Repeated identical
//! diagnostics are deduplicated by key; each distinct diagnostic is also
//! emitted once through the logging layer.

use crate::warn_log;
use std::collections::HashSet;
use std::fmt;

/// A single advisory condition observed during matching or resolution
///
/// Diagnostics never abort the operation that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A captured parameter value contains a malformed percent-encoding
    /// and was kept undecoded
    MalformedParamEncoding { param: String, value: String },

    /// A pattern ends in a bare `*` not preceded by `/` and was compiled
    /// as if `/*` had been written
    SplatWithoutSlash { path: String },

    /// No branch matched the given pathname
    NoBranchMatched { pathname: String },

    /// A branch matched but its leaf route carries no view
    MatchedLeafWithoutView { path: String },
}

impl Diagnostic {
    /// Deduplication key: two diagnostics with the same key are reported once
    fn key(&self) -> String {
        match self {
            Diagnostic::MalformedParamEncoding { param, value } => {
                format!("decode:{}:{}", param, value)
            }
            Diagnostic::SplatWithoutSlash { path } => format!("splat:{}", path),
            Diagnostic::NoBranchMatched { pathname } => format!("no-match:{}", pathname),
            Diagnostic::MatchedLeafWithoutView { path } => format!("no-view:{}", path),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MalformedParamEncoding { param, value } => {
                write!(
                    f,
                    "The value for the URL param \"{}\" will not be decoded because \
                     the string \"{}\" is a malformed URL segment",
                    param, value
                )
            }
            Diagnostic::SplatWithoutSlash { path } => {
                write!(
                    f,
                    "Route path \"{}\" will be treated as if it were \"{}\" because \
                     the `*` character must always follow a `/` in the pattern",
                    path,
                    path.trim_end_matches('*').to_string() + "/*"
                )
            }
            Diagnostic::NoBranchMatched { pathname } => {
                write!(f, "No routes matched location \"{}\"", pathname)
            }
            Diagnostic::MatchedLeafWithoutView { path } => {
                write!(
                    f,
                    "Matched leaf route at location \"{}\" does not have a view",
                    path
                )
            }
        }
    }
}

/// Collector for advisory diagnostics
///
/// Pass a collector into the `_with` variants of the matching functions to
/// observe warnings; the plain variants log them and throw them away.
///
/// # Example
///
/// ```
/// use ranked_router::{match_path_with, Diagnostics};
///
/// let mut diagnostics = Diagnostics::new();
/// let matched = match_path_with("/files*", "/files/report.pdf", &mut diagnostics);
/// assert!(matched.is_some());
/// assert_eq!(diagnostics.len(), 1); // bare `*` advisory
/// ```
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    seen: HashSet<String>,
}

impl Diagnostics {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic
    ///
    /// Duplicates (by key) are dropped. The first occurrence is also emitted
    /// through the logging layer.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        if self.seen.insert(diagnostic.key()) {
            warn_log!("{}", diagnostic);
            self.entries.push(diagnostic);
        }
    }

    /// All collected diagnostics, in the order first observed
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Iterate over collected diagnostics
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Number of distinct diagnostics collected
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no diagnostics were collected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all collected diagnostics and dedup state
    pub fn clear(&mut self) {
        self.entries.clear();
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_read_back() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::NoBranchMatched {
            pathname: "/missing".to_string(),
        });

        assert_eq!(diagnostics.len(), 1);
        assert!(!diagnostics.is_empty());
        assert!(matches!(
            diagnostics.entries()[0],
            Diagnostic::NoBranchMatched { .. }
        ));
    }

    #[test]
    fn test_identical_diagnostics_deduplicate() {
        let mut diagnostics = Diagnostics::new();
        for _ in 0..3 {
            diagnostics.push(Diagnostic::SplatWithoutSlash {
                path: "/files*".to_string(),
            });
        }

        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_distinct_diagnostics_all_kept() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::NoBranchMatched {
            pathname: "/a".to_string(),
        });
        diagnostics.push(Diagnostic::NoBranchMatched {
            pathname: "/b".to_string(),
        });

        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_clear_resets_dedup_state() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::NoBranchMatched {
            pathname: "/a".to_string(),
        });
        diagnostics.clear();

        assert!(diagnostics.is_empty());

        diagnostics.push(Diagnostic::NoBranchMatched {
            pathname: "/a".to_string(),
        });
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_display_messages() {
        let diagnostic = Diagnostic::SplatWithoutSlash {
            path: "/files*".to_string(),
        };
        let message = diagnostic.to_string();
        assert!(message.contains("/files*"));
        assert!(message.contains("/files/*"));

        let diagnostic = Diagnostic::MalformedParamEncoding {
            param: "id".to_string(),
            value: "%zz".to_string(),
        };
        assert!(diagnostic.to_string().contains("\"id\""));
    }
}

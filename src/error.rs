//! Error handling for the routing engine
//!
//! Provides the fatal error type raised for mistakes in route declarations.
//! A pathname that simply fails to match is not an error; matching returns
//! `None` for that case.

use std::fmt;

/// Errors raised for invalid route declarations
///
/// These indicate a programming mistake in the route tree or in a path
/// pattern and are never silently repaired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// An absolute child path does not extend its parent's accumulated path
    AbsolutePathMismatch {
        /// The offending child path
        path: String,
        /// The accumulated path of all parent routes
        parent_path: String,
    },

    /// A path pattern declares the same `:name` parameter twice
    DuplicateParam { name: String, path: String },

    /// `generate_path` was called without a value for a declared parameter
    MissingParam { name: String, path: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::AbsolutePathMismatch { path, parent_path } => {
                write!(
                    f,
                    "Absolute route path \"{}\" nested under path \"{}\" is not valid. \
                     An absolute child route path must start with the combined path of \
                     all its parent routes",
                    path, parent_path
                )
            }
            ConfigurationError::DuplicateParam { name, path } => {
                write!(
                    f,
                    "Duplicate route parameter \":{}\" in path \"{}\"",
                    name, path
                )
            }
            ConfigurationError::MissingParam { name, path } => {
                write!(f, "Missing \":{}\" param for path \"{}\"", name, path)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_mismatch_display() {
        let error = ConfigurationError::AbsolutePathMismatch {
            path: "/other/dashboard".to_string(),
            parent_path: "/users".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("/other/dashboard"));
        assert!(message.contains("/users"));
    }

    #[test]
    fn test_duplicate_param_display() {
        let error = ConfigurationError::DuplicateParam {
            name: "id".to_string(),
            path: "/users/:id/posts/:id".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Duplicate route parameter \":id\" in path \"/users/:id/posts/:id\""
        );
    }

    #[test]
    fn test_missing_param_display() {
        let error = ConfigurationError::MissingParam {
            name: "id".to_string(),
            path: "/users/:id".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing \":id\" param for path \"/users/:id\""
        );
    }
}

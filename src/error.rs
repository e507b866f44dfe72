//! Error types for alias generation and resolution.

use thiserror::Error;

use crate::alias::AliasField;

/// A specialized Result type for alias operations.
pub type Result<T> = std::result::Result<T, AliasError>;

/// The error type for alias generation and resolution.
///
/// `MissingComponent` is internal and recoverable: alias generation drops the
/// candidate and moves on. Every other variant is a user-facing resolution
/// failure; the user recovers by retyping a more specific alias.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AliasError {
    #[error("alias component {0:?} is not available for this engine")]
    MissingComponent(AliasField),

    #[error("no runtime engine matches alias '{alias}'")]
    NotFound { alias: String },

    #[error("alias '{alias}' does not match any engine supporting format(s): {}", .formats.join(", "))]
    IncompatibleFormats { alias: String, formats: Vec<String> },

    #[error("alias '{alias}' is ambiguous; specify one of: {}", .candidates.join(", "))]
    Ambiguous {
        alias: String,
        candidates: Vec<String>,
    },

    #[error("alias '{alias}' matches multiple engine names ({}); cannot pick a latest version", .names.join(", "))]
    CannotDisambiguateNames { alias: String, names: Vec<String> },

    #[error("alias '{alias}' already specifies a version; it cannot be combined with latest-version selection")]
    VersionQualifiedLatest { alias: String },
}

impl AliasError {
    /// Create a not-found error for the given alias.
    pub fn not_found<S: Into<String>>(alias: S) -> Self {
        AliasError::NotFound {
            alias: alias.into(),
        }
    }

    /// Create an ambiguity error listing the full aliases of all candidates.
    pub fn ambiguous<S: Into<String>>(alias: S, candidates: Vec<String>) -> Self {
        AliasError::Ambiguous {
            alias: alias.into(),
            candidates,
        }
    }

    /// True for conditions a user is expected to recover from by retyping.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, AliasError::MissingComponent(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AliasError::not_found("llama.cpp-cuda");
        assert_eq!(
            err.to_string(),
            "no runtime engine matches alias 'llama.cpp-cuda'"
        );

        let err = AliasError::ambiguous(
            "llama.cpp",
            vec!["a-1.0.0".to_string(), "a-1.1.0".to_string()],
        );
        assert!(err.to_string().contains("a-1.0.0, a-1.1.0"));

        let err = AliasError::IncompatibleFormats {
            alias: "mlx-engine".to_string(),
            formats: vec!["gguf".to_string()],
        };
        assert!(err.to_string().contains("gguf"));
    }

    #[test]
    fn test_user_facing_split() {
        assert!(
            !AliasError::MissingComponent(AliasField::CpuInstructionSetExtensions)
                .is_user_facing()
        );
        assert!(AliasError::not_found("x").is_user_facing());
    }
}

//! Cross-cutting error types for Lectern.
//!
//! Crate-specific errors (`AiError`, `ConfigError`, `RelayError`) live in
//! their own crates. They converge in `lec-cli` via `anyhow`.

use thiserror::Error;

/// Errors raised by request validation and enum parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A request failed a precondition check.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A value could not be parsed into one of the core enums.
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn detail(err: &CoreError) -> &str {
        match err {
            CoreError::Validation(reason) => reason,
            CoreError::UnknownVariant { value, .. } => value,
        }
    }

    #[test]
    fn every_variant_names_its_detail() {
        let errors = [
            CoreError::Validation("grade_level must be between 1 and 12".into()),
            CoreError::UnknownVariant {
                kind: "difficulty",
                value: "brutal".into(),
            },
        ];
        for err in &errors {
            assert!(err.to_string().contains(detail(err)), "{err}");
        }
        assert_eq!(errors[1].to_string(), "Unknown difficulty 'brutal'");
    }
}

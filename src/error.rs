//! Typed declaration errors.

use thiserror::Error;

/// Result type used by every declaration entry point.
pub type DeclareResult<T> = Result<T, DeclareError>;

#[derive(Error, Debug)]
pub enum DeclareError {
    #[error("missing required field: {kind} '{field}'")]
    MissingField { kind: &'static str, field: &'static str },
    /// Only raised when the registry runs in strict mode.
    #[error("duplicate declaration: {kind} '{name}' is already registered")]
    Collision { kind: &'static str, name: String },
    #[error("config parse: {0}")]
    Config(#[from] serde_json::Error),
}

impl DeclareError {
    pub fn missing(kind: &'static str, field: &'static str) -> Self {
        Self::MissingField { kind, field }
    }

    pub fn collision(kind: &'static str, name: impl Into<String>) -> Self {
        Self::Collision {
            kind,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_kind_and_field() {
        let err = DeclareError::missing("table", "name");
        assert_eq!(err.to_string(), "missing required field: table 'name'");
    }

    #[test]
    fn collision_message_names_the_duplicate() {
        let err = DeclareError::collision("resource", "users");
        assert!(matches!(&err, DeclareError::Collision { name, .. } if name == "users"));
        assert_eq!(
            err.to_string(),
            "duplicate declaration: resource 'users' is already registered"
        );
    }
}

//! Declaration validation: required fields only. Backend-specific options are never checked.

use crate::config::{AppConfig, IdentityPoolConfig, LogStreamConfig, TableConfig};
use crate::error::{DeclareError, DeclareResult};

fn require(kind: &'static str, field: &'static str, value: &str) -> DeclareResult<()> {
    if value.trim().is_empty() {
        return Err(DeclareError::missing(kind, field));
    }
    Ok(())
}

pub fn validate_app(config: &AppConfig) -> DeclareResult<()> {
    require("application", "name", &config.name)
}

pub fn validate_table(config: &TableConfig) -> DeclareResult<()> {
    require("table", "name", &config.name)?;
    require("table", "partition_key", &config.partition_key)
}

pub fn validate_log_stream(config: &LogStreamConfig) -> DeclareResult<()> {
    require("log stream", "name", &config.name)
}

pub fn validate_identity_pool(config: &IdentityPoolConfig) -> DeclareResult<()> {
    require("identity pool", "name", &config.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_rejected() {
        let err = validate_table(&TableConfig::new("  ")).unwrap_err();
        assert!(matches!(
            err,
            DeclareError::MissingField { kind: "table", field: "name" }
        ));
        assert!(validate_app(&AppConfig::new("")).is_err());
        assert!(validate_log_stream(&LogStreamConfig::new("")).is_err());
        assert!(validate_identity_pool(&IdentityPoolConfig::new("")).is_err());
    }

    #[test]
    fn blank_partition_key_is_rejected() {
        let err = validate_table(&TableConfig::new("users").partition_key("")).unwrap_err();
        assert!(matches!(
            err,
            DeclareError::MissingField { field: "partition_key", .. }
        ));
    }

    #[test]
    fn named_declarations_pass() {
        assert!(validate_app(&AppConfig::new("api")).is_ok());
        assert!(validate_table(&TableConfig::new("users")).is_ok());
    }
}

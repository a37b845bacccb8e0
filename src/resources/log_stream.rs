//! Log stream resource with an append-only local log.

use crate::config::{validate_log_stream, LogStreamConfig};
use crate::error::DeclareResult;
use crate::registry::Registry;
use crate::resources::Resource;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Info,
    Audit,
    Write,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Audit => "AUDIT",
            Level::Write => "WRITE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: Level,
    /// Set by `info` and `audit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Set by `write`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub fields: Map<String, Value>,
    pub at: DateTime<Utc>,
}

#[derive(Debug)]
struct LogStreamInner {
    config: LogStreamConfig,
    entries: RwLock<Vec<LogEntry>>,
}

#[derive(Clone, Debug)]
pub struct LogStream {
    inner: Arc<LogStreamInner>,
}

impl LogStream {
    pub fn declare(registry: &mut Registry, config: LogStreamConfig) -> DeclareResult<LogStream> {
        validate_log_stream(&config)?;
        let stream = LogStream {
            inner: Arc::new(LogStreamInner {
                config,
                entries: RwLock::new(Vec::new()),
            }),
        };
        registry.put_resource(Resource::LogStream(stream.clone()))?;
        Ok(stream)
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn retention(&self) -> &str {
        &self.inner.config.retention
    }

    pub fn config(&self) -> &LogStreamConfig {
        &self.inner.config
    }

    pub fn same_as(&self, other: &LogStream) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn info(&self, message: impl Into<String>) {
        self.info_with(message, Map::new());
    }

    pub fn info_with(&self, message: impl Into<String>, fields: Map<String, Value>) {
        self.push(Level::Info, Some(message.into()), None, fields);
    }

    pub fn audit(&self, message: impl Into<String>) {
        self.audit_with(message, Map::new());
    }

    pub fn audit_with(&self, message: impl Into<String>, fields: Map<String, Value>) {
        self.push(Level::Audit, Some(message.into()), None, fields);
    }

    /// Append an arbitrary payload. Payloads that fail to serialize are skipped;
    /// returns whether the entry was recorded.
    pub fn write<T: Serialize>(&self, entry: &T) -> bool {
        let entry = match serde_json::to_value(entry) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(stream = %self.name(), error = %e, "write skipped: entry not serializable");
                return false;
            }
        };
        self.push(Level::Write, None, Some(entry), Map::new());
        true
    }

    /// Snapshot of the log in append order.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.inner.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&self, level: Level, message: Option<String>, entry: Option<Value>, fields: Map<String, Value>) {
        tracing::debug!(
            stream = %self.name(),
            severity = level.as_str(),
            text = message.as_deref().unwrap_or(""),
            "log append"
        );
        self.inner.entries.write().push(LogEntry {
            level,
            message,
            entry,
            fields,
            at: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stream() -> LogStream {
        let mut registry = Registry::new();
        LogStream::declare(&mut registry, LogStreamConfig::new("test-logs")).unwrap()
    }

    #[test]
    fn info_then_audit_keeps_order_and_fields() {
        let logs = stream();
        let mut fields = Map::new();
        fields.insert("user".into(), json!("admin"));
        logs.info_with("test message", fields);
        logs.audit("sensitive action");

        let entries = logs.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::Info);
        assert_eq!(entries[0].message.as_deref(), Some("test message"));
        assert_eq!(entries[0].fields.get("user"), Some(&json!("admin")));
        assert_eq!(entries[1].level, Level::Audit);
        assert_eq!(entries[1].message.as_deref(), Some("sensitive action"));
        assert!(entries[0].at <= entries[1].at);
    }

    #[test]
    fn write_stores_payload_without_message() {
        let logs = stream();
        assert!(logs.write(&json!({ "event": "login" })));
        let entries = logs.entries();
        assert_eq!(entries[0].level, Level::Write);
        assert_eq!(entries[0].entry, Some(json!({ "event": "login" })));
        assert!(entries[0].message.is_none());
    }

    #[test]
    fn unserializable_write_is_skipped() {
        use std::collections::HashMap;
        let logs = stream();
        // JSON object keys must be strings
        let mut bad: HashMap<(u8, u8), &str> = HashMap::new();
        bad.insert((1, 2), "pair");
        assert!(!logs.write(&bad));
        assert!(logs.is_empty());
    }

    #[test]
    fn level_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Level::Audit).unwrap(), json!("AUDIT"));
    }

    #[test]
    fn handle_clones_share_the_log() {
        let logs = stream();
        let other = logs.clone();
        other.info("from clone");
        assert_eq!(logs.len(), 1);
        assert!(logs.same_as(&other));
    }
}

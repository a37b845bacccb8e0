//! Declared backend primitives. Each handle is shared with the registry entry it created.

pub mod identity_pool;
pub mod log_stream;
pub mod table;

pub use identity_pool::IdentityPool;
pub use log_stream::{Level, LogEntry, LogStream};
pub use table::Table;

use crate::route::ResourceRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Table,
    LogStream,
    /// Declared as "Cognito" by authors.
    IdentityPool,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Table => "table",
            ResourceKind::LogStream => "log_stream",
            ResourceKind::IdentityPool => "identity_pool",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub enum Resource {
    Table(Table),
    LogStream(LogStream),
    IdentityPool(IdentityPool),
}

impl Resource {
    pub fn name(&self) -> &str {
        match self {
            Resource::Table(t) => t.name(),
            Resource::LogStream(l) => l.name(),
            Resource::IdentityPool(p) => p.name(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Table(_) => ResourceKind::Table,
            Resource::LogStream(_) => ResourceKind::LogStream,
            Resource::IdentityPool(_) => ResourceKind::IdentityPool,
        }
    }

    /// True when both point at the same declared object (not merely equal config).
    pub fn same_as(&self, other: &Resource) -> bool {
        match (self, other) {
            (Resource::Table(a), Resource::Table(b)) => a.same_as(b),
            (Resource::LogStream(a), Resource::LogStream(b)) => a.same_as(b),
            (Resource::IdentityPool(a), Resource::IdentityPool(b)) => a.same_as(b),
            _ => false,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Resource::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_log_stream(&self) -> Option<&LogStream> {
        match self {
            Resource::LogStream(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_identity_pool(&self) -> Option<&IdentityPool> {
        match self {
            Resource::IdentityPool(p) => Some(p),
            _ => None,
        }
    }

    /// Declared configuration as JSON, without any local mock state.
    pub fn config_json(&self) -> Value {
        let value = match self {
            Resource::Table(t) => serde_json::to_value(t.config()),
            Resource::LogStream(l) => serde_json::to_value(l.config()),
            Resource::IdentityPool(p) => serde_json::to_value(p.config()),
        };
        value.unwrap_or(Value::Null)
    }

    pub fn to_ref(&self) -> ResourceRef {
        ResourceRef {
            kind: self.kind(),
            name: self.name().to_string(),
        }
    }
}

impl From<&Resource> for ResourceRef {
    fn from(r: &Resource) -> Self {
        r.to_ref()
    }
}

impl From<&Table> for ResourceRef {
    fn from(t: &Table) -> Self {
        ResourceRef {
            kind: ResourceKind::Table,
            name: t.name().to_string(),
        }
    }
}

impl From<&LogStream> for ResourceRef {
    fn from(l: &LogStream) -> Self {
        ResourceRef {
            kind: ResourceKind::LogStream,
            name: l.name().to_string(),
        }
    }
}

impl From<&IdentityPool> for ResourceRef {
    fn from(p: &IdentityPool) -> Self {
        ResourceRef {
            kind: ResourceKind::IdentityPool,
            name: p.name().to_string(),
        }
    }
}

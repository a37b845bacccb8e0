//! Raw declaration configs. Typed fields are validated; anything else lands in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DeclareResult;

/// Application declaration. Unset stage/region fall back to the registry settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Provider-specific options, unvalidated.
    #[serde(flatten)]
    pub config: Map<String, Value>,
}

impl AppConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    pub fn from_json(value: Value) -> DeclareResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_partition_key")]
    pub partition_key: String,
    #[serde(default)]
    pub sort_key: Option<String>,
    #[serde(default = "default_true")]
    pub encryption: bool,
    #[serde(default = "default_true")]
    pub backups: bool,
    /// Attribute holding the item expiry, if any.
    #[serde(default)]
    pub ttl: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TableConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            partition_key: default_partition_key(),
            sort_key: None,
            encryption: true,
            backups: true,
            ttl: None,
            extra: Map::new(),
        }
    }

    pub fn partition_key(mut self, key: impl Into<String>) -> Self {
        self.partition_key = key.into();
        self
    }

    pub fn sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    pub fn encryption(mut self, on: bool) -> Self {
        self.encryption = on;
        self
    }

    pub fn backups(mut self, on: bool) -> Self {
        self.backups = on;
        self
    }

    pub fn ttl(mut self, attribute: impl Into<String>) -> Self {
        self.ttl = Some(attribute.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn from_json(value: Value) -> DeclareResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogStreamConfig {
    #[serde(default)]
    pub name: String,
    /// Retention spec such as "7d" or "30d". Not interpreted here.
    #[serde(default = "default_retention")]
    pub retention: String,
    #[serde(default = "default_true")]
    pub encryption: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LogStreamConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            retention: default_retention(),
            encryption: true,
            extra: Map::new(),
        }
    }

    pub fn retention(mut self, retention: impl Into<String>) -> Self {
        self.retention = retention.into();
        self
    }

    pub fn encryption(mut self, on: bool) -> Self {
        self.encryption = on;
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn from_json(value: Value) -> DeclareResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IdentityPoolConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mfa: bool,
    /// Strength label, e.g. "strong".
    #[serde(default = "default_password_policy")]
    pub password_policy: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdentityPoolConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mfa: false,
            password_policy: default_password_policy(),
            token_ttl: default_token_ttl(),
            extra: Map::new(),
        }
    }

    pub fn mfa(mut self, on: bool) -> Self {
        self.mfa = on;
        self
    }

    pub fn password_policy(mut self, label: impl Into<String>) -> Self {
        self.password_policy = label.into();
        self
    }

    pub fn token_ttl(mut self, ttl: impl Into<String>) -> Self {
        self.token_ttl = ttl.into();
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn from_json(value: Value) -> DeclareResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

fn default_true() -> bool {
    true
}

fn default_partition_key() -> String {
    "id".into()
}

fn default_retention() -> String {
    "7d".into()
}

fn default_password_policy() -> String {
    "strong".into()
}

fn default_token_ttl() -> String {
    "1h".into()
}

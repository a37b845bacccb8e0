//! Route and authorization records plus the author-facing specs that build them.

use crate::handler::HandlerId;
use crate::resources::ResourceKind;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_METHOD: &str = "GET";

/// Reference to a declared resource, by name. Resolution happens downstream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cognito: Option<bool>,
    #[serde(default)]
    pub scopes: Vec<String>,
}

/// One entry per decorated handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: String,
    /// Uppercase, de-duplicated, declaration order. Never empty.
    pub methods: Vec<String>,
    pub public: bool,
    pub handler: HandlerId,
    pub handler_name: String,
    pub auth: Option<AuthDescriptor>,
}

impl Route {
    /// Names of `{param}` placeholders in the path, in order.
    pub fn path_params(&self) -> Vec<String> {
        path_params(&self.path)
    }

    pub fn allows(&self, method: &str) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
    }
}

pub(crate) fn path_params(path: &str) -> Vec<String> {
    static PARAM: OnceLock<Regex> = OnceLock::new();
    let re = PARAM.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("path parameter pattern is valid")
    });
    re.captures_iter(path).map(|c| c[1].to_string()).collect()
}

/// Route attributes as declared. `methods` wins over `method`; neither means GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteSpec {
    path: String,
    method: Option<String>,
    methods: Option<Vec<String>>,
    public: bool,
}

impl RouteSpec {
    pub fn new(path: impl Into<String>) -> Self {
        RouteSpec {
            path: path.into(),
            method: None,
            methods: None,
            public: false,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Effective method set.
    pub fn resolved_methods(&self) -> Vec<String> {
        let raw: Vec<String> = match (&self.methods, &self.method) {
            (Some(list), _) => list.clone(),
            (None, Some(m)) => vec![m.clone()],
            (None, None) => Vec::new(),
        };
        let mut out: Vec<String> = Vec::with_capacity(raw.len());
        for m in raw {
            let m = m.trim().to_uppercase();
            if !m.is_empty() && !out.contains(&m) {
                out.push(m);
            }
        }
        if out.is_empty() {
            out.push(DEFAULT_METHOD.to_string());
        }
        out
    }
}

/// Authorization attributes as declared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSpec {
    resource: Option<ResourceRef>,
    cognito: Option<bool>,
    scopes: Vec<String>,
}

impl AuthSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resource(mut self, resource: impl Into<ResourceRef>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn cognito(mut self, on: bool) -> Self {
        self.cognito = Some(on);
        self
    }

    pub fn scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn into_descriptor(self) -> AuthDescriptor {
        AuthDescriptor {
            resource: self.resource,
            cognito: self.cognito,
            scopes: self.scopes,
        }
    }
}

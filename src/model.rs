//! Aggregated model: an owned, serializable view of a registry for downstream tooling.

use crate::app::Application;
use crate::handler::{Handler, HandlerId};
use crate::registry::Registry;
use crate::resources::ResourceKind;
use crate::route::{AuthDescriptor, Route};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HandlerSnapshot {
    pub id: HandlerId,
    pub name: String,
}

impl From<&Handler> for HandlerSnapshot {
    fn from(h: &Handler) -> Self {
        HandlerSnapshot {
            id: h.id(),
            name: h.name().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResourceSnapshot {
    pub name: String,
    pub kind: ResourceKind,
    /// Declared configuration only; local mock data is not part of the model.
    pub config: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteSnapshot {
    pub path: String,
    pub methods: Vec<String>,
    pub public: bool,
    pub handler: HandlerSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthDescriptor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub path_params: Vec<String>,
}

impl From<&Route> for RouteSnapshot {
    fn from(r: &Route) -> Self {
        RouteSnapshot {
            path: r.path.clone(),
            methods: r.methods.clone(),
            public: r.public,
            handler: HandlerSnapshot {
                id: r.handler,
                name: r.handler_name.clone(),
            },
            auth: r.auth.clone(),
            path_params: r.path_params(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelSnapshot {
    pub application: Option<Application>,
    pub resources: Vec<ResourceSnapshot>,
    pub routes: Vec<RouteSnapshot>,
    pub middlewares: Vec<HandlerSnapshot>,
}

impl ModelSnapshot {
    pub fn from_registry(registry: &Registry) -> Self {
        ModelSnapshot {
            application: registry.application().cloned(),
            resources: registry
                .resources()
                .iter()
                .map(|r| ResourceSnapshot {
                    name: r.name().to_string(),
                    kind: r.kind(),
                    config: r.config_json(),
                })
                .collect(),
            routes: registry.routes().iter().map(RouteSnapshot::from).collect(),
            middlewares: registry.middlewares().iter().map(HandlerSnapshot::from).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Routes marked public, in declaration order.
    pub fn public_routes(&self) -> impl Iterator<Item = &RouteSnapshot> {
        self.routes.iter().filter(|r| r.public)
    }
}

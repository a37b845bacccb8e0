//! Declaration façade: the application constructor and the route/auth/middleware decorations.
//!
//! Each decoration returns the handler it was given so calls can be layered. Route and auth
//! decorations on one handler converge to a single route record whichever runs first: both
//! write the handler's pending metadata in the registry, then reconcile it into the route list.

use crate::config::{validate_app, AppConfig};
use crate::error::DeclareResult;
use crate::handler::Handler;
use crate::registry::{Registry, RouteAttrs};
use crate::route::{AuthSpec, Route, RouteSpec};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub name: String,
    pub stage: String,
    pub region: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub config: Map<String, Value>,
}

impl Application {
    /// Validate and register. Unset stage/region come from the registry settings.
    pub fn declare(registry: &mut Registry, config: AppConfig) -> DeclareResult<Application> {
        validate_app(&config)?;
        let settings = registry.settings();
        let app = Application {
            name: config.name,
            stage: config.stage.unwrap_or_else(|| settings.default_stage.clone()),
            region: config.region.unwrap_or_else(|| settings.default_region.clone()),
            config: config.config,
        };
        registry.set_application(app.clone())?;
        tracing::debug!(app = %app.name, stage = %app.stage, region = %app.region, "application declared");
        Ok(app)
    }
}

/// Declare `handler` as a route. A second declaration on the same handler updates it in place.
pub fn route(registry: &mut Registry, handler: Handler, spec: RouteSpec) -> Handler {
    registry.pending_mut(handler.id()).route = Some(RouteAttrs {
        path: spec.path().to_string(),
        methods: spec.resolved_methods(),
        public: spec.is_public(),
    });
    reconcile(registry, &handler);
    handler
}

/// Attach authorization to `handler`'s route, now or once the route is declared.
pub fn auth(registry: &mut Registry, handler: Handler, spec: AuthSpec) -> Handler {
    registry.pending_mut(handler.id()).auth = Some(spec.into_descriptor());
    reconcile(registry, &handler);
    handler
}

pub fn middleware(registry: &mut Registry, handler: Handler) -> Handler {
    tracing::debug!(handler = %handler.name(), "middleware declared");
    registry.append_middleware(handler.clone());
    handler
}

fn reconcile(registry: &mut Registry, handler: &Handler) {
    let Some(meta) = registry.pending(handler.id()).cloned() else {
        return;
    };
    // an existing record may come from `route` or from `Registry::append_route`
    if let Some(existing) = registry.find_route_by_handler_mut(handler.id()) {
        if let Some(attrs) = meta.route {
            existing.path = attrs.path;
            existing.methods = attrs.methods;
            existing.public = attrs.public;
        }
        if meta.auth.is_some() {
            existing.auth = meta.auth;
        }
        tracing::debug!(handler = %handler.name(), path = %existing.path, "route updated");
        return;
    }
    // auth without a route yet stays pending
    let Some(attrs) = meta.route else {
        return;
    };
    tracing::debug!(handler = %handler.name(), path = %attrs.path, "route declared");
    registry.append_route(Route {
        path: attrs.path,
        methods: attrs.methods,
        public: attrs.public,
        handler: handler.id(),
        handler_name: handler.name().to_string(),
        auth: meta.auth,
    });
}

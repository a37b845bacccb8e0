//! The aggregation store. Owns every declaration record; façade functions only write through it.

use crate::app::{self, Application};
use crate::config::Settings;
use crate::error::{DeclareError, DeclareResult};
use crate::handler::{Handler, HandlerId};
use crate::model::ModelSnapshot;
use crate::resources::Resource;
use crate::route::{AuthDescriptor, AuthSpec, Route, RouteSpec};
use crate::state::SharedRegistry;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Route attributes as last declared for a handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RouteAttrs {
    pub path: String,
    pub methods: Vec<String>,
    pub public: bool,
}

/// Per-handler metadata kept across decorations so route/auth order does not matter.
#[derive(Clone, Debug, Default)]
pub(crate) struct PendingMetadata {
    pub route: Option<RouteAttrs>,
    pub auth: Option<AuthDescriptor>,
}

#[derive(Debug, Default)]
pub struct Registry {
    settings: Settings,
    app: Option<Application>,
    resources: Vec<Resource>,
    resource_index: HashMap<String, usize>,
    routes: Vec<Route>,
    middlewares: Vec<Handler>,
    pending: HashMap<HandlerId, PendingMetadata>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Registry {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Wrap in the single lock that guards all mutations when shared across threads.
    pub fn into_shared(self) -> SharedRegistry {
        Arc::new(RwLock::new(self))
    }

    /// Replace the application. In strict mode a second application is rejected.
    pub fn set_application(&mut self, app: Application) -> DeclareResult<()> {
        if let Some(current) = &self.app {
            if self.settings.strict {
                return Err(DeclareError::collision("application", current.name.clone()));
            }
            tracing::debug!(previous = %current.name, next = %app.name, "application replaced");
        }
        self.app = Some(app);
        Ok(())
    }

    /// Insert or overwrite by name. An overwrite keeps the original position.
    pub fn put_resource(&mut self, resource: Resource) -> DeclareResult<()> {
        let name = resource.name().to_string();
        match self.resource_index.get(&name) {
            Some(&idx) => {
                if self.settings.strict {
                    return Err(DeclareError::collision("resource", name));
                }
                tracing::debug!(resource = %name, kind = %resource.kind(), "resource overwritten");
                self.resources[idx] = resource;
            }
            None => {
                tracing::debug!(resource = %name, kind = %resource.kind(), "resource declared");
                self.resource_index.insert(name, self.resources.len());
                self.resources.push(resource);
            }
        }
        Ok(())
    }

    pub fn append_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Lookup by handler identity only, never by path or name.
    pub fn find_route_by_handler(&self, id: HandlerId) -> Option<&Route> {
        self.routes.iter().find(|r| r.handler == id)
    }

    pub fn find_route_by_handler_mut(&mut self, id: HandlerId) -> Option<&mut Route> {
        self.routes.iter_mut().find(|r| r.handler == id)
    }

    /// Appends unconditionally; the same handler twice yields two entries.
    pub fn append_middleware(&mut self, handler: Handler) {
        self.middlewares.push(handler);
    }

    /// Drop every declaration. Settings are kept.
    pub fn reset(&mut self) {
        self.app = None;
        self.resources.clear();
        self.resource_index.clear();
        self.routes.clear();
        self.middlewares.clear();
        self.pending.clear();
    }

    pub fn route(&mut self, handler: Handler, spec: RouteSpec) -> Handler {
        app::route(self, handler, spec)
    }

    pub fn auth(&mut self, handler: Handler, spec: AuthSpec) -> Handler {
        app::auth(self, handler, spec)
    }

    pub fn middleware(&mut self, handler: Handler) -> Handler {
        app::middleware(self, handler)
    }

    pub fn application(&self) -> Option<&Application> {
        self.app.as_ref()
    }

    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resource_index.get(name).map(|&idx| &self.resources[idx])
    }

    /// Resources in first-declaration order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn middlewares(&self) -> &[Handler] {
        &self.middlewares
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot::from_registry(self)
    }

    pub(crate) fn pending(&self, id: HandlerId) -> Option<&PendingMetadata> {
        self.pending.get(&id)
    }

    pub(crate) fn pending_mut(&mut self, id: HandlerId) -> &mut PendingMetadata {
        self.pending.entry(id).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, TableConfig};
    use crate::resources::Table;
    use serde_json::json;

    fn handler(name: &str) -> Handler {
        Handler::new(name, |_| json!(null))
    }

    fn route_for(h: &Handler, path: &str) -> Route {
        Route {
            path: path.into(),
            methods: vec!["GET".into()],
            public: false,
            handler: h.id(),
            handler_name: h.name().into(),
            auth: None,
        }
    }

    #[test]
    fn second_application_replaces_first() {
        let mut registry = Registry::new();
        Application::declare(&mut registry, AppConfig::new("first")).unwrap();
        let second = Application::declare(&mut registry, AppConfig::new("second")).unwrap();
        assert_eq!(registry.application(), Some(&second));
    }

    #[test]
    fn strict_mode_rejects_second_application() {
        let mut registry = Registry::with_settings(Settings::default().strict(true));
        Application::declare(&mut registry, AppConfig::new("first")).unwrap();
        let err = Application::declare(&mut registry, AppConfig::new("second")).unwrap_err();
        assert!(matches!(err, DeclareError::Collision { kind: "application", .. }));
        assert_eq!(registry.application().map(|a| a.name.as_str()), Some("first"));
    }

    #[test]
    fn resource_name_reuse_overwrites_in_place() {
        let mut registry = Registry::new();
        Table::declare(&mut registry, TableConfig::new("a")).unwrap();
        Table::declare(&mut registry, TableConfig::new("b")).unwrap();
        let latest = Table::declare(&mut registry, TableConfig::new("a").partition_key("pk")).unwrap();

        let names: Vec<&str> = registry.resources().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        let stored = registry.resource("a").and_then(|r| r.as_table()).unwrap();
        assert!(stored.same_as(&latest));
        assert_eq!(stored.partition_key(), "pk");
    }

    #[test]
    fn strict_mode_rejects_resource_name_reuse() {
        let mut registry = Registry::with_settings(Settings::default().strict(true));
        let first = Table::declare(&mut registry, TableConfig::new("users")).unwrap();
        let err = Table::declare(&mut registry, TableConfig::new("users")).unwrap_err();
        assert!(matches!(err, DeclareError::Collision { kind: "resource", .. }));
        assert!(registry.resource("users").and_then(|r| r.as_table()).unwrap().same_as(&first));
    }

    #[test]
    fn routes_keep_declaration_order_and_lookup_by_identity() {
        let mut registry = Registry::new();
        let a = handler("same_name");
        let b = handler("same_name");
        registry.append_route(route_for(&a, "/same"));
        registry.append_route(route_for(&b, "/same"));

        assert_eq!(registry.routes().len(), 2);
        assert_eq!(registry.routes()[0].handler, a.id());
        assert_eq!(registry.find_route_by_handler(b.id()).map(|r| r.handler), Some(b.id()));
        assert!(registry.find_route_by_handler(handler("other").id()).is_none());
    }

    #[test]
    fn middleware_is_not_deduplicated() {
        let mut registry = Registry::new();
        let mw = handler("cors");
        registry.middleware(mw.clone());
        registry.middleware(mw.clone());
        assert_eq!(registry.middlewares(), &[mw.clone(), mw][..]);
    }

    #[test]
    fn reset_clears_everything_including_pending_auth() {
        let mut registry = Registry::with_settings(Settings::default().strict(true));
        Application::declare(&mut registry, AppConfig::new("api")).unwrap();
        Table::declare(&mut registry, TableConfig::new("users")).unwrap();
        let h = registry.auth(handler("h"), AuthSpec::new().cognito(true));
        registry.middleware(handler("mw"));

        registry.reset();
        assert!(registry.application().is_none());
        assert!(registry.resources().is_empty());
        assert!(registry.routes().is_empty());
        assert!(registry.middlewares().is_empty());
        assert!(registry.settings().strict);

        // auth stashed before the reset must not leak into the next session
        registry.route(h.clone(), RouteSpec::new("/after"));
        assert_eq!(registry.find_route_by_handler(h.id()).unwrap().auth, None);
        // names are free again
        assert!(Table::declare(&mut registry, TableConfig::new("users")).is_ok());
    }

    #[test]
    fn registries_are_independent() {
        let mut one = Registry::new();
        let two = Registry::new();
        Table::declare(&mut one, TableConfig::new("users")).unwrap();
        assert!(two.resource("users").is_none());
    }
}

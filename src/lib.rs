//! csc SDK: declare a backend service (routes, auth, tables, log streams, identity pools)
//! and aggregate every declaration into one queryable model.

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod registry;
pub mod resources;
pub mod route;
pub mod state;

pub use app::{auth, middleware, route, Application};
pub use config::{AppConfig, IdentityPoolConfig, LogStreamConfig, Settings, TableConfig};
pub use error::{DeclareError, DeclareResult};
pub use handler::{Handler, HandlerId};
pub use model::{HandlerSnapshot, ModelSnapshot, ResourceSnapshot, RouteSnapshot};
pub use registry::Registry;
pub use resources::{IdentityPool, Level, LogEntry, LogStream, Resource, ResourceKind, Table};
pub use route::{AuthDescriptor, AuthSpec, ResourceRef, Route, RouteSpec};
pub use state::SharedRegistry;

/// Authors know the identity pool by this name.
pub type Cognito = IdentityPool;

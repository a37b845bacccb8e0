//! Named callables with a stable identity. The identity, not the name or path, is the route merge key.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identity token assigned once per [`Handler::new`]; clones share it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerId(Uuid);

impl HandlerId {
    fn new() -> Self {
        HandlerId(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type HandlerFn = dyn Fn(Value) -> Value + Send + Sync;

/// A route handler or middleware. The core never calls it; `call` exists for local simulation.
#[derive(Clone)]
pub struct Handler {
    id: HandlerId,
    name: Arc<str>,
    func: Arc<HandlerFn>,
}

impl Handler {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        Handler {
            id: HandlerId::new(),
            name: Arc::from(name.into()),
            func: Arc::new(func),
        }
    }

    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, input: Value) -> Value {
        (self.func)(input)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Handler {}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clones_share_identity() {
        let h = Handler::new("get_data", |_| json!({ "data": "ok" }));
        let copy = h.clone();
        assert_eq!(h, copy);
        assert_eq!(h.id(), copy.id());
    }

    #[test]
    fn same_name_is_not_same_handler() {
        let a = Handler::new("handler", |v| v);
        let b = Handler::new("handler", |v| v);
        assert_ne!(a, b);
    }

    #[test]
    fn call_runs_the_wrapped_function() {
        let echo = Handler::new("echo", |v| json!({ "echo": v }));
        assert_eq!(echo.call(json!(1)), json!({ "echo": 1 }));
    }
}

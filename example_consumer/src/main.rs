//! Example consumer: a separate Rust project that declares a small service with csc-sdk
//! and prints the aggregated model as JSON.
//!
//! Run from repo root: `cargo run -p example-consumer`
//! Or from this directory: `cargo run`

use csc_sdk::{
    auth, middleware, route, AppConfig, Application, AuthSpec, Cognito, Handler, IdentityPoolConfig,
    LogStream, LogStreamConfig, Registry, RouteSpec, Settings, Table, TableConfig,
};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("csc_sdk=info")),
        )
        .init();

    let mut registry = Registry::with_settings(Settings::from_env());

    Application::declare(&mut registry, AppConfig::new("notes-api").option("memory", 256))?;
    let users = Cognito::declare(&mut registry, IdentityPoolConfig::new("users").mfa(true))?;
    let notes = Table::declare(&mut registry, TableConfig::new("notes").partition_key("note_id"))?;
    let audit_log = LogStream::declare(&mut registry, LogStreamConfig::new("audit").retention("30d"))?;

    middleware(&mut registry, Handler::new("request_id", |req| req));

    route(
        &mut registry,
        Handler::new("health", |_| json!({ "status": "ok" })),
        RouteSpec::new("/health").public(true),
    );

    let list_notes = {
        let notes = notes.clone();
        Handler::new("list_notes", move |_| json!(notes.scan()))
    };
    let list_notes = auth(&mut registry, list_notes, AuthSpec::new().resource(&users).scopes(["notes:read"]));
    route(&mut registry, list_notes.clone(), RouteSpec::new("/notes"));

    let get_note = route(
        &mut registry,
        Handler::new("get_note", |req| req),
        RouteSpec::new("/notes/{note_id}").methods(["GET", "HEAD"]),
    );
    auth(&mut registry, get_note, AuthSpec::new().cognito(true));

    // local simulation against the mock table
    notes.put(&json!({ "note_id": "n1", "title": "hello" }));
    audit_log.audit("seeded notes");
    let listed = list_notes.call(json!({}));
    tracing::info!(count = listed.as_array().map_or(0, |a| a.len()), "notes listed");

    println!("{}", registry.snapshot().to_json()?);
    Ok(())
}

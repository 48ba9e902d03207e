use crate::ipc::error::ok;
use crate::ipc::helpers::bad_params;
use crate::ipc::types::{AppState, Catalog, Request};
use serde::Deserialize;
use serde_json::json;

fn handle_catalog_load(state: &mut AppState, req: &Request) -> serde_json::Value {
    let catalog: Catalog = if req.params.is_null() {
        Catalog::default()
    } else {
        match Catalog::deserialize(&req.params) {
            Ok(c) => c,
            Err(e) => return bad_params(req, e.to_string()),
        }
    };
    let counts = json!({
        "subjects": catalog.subjects.len(),
        "grades": catalog.grades.len(),
        "teachers": catalog.teachers.len(),
        "norms": catalog.norms.len(),
        "availability": catalog.availability.len(),
    });
    tracing::info!(%counts, "catalog loaded");
    state.catalog = Some(catalog);
    ok(&req.id, counts)
}

fn handle_catalog_clear(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.catalog = None;
    ok(&req.id, json!({ "cleared": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "catalog.load" => Some(handle_catalog_load(state, req)),
        "catalog.clear" => Some(handle_catalog_clear(state, req)),
        _ => None,
    }
}

use crate::enrich::norm_summary;
use crate::ipc::helpers::{list_or_cached, required, respond, to_json};
use crate::ipc::types::{AppState, Request};
use crate::model::Lesson;
use serde_json::{json, Value as JsonValue};

fn norms_summary(state: &AppState, req: &Request) -> Result<JsonValue, JsonValue> {
    let lessons: Vec<Lesson> = required(req, "lessons")?;
    let norms = list_or_cached(state, req, "norms", |c| &c.norms)?;
    let subjects = list_or_cached(state, req, "subjects", |c| &c.subjects)?;
    let grades = list_or_cached(state, req, "grades", |c| &c.grades)?;

    let summary = norm_summary(&lessons, &norms, &subjects, &grades);
    Ok(json!({ "grades": to_json(req, &summary)? }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<JsonValue> {
    match req.method.as_str() {
        "norms.summary" => Some(respond(req, norms_summary(state, req))),
        _ => None,
    }
}

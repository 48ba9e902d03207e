use crate::enrich::enrich;
use crate::ipc::helpers::{bad_params, list_or_cached, optional, required, respond, to_json};
use crate::ipc::types::{AppState, Request};
use crate::model::{Lesson, TeacherSlot};
use crate::reschedule::{parse_datetime, reschedule};
use crate::validate::{check_week, validate};
use chrono::Duration as ChronoDuration;
use serde_json::{json, Value as JsonValue};

fn lessons_enrich(state: &AppState, req: &Request) -> Result<JsonValue, JsonValue> {
    let lessons: Vec<Lesson> = required(req, "lessons")?;
    let subjects = list_or_cached(state, req, "subjects", |c| &c.subjects)?;
    let grades = list_or_cached(state, req, "grades", |c| &c.grades)?;
    let teachers = list_or_cached(state, req, "teachers", |c| &c.teachers)?;
    let norms = list_or_cached(state, req, "norms", |c| &c.norms)?;

    let enriched = enrich(&lessons, &subjects, &grades, &teachers, &norms);
    Ok(json!({ "lessons": to_json(req, &enriched)? }))
}

fn lessons_validate(state: &AppState, req: &Request) -> Result<JsonValue, JsonValue> {
    let candidate: Lesson = required(req, "lesson")?;
    let others: Vec<Lesson> = optional(req, "lessons")?.unwrap_or_default();
    let availability: Vec<TeacherSlot> =
        list_or_cached(state, req, "availability", |c| &c.availability)?;
    let exclude_self: bool =
        optional(req, "excludeSelf")?.unwrap_or(state.defaults.exclude_self);

    let exclude = if exclude_self { candidate.id() } else { None };
    let outcome = validate(&candidate, &others, &availability, exclude);
    if outcome.is_blocked() {
        tracing::info!(lesson = ?candidate.id(), findings = outcome.findings.len(), "placement blocked");
    }
    Ok(json!({
        "errors": outcome.errors(),
        "warnings": outcome.warnings(),
        "findings": to_json(req, &outcome.findings)?,
    }))
}

fn lessons_check_week(req: &Request) -> Result<JsonValue, JsonValue> {
    let lessons: Vec<Lesson> = required(req, "lessons")?;
    let problems = check_week(&lessons);
    Ok(json!({ "problems": to_json(req, &problems)? }))
}

fn lessons_reschedule(state: &AppState, req: &Request) -> Result<JsonValue, JsonValue> {
    let lesson: Lesson = required(req, "lesson")?;
    let start_raw: String = required(req, "start")?;
    let start = parse_datetime(&start_raw)
        .map_err(|e| bad_params(req, format!("start: {}", e)))?;
    let end = match optional::<String>(req, "end")? {
        Some(raw) => parse_datetime(&raw).map_err(|e| bad_params(req, format!("end: {}", e)))?,
        None => start + ChronoDuration::minutes(state.defaults.default_duration_minutes as i64),
    };
    let moved = reschedule(&lesson, start, end).map_err(|e| bad_params(req, e.to_string()))?;
    Ok(json!({ "lesson": to_json(req, &moved)? }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<JsonValue> {
    match req.method.as_str() {
        "lessons.enrich" => Some(respond(req, lessons_enrich(state, req))),
        "lessons.validate" => Some(respond(req, lessons_validate(state, req))),
        "lessons.checkWeek" => Some(respond(req, lessons_check_week(req))),
        "lessons.reschedule" => Some(respond(req, lessons_reschedule(state, req))),
        _ => None,
    }
}

use crate::config::ScheduleDefaults;
use crate::ipc::error::ok;
use crate::ipc::helpers::bad_params;
use crate::ipc::types::{AppState, Request};
use crate::model::MAX_DURATION_MINUTES;
use serde_json::{json, Map, Value};

fn parse_bool(v: &Value, key: &str) -> Result<bool, String> {
    v.as_bool().ok_or_else(|| format!("{} must be boolean", key))
}

fn parse_u32_range(v: &Value, key: &str, min: u32, max: u32) -> Result<u32, String> {
    let n = v
        .as_u64()
        .ok_or_else(|| format!("{} must be a non-negative integer", key))?;
    if !(min as u64..=max as u64).contains(&n) {
        return Err(format!("{} must be in {}..={}", key, min, max));
    }
    Ok(n as u32)
}

/// Apply every key of `patch` to a copy of `current`; nothing changes unless
/// the whole patch is valid.
fn merge_patch(
    current: &ScheduleDefaults,
    patch: &Map<String, Value>,
) -> Result<ScheduleDefaults, String> {
    let mut next = current.clone();
    for (k, v) in patch {
        match k.as_str() {
            "defaultDurationMinutes" => {
                next.default_duration_minutes = parse_u32_range(v, k, 1, MAX_DURATION_MINUTES)?;
            }
            "excludeSelf" => {
                next.exclude_self = parse_bool(v, k)?;
            }
            _ => return Err(format!("unknown setup field: {}", k)),
        }
    }
    Ok(next)
}

fn defaults_json(defaults: &ScheduleDefaults) -> Value {
    json!({
        "defaultDurationMinutes": defaults.default_duration_minutes,
        "excludeSelf": defaults.exclude_self,
    })
}

fn handle_setup_get(state: &mut AppState, req: &Request) -> Value {
    ok(&req.id, defaults_json(&state.defaults))
}

fn handle_setup_update(state: &mut AppState, req: &Request) -> Value {
    let Some(patch_obj) = req.params.get("patch").and_then(|v| v.as_object()) else {
        return bad_params(req, "patch must be an object");
    };
    match merge_patch(&state.defaults, patch_obj) {
        Ok(next) => {
            tracing::info!(?next, "setup defaults updated");
            state.defaults = next;
            ok(&req.id, defaults_json(&state.defaults))
        }
        Err(msg) => bad_params(req, msg),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<Value> {
    match req.method.as_str() {
        "setup.get" => Some(handle_setup_get(state, req)),
        "setup.update" => Some(handle_setup_update(state, req)),
        _ => None,
    }
}

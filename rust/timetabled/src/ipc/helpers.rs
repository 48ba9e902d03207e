use crate::ipc::error::err;
use crate::ipc::types::{AppState, Catalog, Request};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

pub fn bad_params(req: &Request, message: impl Into<String>) -> JsonValue {
    let message = message.into();
    tracing::warn!(id = %req.id, method = %req.method, %message, "bad params");
    err(&req.id, "bad_params", message, None)
}

pub fn required<T: DeserializeOwned>(req: &Request, key: &str) -> Result<T, JsonValue> {
    match req.params.get(key) {
        None | Some(JsonValue::Null) => Err(bad_params(req, format!("missing {}", key))),
        Some(v) => T::deserialize(v).map_err(|e| bad_params(req, format!("{}: {}", key, e))),
    }
}

pub fn optional<T: DeserializeOwned>(req: &Request, key: &str) -> Result<Option<T>, JsonValue> {
    match req.params.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(v) => T::deserialize(v)
            .map(Some)
            .map_err(|e| bad_params(req, format!("{}: {}", key, e))),
    }
}

pub fn to_json<T: serde::Serialize>(req: &Request, value: &T) -> Result<JsonValue, JsonValue> {
    serde_json::to_value(value).map_err(|e| err(&req.id, "internal", e.to_string(), None))
}

pub fn respond(req: &Request, result: Result<JsonValue, JsonValue>) -> JsonValue {
    match result {
        Ok(v) => crate::ipc::error::ok(&req.id, v),
        Err(resp) => resp,
    }
}

/// Explicit list from the request, else the cached catalog's copy, else empty.
pub fn list_or_cached<T: DeserializeOwned + Clone>(
    state: &AppState,
    req: &Request,
    key: &str,
    cached: impl Fn(&Catalog) -> &Vec<T>,
) -> Result<Vec<T>, JsonValue> {
    match optional::<Vec<T>>(req, key)? {
        Some(v) => Ok(v),
        None => Ok(state.catalog.as_ref().map(|c| cached(c).clone()).unwrap_or_default()),
    }
}

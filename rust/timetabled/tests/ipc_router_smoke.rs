mod test_support;

use serde_json::json;
use std::io::{BufRead, Write};
use test_support::{error_code, lesson, request, request_ok, spawn_sidecar};

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let health = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(
        health.get("version").and_then(|v| v.as_str()),
        Some(env!("CARGO_PKG_VERSION"))
    );
    assert_eq!(health.get("catalogLoaded").and_then(|v| v.as_bool()), Some(false));

    let lessons = json!([lesson(1, 5, 1, 0, "09:00", 45)]);
    for (id, method, params) in [
        ("2", "catalog.load", json!({})),
        ("3", "lessons.enrich", json!({ "lessons": lessons })),
        (
            "4",
            "lessons.validate",
            json!({ "lesson": lesson(2, 5, 1, 0, "10:00", 45), "lessons": lessons }),
        ),
        ("5", "lessons.checkWeek", json!({ "lessons": lessons })),
        (
            "6",
            "lessons.reschedule",
            json!({ "lesson": lesson(1, 5, 1, 0, "09:00", 45), "start": "2025-07-08T09:00" }),
        ),
        ("7", "norms.summary", json!({ "lessons": lessons })),
        ("8", "setup.get", json!({})),
        ("9", "catalog.clear", json!({})),
    ] {
        let _ = request_ok(&mut stdin, &mut reader, id, method, params);
    }

    let unknown = request(&mut stdin, &mut reader, "10", "lessons.publish", json!({}));
    assert_eq!(error_code(&unknown), Some("not_implemented"));
}

#[test]
fn malformed_line_gets_bad_json_and_loop_continues() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    writeln!(stdin, "{{not json").expect("write garbage");
    stdin.flush().expect("flush");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(error_code(&value), Some("bad_json"));

    let _ = request_ok(&mut stdin, &mut reader, "1", "health", json!({}));
}

#[test]
fn malformed_params_are_bad_params() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let missing = request(&mut stdin, &mut reader, "1", "lessons.enrich", json!({}));
    assert_eq!(error_code(&missing), Some("bad_params"));

    let bad_time = request(
        &mut stdin,
        &mut reader,
        "2",
        "lessons.validate",
        json!({ "lesson": lesson(1, 5, 1, 0, "9 o'clock", 45), "lessons": [] }),
    );
    assert_eq!(error_code(&bad_time), Some("bad_params"));

    let weekend = request(
        &mut stdin,
        &mut reader,
        "3",
        "lessons.checkWeek",
        json!({ "lessons": [lesson(1, 5, 1, 6, "09:00", 45)] }),
    );
    assert_eq!(error_code(&weekend), Some("bad_params"));
}

mod test_support;

use serde_json::json;
use test_support::{lesson, request_ok, spawn_sidecar};

fn statuses(result: &serde_json::Value) -> Vec<Option<String>> {
    result
        .get("lessons")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default()
        .iter()
        .map(|l| l.get("status").and_then(|v| v.as_str()).map(str::to_string))
        .collect()
}

#[test]
fn enrich_marks_quota_status_per_group() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let norms = json!([{ "subject": 10, "grade": 1, "lessons_per_week": 2, "courses_per_week": 0 }]);

    let three = json!([
        lesson(1, 5, 1, 0, "09:00", 45),
        lesson(2, 5, 1, 1, "09:00", 45),
        lesson(3, 5, 1, 2, "09:00", 45),
    ]);
    let over = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "lessons.enrich",
        json!({ "lessons": three, "norms": norms }),
    );
    assert_eq!(statuses(&over), vec![Some("over".to_string()); 3]);

    let two = json!([lesson(1, 5, 1, 0, "09:00", 45), lesson(2, 5, 1, 1, "09:00", 45)]);
    let ok = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "lessons.enrich",
        json!({ "lessons": two, "norms": norms }),
    );
    assert_eq!(statuses(&ok), vec![Some("ok".to_string()); 2]);

    let one = json!([lesson(1, 5, 1, 0, "09:00", 45)]);
    let under = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "lessons.enrich",
        json!({ "lessons": one, "norms": norms }),
    );
    assert_eq!(statuses(&under), vec![Some("under".to_string())]);

    let none = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "lessons.enrich",
        json!({ "lessons": one, "norms": [] }),
    );
    assert_eq!(statuses(&none), vec![None]);
}

#[test]
fn enrich_uses_cached_catalog_and_formats_fields() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "catalog.load",
        json!({
            "subjects": [{ "id": 10, "name": "Maths" }],
            "grades": [{ "id": 1, "name": "5A" }],
            "teachers": [{ "id": 5, "last_name": "Petrova", "first_name": "Olga", "middle_name": "Ivanovna" }],
            "norms": [{ "subject": { "id": 10, "name": "Maths" }, "grade": { "id": 1 }, "lessons_per_week": 1, "courses_per_week": 0 }]
        }),
    );

    let mut raw = lesson(7, 5, 1, 3, "08:30:00", 45);
    raw["template_week"] = json!(4);
    let mut unknown_subject = lesson(8, 9, 2, 3, "10:00", 45);
    unknown_subject["subject"] = json!(99);

    let result = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "lessons.enrich",
        json!({ "lessons": [raw, unknown_subject] }),
    );
    let lessons = result
        .get("lessons")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();
    assert_eq!(lessons.len(), 2);

    let first = &lessons[0];
    assert_eq!(first.get("id").and_then(|v| v.as_i64()), Some(7));
    assert_eq!(first.get("start_time").and_then(|v| v.as_str()), Some("08:30"));
    assert_eq!(first.get("subject_name").and_then(|v| v.as_str()), Some("Maths"));
    assert_eq!(first.get("grade_name").and_then(|v| v.as_str()), Some("5A"));
    assert_eq!(first.get("teacher_name").and_then(|v| v.as_str()), Some("Petrova O.I."));
    assert_eq!(first.get("status").and_then(|v| v.as_str()), Some("ok"));
    assert_eq!(first.get("template_week").and_then(|v| v.as_i64()), Some(4));

    let second = &lessons[1];
    assert!(second
        .get("subject_name")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .contains("99"));
    assert_eq!(second.get("teacher_name").and_then(|v| v.as_str()), Some("ID 9"));
    assert!(second.get("status").is_none());
}

#[test]
fn enrich_passes_raw_type_and_id_through() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let norms = json!([{ "subject": 10, "grade": 1, "lessons_per_week": 1, "courses_per_week": 1 }]);

    let mut elective = lesson(1, 5, 1, 0, "09:00", 45);
    elective["type"] = json!("elective");
    let untyped = lesson(2, 5, 1, 1, "09:00", 45);
    let mut course = lesson(3, 5, 1, 2, "09:00", 45);
    course["type"] = json!("course");
    let mut unsaved = lesson(0, 5, 1, 3, "09:00", 45);
    unsaved["id"] = serde_json::Value::Null;
    unsaved["type"] = serde_json::Value::Null;

    let result = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "lessons.enrich",
        json!({ "lessons": [elective, untyped, course, unsaved], "norms": norms }),
    );
    let lessons = result
        .get("lessons")
        .and_then(|v| v.as_array())
        .cloned()
        .unwrap_or_default();
    assert_eq!(lessons.len(), 4);

    assert_eq!(lessons[0].get("type"), Some(&json!("elective")));
    assert!(lessons[1].get("type").is_none());
    assert_eq!(lessons[2].get("type"), Some(&json!("course")));
    assert_eq!(lessons[3].get("id"), Some(&serde_json::Value::Null));
    assert_eq!(lessons[3].get("type"), Some(&serde_json::Value::Null));

    // Unknown, missing and null tags all count as regular lessons.
    assert_eq!(statuses(&result), vec![
        Some("over".to_string()),
        Some("over".to_string()),
        Some("ok".to_string()),
        Some("over".to_string()),
    ]);
}

use crate::config::ScheduleDefaults;
use crate::model::{RefItem, TeacherRef, TeacherSlot, WeeklyNorm};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Reference data the UI may push once instead of repeating on every call.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct Catalog {
    #[serde(default)]
    pub subjects: Vec<RefItem>,
    #[serde(default)]
    pub grades: Vec<RefItem>,
    #[serde(default)]
    pub teachers: Vec<TeacherRef>,
    #[serde(default)]
    pub norms: Vec<WeeklyNorm>,
    #[serde(default)]
    pub availability: Vec<TeacherSlot>,
}

pub struct AppState {
    pub catalog: Option<Catalog>,
    pub defaults: ScheduleDefaults,
}

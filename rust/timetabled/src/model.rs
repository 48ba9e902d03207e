use crate::time::{Span, WallTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;

pub type LessonId = i64;
pub type RefId = i64;

/// Day of the template week, Monday=0 through Friday=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Weekday(u8);

impl Weekday {
    pub const DAYS: u8 = 5;
}

impl TryFrom<i64> for Weekday {
    type Error = String;

    fn try_from(v: i64) -> Result<Self, Self::Error> {
        if (0..Self::DAYS as i64).contains(&v) {
            Ok(Self(v as u8))
        } else {
            Err(format!(
                "day_of_week must be 0..={} (Monday..Friday), got {}",
                Self::DAYS - 1,
                v
            ))
        }
    }
}

impl From<Weekday> for u8 {
    fn from(d: Weekday) -> u8 {
        d.0
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which weekly quota a lesson counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LessonKind {
    #[default]
    Lesson,
    Course,
}

impl LessonKind {
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("course") => Self::Course,
            // Missing and unrecognised tags count as regular lessons.
            _ => Self::Lesson,
        }
    }

    pub fn target(self, norm: &Norm) -> u32 {
        match self {
            Self::Lesson => norm.lessons_per_week,
            Self::Course => norm.courses_per_week,
        }
    }
}

/// Longest lesson accepted anywhere: one full day.
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

fn bounded_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let v = u32::deserialize(deserializer)?;
    if !(1..=MAX_DURATION_MINUTES).contains(&v) {
        return Err(serde::de::Error::custom(format!(
            "duration_minutes must be 1..={}, got {}",
            MAX_DURATION_MINUTES, v
        )));
    }
    Ok(v)
}

/// Keeps an explicit `"id": null` apart from a missing id.
fn present_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Option<LessonId>>, D::Error> {
    Option::<LessonId>::deserialize(deserializer).map(Some)
}

/// One weekly-recurring class meeting in a template week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// `None` when the payload had no id, `Some(None)` for `"id": null`.
    #[serde(
        rename = "id",
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_id: Option<Option<LessonId>>,
    pub subject: RefId,
    pub grade: RefId,
    pub teacher: RefId,
    pub day_of_week: Weekday,
    pub start_time: WallTime,
    #[serde(deserialize_with = "bounded_minutes")]
    pub duration_minutes: u32,
    /// Fields the core does not interpret, `type` included; carried through
    /// untouched.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Lesson {
    pub fn id(&self) -> Option<LessonId> {
        self.raw_id.flatten()
    }

    pub fn kind(&self) -> LessonKind {
        LessonKind::from_tag(self.extra.get("type").and_then(JsonValue::as_str))
    }

    pub fn span(&self) -> Span {
        Span::starting_at(self.start_time, self.duration_minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefItem {
    pub id: RefId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherRef {
    pub id: RefId,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub middle_name: Option<String>,
}

/// A recurring weekly window in which a teacher declared availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherSlot {
    pub teacher: RefId,
    pub day_of_week: Weekday,
    pub start_time: WallTime,
    pub end_time: WallTime,
}

impl TeacherSlot {
    pub fn span(&self) -> Span {
        Span::new(self.start_time, self.end_time)
    }
}

/// Norm subject/grade as sent by either backend serializer: a bare id or an
/// embedded object carrying one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NormRef {
    Id(RefId),
    Embedded { id: RefId },
}

impl NormRef {
    pub fn id(&self) -> RefId {
        match self {
            Self::Id(id) | Self::Embedded { id } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyNorm {
    pub subject: NormRef,
    pub grade: NormRef,
    #[serde(default)]
    pub lessons_per_week: u32,
    #[serde(default)]
    pub courses_per_week: u32,
}

/// A weekly norm with references flattened to ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Norm {
    pub subject: RefId,
    pub grade: RefId,
    pub lessons_per_week: u32,
    pub courses_per_week: u32,
}

impl From<&WeeklyNorm> for Norm {
    fn from(n: &WeeklyNorm) -> Self {
        Self {
            subject: n.subject.id(),
            grade: n.grade.id(),
            lessons_per_week: n.lessons_per_week,
            courses_per_week: n.courses_per_week,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotaStatus {
    Ok,
    Under,
    Over,
}

impl QuotaStatus {
    pub fn compare(actual: u32, target: u32) -> Self {
        match actual.cmp(&target) {
            std::cmp::Ordering::Greater => Self::Over,
            std::cmp::Ordering::Less => Self::Under,
            std::cmp::Ordering::Equal => Self::Ok,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedLesson {
    #[serde(flatten)]
    pub lesson: Lesson,
    pub subject_name: String,
    pub grade_name: String,
    pub teacher_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QuotaStatus>,
}

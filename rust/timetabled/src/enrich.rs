use crate::model::*;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

fn fallback_label(id: RefId) -> String {
    format!("ID {}", id)
}

fn first_initial(part: Option<&str>) -> String {
    part.map(str::trim)
        .and_then(|s| s.chars().next())
        .map(|c| format!("{}.", c))
        .unwrap_or_default()
}

/// `Ivanov Ivan Petrovich` -> `Ivanov I.P.`
pub fn format_teacher(t: &TeacherRef) -> String {
    format!(
        "{} {}{}",
        t.last_name.trim(),
        first_initial(t.first_name.as_deref()),
        first_initial(t.middle_name.as_deref())
    )
    .trim()
    .to_string()
}

fn ref_name(items: &[RefItem], id: RefId) -> String {
    items
        .iter()
        .find(|i| i.id == id)
        .map(|i| i.name.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| fallback_label(id))
}

fn teacher_name(teachers: &[TeacherRef], id: RefId) -> String {
    teachers
        .iter()
        .find(|t| t.id == id)
        .map(format_teacher)
        .unwrap_or_else(|| fallback_label(id))
}

pub fn normalize_norms(norms: &[WeeklyNorm]) -> Vec<Norm> {
    norms.iter().map(Norm::from).collect()
}

/// First norm row for the pair wins; duplicates are not aggregated.
fn find_norm(norms: &[Norm], grade: RefId, subject: RefId) -> Option<&Norm> {
    norms.iter().find(|n| n.grade == grade && n.subject == subject)
}

type GroupKey = (RefId, RefId, LessonKind);

fn group_counts(lessons: &[Lesson]) -> HashMap<GroupKey, u32> {
    let mut counts: HashMap<GroupKey, u32> = HashMap::new();
    for l in lessons {
        *counts.entry((l.grade, l.subject, l.kind())).or_insert(0) += 1;
    }
    counts
}

pub fn enrich(
    lessons: &[Lesson],
    subjects: &[RefItem],
    grades: &[RefItem],
    teachers: &[TeacherRef],
    norms: &[WeeklyNorm],
) -> Vec<EnrichedLesson> {
    let norms = normalize_norms(norms);
    let counts = group_counts(lessons);

    lessons
        .iter()
        .map(|l| {
            let status = find_norm(&norms, l.grade, l.subject).map(|norm| {
                let actual = counts
                    .get(&(l.grade, l.subject, l.kind()))
                    .copied()
                    .unwrap_or(0);
                QuotaStatus::compare(actual, l.kind().target(norm))
            });
            EnrichedLesson {
                lesson: l.clone(),
                subject_name: ref_name(subjects, l.subject),
                grade_name: ref_name(grades, l.grade),
                teacher_name: teacher_name(teachers, l.teacher),
                status,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaLine {
    pub target: u32,
    pub actual: u32,
    pub status: QuotaStatus,
}

impl QuotaLine {
    fn new(target: u32, actual: u32) -> Self {
        Self {
            target,
            actual,
            status: QuotaStatus::compare(actual, target),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectQuota {
    pub subject: RefId,
    pub subject_name: String,
    pub lessons: QuotaLine,
    pub courses: QuotaLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeQuota {
    pub grade: RefId,
    pub grade_name: String,
    pub subjects: Vec<SubjectQuota>,
}

/// Target vs factual weekly counts for every norm row of every grade that has
/// at least one lesson in the set.
pub fn norm_summary(
    lessons: &[Lesson],
    norms: &[WeeklyNorm],
    subjects: &[RefItem],
    grades: &[RefItem],
) -> Vec<GradeQuota> {
    let norms = normalize_norms(norms);
    let counts = group_counts(lessons);
    let count = |grade: RefId, subject: RefId, kind: LessonKind| {
        counts.get(&(grade, subject, kind)).copied().unwrap_or(0)
    };

    let grade_ids: BTreeSet<RefId> = lessons.iter().map(|l| l.grade).collect();
    grade_ids
        .into_iter()
        .map(|grade| GradeQuota {
            grade,
            grade_name: ref_name(grades, grade),
            subjects: norms
                .iter()
                .filter(|n| n.grade == grade)
                .map(|n| SubjectQuota {
                    subject: n.subject,
                    subject_name: ref_name(subjects, n.subject),
                    lessons: QuotaLine::new(
                        LessonKind::Lesson.target(n),
                        count(grade, n.subject, LessonKind::Lesson),
                    ),
                    courses: QuotaLine::new(
                        LessonKind::Course.target(n),
                        count(grade, n.subject, LessonKind::Course),
                    ),
                })
                .collect(),
        })
        .collect()
}

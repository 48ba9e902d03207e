use crate::model::*;
use crate::time::Span;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// One classified observation about a proposed placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    TeacherBusy { lesson_id: Option<LessonId>, range: Span },
    GradeBusy { lesson_id: Option<LessonId>, range: Span },
    TeacherUnavailable,
}

impl Finding {
    pub fn code(&self) -> &'static str {
        match self {
            Self::TeacherBusy { .. } => "teacher_overlap",
            Self::GradeBusy { .. } => "grade_overlap",
            Self::TeacherUnavailable => "outside_availability",
        }
    }

    pub fn is_blocking(&self) -> bool {
        !matches!(self, Self::TeacherUnavailable)
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TeacherBusy { range, .. } => write!(f, "Teacher is already busy {}", range),
            Self::GradeBusy { range, .. } => write!(f, "Class already has a lesson {}", range),
            Self::TeacherUnavailable => write!(f, "Teacher is not available at this time"),
        }
    }
}

impl Serialize for Finding {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("code", self.code())?;
        map.serialize_entry("blocking", &self.is_blocking())?;
        map.serialize_entry("message", &self.to_string())?;
        if let Self::TeacherBusy { lesson_id, range } | Self::GradeBusy { lesson_id, range } = self {
            map.serialize_entry("lessonId", lesson_id)?;
            map.serialize_entry("range", &range.to_string())?;
        }
        map.end()
    }
}

/// Outcome of validating one placement. Blocking findings come first, in
/// `others` order (teacher pass, then grade pass), followed by the
/// availability warning if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    pub findings: Vec<Finding>,
}

impl Validation {
    pub fn errors(&self) -> Vec<String> {
        self.findings
            .iter()
            .filter(|f| f.is_blocking())
            .map(ToString::to_string)
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.findings
            .iter()
            .filter(|f| !f.is_blocking())
            .map(ToString::to_string)
            .collect()
    }

    pub fn is_blocked(&self) -> bool {
        self.findings.iter().any(Finding::is_blocking)
    }
}

/// Classify `candidate` against `others` and the teacher's declared slots.
///
/// Entries of `others` whose id equals `exclude` are skipped; with `None`
/// every entry is compared, including a stale copy of the candidate itself.
/// The candidate counts as available only when a single slot contains it.
pub fn validate(
    candidate: &Lesson,
    others: &[Lesson],
    availability: &[TeacherSlot],
    exclude: Option<LessonId>,
) -> Validation {
    let span = candidate.span();
    let same_day: Vec<&Lesson> = others
        .iter()
        .filter(|l| l.day_of_week == candidate.day_of_week)
        .filter(|l| exclude.is_none() || l.id() != exclude)
        .collect();

    let mut findings = Vec::new();

    for l in same_day.iter().filter(|l| l.teacher == candidate.teacher) {
        let other = l.span();
        if other.overlaps(&span) {
            findings.push(Finding::TeacherBusy {
                lesson_id: l.id(),
                range: other,
            });
        }
    }

    for l in same_day.iter().filter(|l| l.grade == candidate.grade) {
        let other = l.span();
        if other.overlaps(&span) {
            findings.push(Finding::GradeBusy {
                lesson_id: l.id(),
                range: other,
            });
        }
    }

    let mut slots = availability
        .iter()
        .filter(|a| a.teacher == candidate.teacher && a.day_of_week == candidate.day_of_week)
        .peekable();
    if slots.peek().is_some() && !slots.any(|a| a.span().contains(&span)) {
        findings.push(Finding::TeacherUnavailable);
    }

    Validation { findings }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemKind {
    Teacher,
    Grade,
}

/// A cluster of lessons sharing a teacher or a grade whose times chain into
/// overlaps on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    pub kind: ProblemKind,
    pub resource_id: RefId,
    pub day_of_week: Weekday,
    pub lesson_ids: Vec<LessonId>,
    pub message: String,
}

/// Sort by `(start, end)` and collect overlapping pairs, then merge pairs into
/// connected components.
fn overlap_clusters(mut items: Vec<(Span, LessonId)>) -> Vec<Vec<LessonId>> {
    items.sort_by_key(|(s, id)| (s.start, s.end, *id));

    let mut adjacency: HashMap<LessonId, Vec<LessonId>> = HashMap::new();
    for (i, (a, a_id)) in items.iter().enumerate() {
        for (b, b_id) in &items[i + 1..] {
            if b.start >= a.end {
                break;
            }
            adjacency.entry(*a_id).or_default().push(*b_id);
            adjacency.entry(*b_id).or_default().push(*a_id);
        }
    }

    let mut visited: HashSet<LessonId> = HashSet::new();
    let mut clusters = Vec::new();
    for (_, start) in &items {
        if visited.contains(start) || !adjacency.contains_key(start) {
            continue;
        }
        let mut stack = vec![*start];
        let mut component = Vec::new();
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            component.push(id);
            if let Some(next) = adjacency.get(&id) {
                stack.extend(next.iter().filter(|n| !visited.contains(*n)));
            }
        }
        component.sort_unstable();
        clusters.push(component);
    }
    clusters.sort();
    clusters
}

fn scan(
    lessons: &[Lesson],
    kind: ProblemKind,
    resource: impl Fn(&Lesson) -> RefId,
) -> Vec<Problem> {
    let mut groups: BTreeMap<(RefId, Weekday), Vec<(Span, LessonId)>> = BTreeMap::new();
    for l in lessons {
        let Some(id) = l.id() else {
            tracing::debug!(?kind, "skipping unsaved lesson in week check");
            continue;
        };
        groups
            .entry((resource(l), l.day_of_week))
            .or_default()
            .push((l.span(), id));
    }

    let label = match kind {
        ProblemKind::Teacher => "teacher",
        ProblemKind::Grade => "grade",
    };
    groups
        .into_iter()
        .flat_map(|((resource_id, day), items)| {
            overlap_clusters(items)
                .into_iter()
                .map(move |lesson_ids| Problem {
                    kind,
                    resource_id,
                    day_of_week: day,
                    message: format!(
                        "Overlapping lessons for {} {} on day {}",
                        label, resource_id, day
                    ),
                    lesson_ids,
                })
        })
        .collect()
}

/// Every overlap cluster in a saved lesson set: teacher problems first, then
/// grade problems, each ordered by resource, day and lesson ids.
pub fn check_week(lessons: &[Lesson]) -> Vec<Problem> {
    let mut problems = scan(lessons, ProblemKind::Teacher, |l| l.teacher);
    problems.extend(scan(lessons, ProblemKind::Grade, |l| l.grade));
    problems
}

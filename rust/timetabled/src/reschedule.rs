use crate::model::{Lesson, Weekday, MAX_DURATION_MINUTES};
use crate::time::WallTime;
use chrono::{Datelike, NaiveDateTime, Timelike};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RescheduleError {
    OutOfTemplateWeek(chrono::Weekday),
    NonPositiveDuration(i64),
    DurationTooLong(i64),
}

impl fmt::Display for RescheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfTemplateWeek(day) => {
                write!(f, "{} is outside the Monday..Friday template week", day)
            }
            Self::NonPositiveDuration(m) => {
                write!(f, "lesson must end after it starts (got {} minutes)", m)
            }
            Self::DurationTooLong(m) => write!(
                f,
                "lesson may last at most {} minutes (got {})",
                MAX_DURATION_MINUTES, m
            ),
        }
    }
}

impl std::error::Error for RescheduleError {}

pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
}

/// Map a calendar drop/resize back onto template-week fields.
pub fn reschedule(
    lesson: &Lesson,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Lesson, RescheduleError> {
    let weekday = start.weekday();
    let day_of_week = Weekday::try_from(weekday.num_days_from_monday() as i64)
        .map_err(|_| RescheduleError::OutOfTemplateWeek(weekday))?;

    let seconds = (end - start).num_seconds();
    let minutes = (seconds as f64 / 60.0).round() as i64;
    if minutes <= 0 {
        return Err(RescheduleError::NonPositiveDuration(minutes));
    }
    let duration_minutes = u32::try_from(minutes)
        .ok()
        .filter(|m| *m <= MAX_DURATION_MINUTES)
        .ok_or(RescheduleError::DurationTooLong(minutes))?;

    Ok(Lesson {
        day_of_week,
        start_time: WallTime::from_hm(start.hour(), start.minute()),
        duration_minutes,
        ..lesson.clone()
    })
}

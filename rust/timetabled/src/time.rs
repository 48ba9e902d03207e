use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Wall-clock time of day in whole minutes since midnight.
///
/// Parsed from `HH:mm` or `HH:mm:ss` (seconds are dropped) and always rendered
/// as `HH:mm`. A `WallTime` produced by adding a duration may run past
/// midnight; it renders modulo 24h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime(u32);

impl WallTime {
    pub fn from_hm(hour: u32, minute: u32) -> Self {
        Self(hour * 60 + minute)
    }

    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let s = s.trim();
        let t = NaiveTime::parse_from_str(s, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))?;
        Ok(Self(t.hour() * 60 + t.minute()))
    }

    pub fn plus_minutes(self, minutes: u32) -> Self {
        Self(self.0 + minutes)
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", (self.0 / 60) % 24, self.0 % 60)
    }
}

impl Serialize for WallTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WallTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        WallTime::parse(&raw)
            .map_err(|e| serde::de::Error::custom(format!("invalid time '{}': {}", raw, e)))
    }
}

/// Half-open interval `[start, end)` on the minute grid of one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: WallTime,
    pub end: WallTime,
}

impl Span {
    pub fn new(start: WallTime, end: WallTime) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: WallTime, duration_minutes: u32) -> Self {
        Self::new(start, start.plus_minutes(duration_minutes))
    }

    /// Touching boundaries do not overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, inner: &Span) -> bool {
        self.start <= inner.start && inner.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.start, self.end)
    }
}

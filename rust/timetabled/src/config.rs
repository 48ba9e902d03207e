use crate::model::MAX_DURATION_MINUTES;
use anyhow::{bail, Context};

pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_DURATION_MINUTES: u32 = 45;

/// Runtime defaults that `setup.update` may change while the sidecar runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleDefaults {
    pub default_duration_minutes: u32,
    pub exclude_self: bool,
}

impl Default for ScheduleDefaults {
    fn default() -> Self {
        Self {
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
            exclude_self: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub log_filter: String,
    pub defaults: ScheduleDefaults,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let log_filter = lookup("TIMETABLED_LOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        let mut defaults = ScheduleDefaults::default();
        if let Some(raw) = lookup("TIMETABLED_DEFAULT_DURATION") {
            let minutes: u32 = raw
                .trim()
                .parse()
                .with_context(|| format!("TIMETABLED_DEFAULT_DURATION={raw}"))?;
            if !(1..=MAX_DURATION_MINUTES).contains(&minutes) {
                bail!("TIMETABLED_DEFAULT_DURATION must be in 1..={MAX_DURATION_MINUTES}");
            }
            defaults.default_duration_minutes = minutes;
        }
        if let Some(raw) = lookup("TIMETABLED_EXCLUDE_SELF") {
            defaults.exclude_self = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => bail!("TIMETABLED_EXCLUDE_SELF: expected boolean, got {other:?}"),
            };
        }

        Ok(Self {
            log_filter,
            defaults,
        })
    }
}

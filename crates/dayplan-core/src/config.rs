use anyhow::Context;
use chrono::Weekday;
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::calendar::week_start_from_str;
use crate::geometry::{FIRST_HOUR, HOUR_HEIGHT, LAST_HOUR, TimelineLayout};

pub const DEFAULT_STORAGE_KEY: &str = "dayplan.tasks";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub timeline: TimelineLayout,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_key")]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_week_start")]
    pub week_start: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_week_start() -> String {
    "sunday".to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            storage: StorageConfig::default(),
            timeline: TimelineLayout::default(),
            calendar: CalendarConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            week_start: default_week_start(),
        }
    }
}

impl CalendarConfig {
    pub fn week_start(&self) -> Weekday {
        week_start_from_str(&self.week_start)
    }
}

impl PlannerConfig {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let mut config: PlannerConfig =
            toml::from_str(raw).context("failed parsing planner config")?;
        config.sanitize();
        Ok(config)
    }

    /// Parses `raw`, falling back to defaults (and logging) when it is invalid.
    pub fn load_or_default(raw: &str) -> Self {
        match Self::from_toml_str(raw) {
            Ok(config) => {
                info!(
                    version = config.version,
                    storage_key = %config.storage.key,
                    first_hour = config.timeline.first_hour,
                    last_hour = config.timeline.last_hour,
                    week_start = %config.calendar.week_start,
                    "loaded planner config"
                );
                config
            }
            Err(error) => {
                error!(error = %format!("{error:#}"), "failed parsing planner config; using defaults");
                Self::default()
            }
        }
    }

    pub fn sanitize(&mut self) {
        if self.storage.key.trim().is_empty() {
            warn!("empty storage key; using default");
            self.storage.key = default_storage_key();
        }

        let timeline = &mut self.timeline;
        timeline.first_hour = timeline.first_hour.clamp(0, 23);
        timeline.last_hour = timeline.last_hour.clamp(0, 23);
        if timeline.last_hour < timeline.first_hour {
            warn!(
                first_hour = timeline.first_hour,
                last_hour = timeline.last_hour,
                "timeline ends before it starts; using default window"
            );
            timeline.first_hour = FIRST_HOUR;
            timeline.last_hour = LAST_HOUR;
        }
        if !timeline.hour_height.is_finite() || timeline.hour_height <= 0.0 {
            timeline.hour_height = HOUR_HEIGHT;
        }

        if self.calendar.week_start.trim().is_empty() {
            self.calendar.week_start = default_week_start();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_match_constants() {
        let config = PlannerConfig::from_toml_str("version = 1").expect("parse");
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.timeline, TimelineLayout::default());
        assert_eq!(config.calendar.week_start(), Weekday::Sun);
    }

    #[test]
    fn partial_timeline_section_keeps_other_defaults() {
        let config = PlannerConfig::from_toml_str(
            r#"
            [timeline]
            first_hour = 8

            [calendar]
            week_start = "monday"
            "#,
        )
        .expect("parse");
        assert_eq!(config.timeline.first_hour, 8);
        assert_eq!(config.timeline.last_hour, LAST_HOUR);
        assert_eq!(config.timeline.hour_height, HOUR_HEIGHT);
        assert_eq!(config.calendar.week_start(), Weekday::Mon);
    }

    #[test]
    fn sanitize_repairs_inverted_window_and_bad_height() {
        let config = PlannerConfig::from_toml_str(
            r#"
            [storage]
            key = "  "

            [timeline]
            first_hour = 20
            last_hour = 40
            hour_height = -3.0
            "#,
        )
        .expect("parse");
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.timeline.first_hour, 20);
        assert_eq!(config.timeline.last_hour, 23);
        assert_eq!(config.timeline.hour_height, HOUR_HEIGHT);

        let inverted = PlannerConfig::from_toml_str("[timeline]\nfirst_hour = 18\nlast_hour = 9")
            .expect("parse");
        assert_eq!(inverted.timeline, TimelineLayout::default());
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        assert!(PlannerConfig::from_toml_str("[timeline\nfirst_hour = ").is_err());
        assert_eq!(PlannerConfig::load_or_default("not = [valid"), PlannerConfig::default());
    }
}

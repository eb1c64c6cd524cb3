//! Mapping between hour slots and timeline pixels.
//!
//! Everything here is total: out-of-range inputs saturate at the edges of the visible
//! hours window instead of wrapping or panicking.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const FIRST_HOUR: i32 = 6;
pub const LAST_HOUR: i32 = 23;
/// Pixels per one-hour slot.
pub const HOUR_HEIGHT: f64 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineLayout {
    pub first_hour: i32,
    pub last_hour: i32,
    pub hour_height: f64,
}

impl Default for TimelineLayout {
    fn default() -> Self {
        Self {
            first_hour: FIRST_HOUR,
            last_hour: LAST_HOUR,
            hour_height: HOUR_HEIGHT,
        }
    }
}

impl TimelineLayout {
    pub fn hours(&self) -> RangeInclusive<i32> {
        self.first_hour..=self.last_hour
    }

    /// Number of hour slots in the window.
    pub fn span(&self) -> i32 {
        self.last_hour
            .saturating_sub(self.first_hour)
            .saturating_add(1)
            .max(1)
    }

    pub fn clamp_duration(&self, duration: i32) -> i32 {
        duration.max(1).min(self.span())
    }

    /// Start hour such that `[hour, hour + duration)` stays inside the window.
    pub fn clamp_hour(&self, candidate: i32, duration: i32) -> i32 {
        let duration = self.clamp_duration(duration);
        let latest = self.last_hour.saturating_sub(duration).saturating_add(1);
        candidate.min(latest).max(self.first_hour)
    }

    /// Duration for a block anchored at `start_hour`; only the end moves.
    pub fn clamp_resize(&self, start_hour: i32, candidate: i32) -> i32 {
        let room = self
            .last_hour
            .saturating_sub(start_hour)
            .saturating_add(1);
        candidate.min(room).max(1)
    }

    /// Normalizes a stored placement so it fits the window.
    pub fn fit(&self, start_hour: Option<i32>, duration: i32) -> (Option<i32>, i32) {
        let duration = self.clamp_duration(duration);
        (
            start_hour.map(|hour| self.clamp_hour(hour, duration)),
            duration,
        )
    }

    pub fn hour_offset(&self, hour: i32) -> f64 {
        (f64::from(hour) - f64::from(self.first_hour)) * self.hour_height
    }

    pub fn duration_height(&self, duration: i32) -> f64 {
        f64::from(duration) * self.hour_height
    }

    pub fn timeline_height(&self) -> f64 {
        self.duration_height(self.span())
    }

    /// Whole hours covered by a vertical pointer movement, rounded to the nearest slot.
    pub fn pointer_delta_hours(&self, delta_px: f64) -> i32 {
        if !delta_px.is_finite() || self.hour_height <= 0.0 {
            return 0;
        }
        // `as` saturates for huge ratios.
        (delta_px / self.hour_height).round() as i32
    }
}

/// Twelve-hour label, e.g. `9 AM`. Hours outside 0..24 wrap by day.
pub fn format_hour(hour: i32) -> String {
    let hour = hour.rem_euclid(24);
    let period = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {period}")
}

pub fn format_span(start_hour: i32, duration: i32) -> String {
    if duration > 1 {
        format!(
            "{} - {}",
            format_hour(start_hour),
            format_hour(start_hour.saturating_add(duration))
        )
    } else {
        format_hour(start_hour)
    }
}

pub fn clamp_hour(candidate: i32, duration: i32) -> i32 {
    TimelineLayout::default().clamp_hour(candidate, duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_hour_uses_twelve_hour_clock() {
        assert_eq!(format_hour(0), "12 AM");
        assert_eq!(format_hour(12), "12 PM");
        assert_eq!(format_hour(6), "6 AM");
        assert_eq!(format_hour(23), "11 PM");
        assert_eq!(format_hour(24), "12 AM");
        assert_eq!(format_hour(-1), "11 PM");
    }

    #[test]
    fn format_span_shows_end_only_for_multi_hour_blocks() {
        assert_eq!(format_span(9, 1), "9 AM");
        assert_eq!(format_span(11, 2), "11 AM - 1 PM");
    }

    #[test]
    fn clamp_hour_stays_inside_window_for_any_input() {
        let candidates = [i32::MIN, -100, 0, 5, 6, 12, 22, 23, 24, 100, i32::MAX];
        for duration in 1..=(LAST_HOUR - FIRST_HOUR + 1) {
            for candidate in candidates {
                let hour = clamp_hour(candidate, duration);
                assert!(hour >= FIRST_HOUR, "{candidate}/{duration} -> {hour}");
                assert!(hour + duration <= LAST_HOUR + 1, "{candidate}/{duration} -> {hour}");
            }
        }
    }

    #[test]
    fn clamp_hour_keeps_valid_candidates() {
        assert_eq!(clamp_hour(9, 2), 9);
        assert_eq!(clamp_hour(22, 3), 21);
        assert_eq!(clamp_hour(2, 1), FIRST_HOUR);
    }

    #[test]
    fn oversized_duration_saturates_to_whole_window() {
        let layout = TimelineLayout::default();
        assert_eq!(layout.clamp_duration(40), 18);
        assert_eq!(layout.clamp_hour(15, 40), FIRST_HOUR);
        assert_eq!(layout.fit(Some(30), 0), (Some(LAST_HOUR), 1));
        assert_eq!(layout.fit(None, 5), (None, 5));
    }

    #[test]
    fn clamp_resize_bounds_both_ends() {
        let layout = TimelineLayout::default();
        assert_eq!(layout.clamp_resize(20, 10), 4);
        assert_eq!(layout.clamp_resize(20, -7), 1);
        assert_eq!(layout.clamp_resize(9, 3), 3);
    }

    #[test]
    fn offsets_are_linear_in_hours() {
        let layout = TimelineLayout::default();
        assert_eq!(layout.hour_offset(FIRST_HOUR), 0.0);
        assert_eq!(layout.hour_offset(9), 216.0);
        assert_eq!(layout.duration_height(2), 144.0);
        assert_eq!(layout.timeline_height(), 18.0 * HOUR_HEIGHT);
    }

    #[test]
    fn pointer_delta_rounds_to_nearest_slot() {
        let layout = TimelineLayout::default();
        assert_eq!(layout.pointer_delta_hours(0.0), 0);
        assert_eq!(layout.pointer_delta_hours(35.0), 0);
        assert_eq!(layout.pointer_delta_hours(37.0), 1);
        assert_eq!(layout.pointer_delta_hours(-110.0), -2);
        assert_eq!(layout.pointer_delta_hours(f64::NAN), 0);
        assert_eq!(layout.pointer_delta_hours(f64::MAX), i32::MAX);
    }
}

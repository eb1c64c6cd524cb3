use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for TaskId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Progress of a task. Persisted records with a missing, null or unknown status read
/// as `NotStarted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Submitted,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Submitted,
        TaskStatus::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Submitted => "submitted",
            Self::Done => "done",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == raw.trim())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Submitted => "Submitted",
            Self::Done => "Done",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::NotStarted => "status-not-started",
            Self::InProgress => "status-in-progress",
            Self::Submitted => "status-submitted",
            Self::Done => "status-done",
        }
    }

    /// Checkbox semantics: done flips back to not-started, anything else becomes done.
    pub fn toggled_done(self) -> Self {
        if self == Self::Done {
            Self::NotStarted
        } else {
            Self::Done
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredTask")]
pub struct Task {
    pub id: TaskId,
    pub date: String,
    pub title: String,
    pub notes: String,
    pub start_hour: Option<i32>,
    pub duration: i32,
    pub status: TaskStatus,
    pub order: u32,
}

impl Task {
    pub fn is_scheduled(&self) -> bool {
        self.start_hour.is_some()
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

}

// Persisted records are read permissively: every field may be missing, null or of
// the wrong type, and older records carry `time: "HH:MM"` instead of `startHour`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTask {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    notes: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    start_hour: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    time: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    order: Option<f64>,
}

/// Reads any JSON value and keeps it only when it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Rounds to the nearest whole number; non-finite values are dropped.
fn whole(raw: f64) -> Option<i64> {
    // `as` saturates out-of-range floats.
    raw.is_finite().then(|| raw.round() as i64)
}

fn whole_i32(raw: f64) -> Option<i32> {
    whole(raw).map(|value| value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

impl From<StoredTask> for Task {
    fn from(stored: StoredTask) -> Self {
        let start_hour = stored
            .start_hour
            .and_then(whole_i32)
            .or_else(|| stored.time.as_deref().and_then(legacy_time_hour));

        Self {
            id: stored
                .id
                .filter(|id| !id.trim().is_empty())
                .map(TaskId::from)
                .unwrap_or_else(TaskId::generate),
            date: stored.date.unwrap_or_default(),
            title: stored.title.unwrap_or_default(),
            notes: stored.notes.unwrap_or_default(),
            start_hour,
            duration: stored.duration.and_then(whole_i32).unwrap_or(1),
            status: stored
                .status
                .as_deref()
                .and_then(TaskStatus::parse)
                .unwrap_or_default(),
            order: stored
                .order
                .and_then(whole)
                .map(|order| order.clamp(0, i64::from(u32::MAX)) as u32)
                .unwrap_or(0),
        }
    }
}

fn legacy_time_hour(raw: &str) -> Option<i32> {
    let (hour, _) = raw.trim().split_once(':').unwrap_or((raw.trim(), ""));
    hour.parse::<i32>().ok()
}

/// Creation payload: every task field except `id` and `order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub date: String,
    pub title: String,
    pub notes: String,
    pub start_hour: Option<i32>,
    pub duration: i32,
    pub status: TaskStatus,
}

impl NewTask {
    pub fn new(date: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
            notes: String::new(),
            start_hour: None,
            duration: 1,
            status: TaskStatus::NotStarted,
        }
    }
}

/// Partial update merged into an existing task. `start_hour: Some(None)` unschedules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub date: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub start_hour: Option<Option<i32>>,
    pub duration: Option<i32>,
    pub status: Option<TaskStatus>,
    pub order: Option<u32>,
}

impl TaskPatch {
    pub fn schedule_at(hour: i32) -> Self {
        Self {
            start_hour: Some(Some(hour)),
            ..Self::default()
        }
    }

    pub fn unschedule() -> Self {
        Self {
            start_hour: Some(None),
            ..Self::default()
        }
    }

    pub fn resize_to(duration: i32) -> Self {
        Self {
            duration: Some(duration),
            ..Self::default()
        }
    }

    pub fn with_status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn with_text(title: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, task: &mut Task) {
        if let Some(date) = self.date {
            task.date = date;
        }
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(notes) = self.notes {
            task.notes = notes;
        }
        if let Some(start_hour) = self.start_hour {
            task.start_hour = start_hour;
        }
        if let Some(duration) = self.duration {
            task.duration = duration;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(order) = self.order {
            task.order = order;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_with_null_start_hour() {
        let task = Task {
            id: TaskId::from("t-1"),
            date: "2024-03-01".to_string(),
            title: "Draft report".to_string(),
            notes: String::new(),
            start_hour: None,
            duration: 2,
            status: TaskStatus::InProgress,
            order: 3,
        };

        let value = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(value["id"], "t-1");
        assert_eq!(value["startHour"], serde_json::Value::Null);
        assert_eq!(value["status"], "in-progress");
        assert_eq!(value["order"], 3);
    }

    #[test]
    fn reads_legacy_time_field_as_start_hour() {
        let raw = r#"{"id":"a","date":"2024-03-01","title":"Call","notes":"","time":"09:30","status":"done","order":0}"#;
        let task: Task = serde_json::from_str(raw).expect("parse legacy record");
        assert_eq!(task.start_hour, Some(9));
        assert_eq!(task.duration, 1);
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[test]
    fn tolerates_missing_and_unknown_fields() {
        let raw = r#"{"date":"2024-03-01","title":"x","status":"archived","color":"red"}"#;
        let task: Task = serde_json::from_str(raw).expect("parse sparse record");
        assert!(!task.id.as_str().is_empty());
        assert_eq!(task.status, TaskStatus::NotStarted);
        assert_eq!(task.notes, "");
        assert_eq!(task.order, 0);
        assert!(!task.is_scheduled());
    }

    #[test]
    fn null_and_mistyped_fields_fall_back_per_field() {
        let raw = r#"{"id":7,"date":"2024-03-01","title":null,"notes":["x"],"startHour":9.6,"duration":1.5,"status":null,"order":-1}"#;
        let task: Task = serde_json::from_str(raw).expect("parse damaged record");
        assert!(!task.id.as_str().is_empty());
        assert_eq!(task.date, "2024-03-01");
        assert_eq!(task.title, "");
        assert_eq!(task.notes, "");
        assert_eq!(task.start_hour, Some(10));
        assert_eq!(task.duration, 2);
        assert_eq!(task.status, TaskStatus::NotStarted);
        assert_eq!(task.order, 0);

        let task: Task =
            serde_json::from_str(r#"{"status":"submitted","order":"3","duration":"x"}"#)
                .expect("parse record with string numbers");
        assert_eq!(task.status, TaskStatus::Submitted);
        assert_eq!(task.order, 0);
        assert_eq!(task.duration, 1);
    }

    #[test]
    fn patch_unschedule_clears_start_hour_only() {
        let mut task: Task = serde_json::from_str(
            r#"{"id":"a","date":"2024-03-01","title":"x","startHour":10,"duration":3}"#,
        )
        .expect("parse task");

        TaskPatch::unschedule().apply(&mut task);
        assert_eq!(task.start_hour, None);
        assert_eq!(task.duration, 3);
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch::resize_to(2).is_empty());
    }

    #[test]
    fn status_parse_and_toggle() {
        assert_eq!(TaskStatus::parse("submitted"), Some(TaskStatus::Submitted));
        assert_eq!(TaskStatus::parse("bogus"), None);
        assert_eq!(TaskStatus::Done.toggled_done(), TaskStatus::NotStarted);
        assert_eq!(TaskStatus::InProgress.toggled_done(), TaskStatus::Done);
    }
}

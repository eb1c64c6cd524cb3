use std::collections::{BTreeSet, HashSet};

use anyhow::Context;
use tracing::{debug, error, info, warn};

use crate::config::PlannerConfig;
use crate::geometry::TimelineLayout;
use crate::storage::KeyValueStorage;
use crate::task::{NewTask, Task, TaskId, TaskPatch, TaskStatus};

/// Per-day counts shown next to the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DaySummary {
    pub total: usize,
    pub done: usize,
    pub in_progress: usize,
    pub submitted: usize,
    pub not_started: usize,
}

/// All tasks for every date, written through to one storage entry on each mutation.
///
/// Mutations never fail: unknown ids are ignored, placements are clamped into the
/// timeline window, and storage errors are logged while the in-memory collection stays
/// authoritative. Nothing is written before [`TaskStore::hydrate`] has run, so an early
/// mutation cannot clobber the persisted blob.
#[derive(Debug, Clone)]
pub struct TaskStore<S> {
    storage: S,
    key: String,
    layout: TimelineLayout,
    tasks: Vec<Task>,
    hydrated: bool,
}

impl<S: KeyValueStorage> TaskStore<S> {
    pub fn new(storage: S, key: impl Into<String>, layout: TimelineLayout) -> Self {
        Self {
            storage,
            key: key.into(),
            layout,
            tasks: Vec::new(),
            hydrated: false,
        }
    }

    pub fn from_config(storage: S, config: &PlannerConfig) -> Self {
        Self::new(storage, config.storage.key.clone(), config.timeline)
    }

    /// Loads the persisted collection. Missing or corrupt data yields an empty store.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn hydrate(&mut self) {
        if self.hydrated {
            debug!("store already hydrated");
            return;
        }

        let loaded = match self.storage.read(&self.key) {
            Ok(Some(raw)) => decode_tasks(&raw).unwrap_or_else(|error| {
                error!(error = %format!("{error:#}"), "persisted tasks unreadable; starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(error) => {
                error!(error = %format!("{error:#}"), "failed reading persisted tasks; starting empty");
                Vec::new()
            }
        };

        self.tasks = self.normalize(loaded);
        self.hydrated = true;
        info!(count = self.tasks.len(), "hydrated task store");
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn layout(&self) -> &TimelineLayout {
        &self.layout
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Tasks on `date`: scheduled ones by start hour, then unscheduled ones, each group
    /// tie-broken by `order`.
    pub fn tasks_for_date(&self, date: &str) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.iter().filter(|task| task.date == date).collect();
        tasks.sort_by_key(|task| {
            (
                task.start_hour.is_none(),
                task.start_hour.unwrap_or_default(),
                task.order,
            )
        });
        tasks
    }

    pub fn dates_with_tasks(&self) -> BTreeSet<String> {
        self.tasks.iter().map(|task| task.date.clone()).collect()
    }

    pub fn day_summary(&self, date: &str) -> DaySummary {
        self.tasks
            .iter()
            .filter(|task| task.date == date)
            .fold(DaySummary::default(), |mut summary, task| {
                summary.total += 1;
                match task.status {
                    TaskStatus::Done => summary.done += 1,
                    TaskStatus::InProgress => summary.in_progress += 1,
                    TaskStatus::Submitted => summary.submitted += 1,
                    TaskStatus::NotStarted => summary.not_started += 1,
                }
                summary
            })
    }

    /// Appends a task to its date; its `order` is the number of tasks already there.
    #[tracing::instrument(skip(self, new), fields(date = %new.date))]
    pub fn add_task(&mut self, new: NewTask) -> TaskId {
        let order = self.tasks.iter().filter(|task| task.date == new.date).count();
        let (start_hour, duration) = self.layout.fit(new.start_hour, new.duration);

        let mut id = TaskId::generate();
        while self.get(&id).is_some() {
            id = TaskId::generate();
        }

        self.tasks.push(Task {
            id: id.clone(),
            date: new.date,
            title: new.title,
            notes: new.notes,
            start_hour,
            duration,
            status: new.status,
            order: u32::try_from(order).unwrap_or(u32::MAX),
        });
        debug!(id = %id, order, "added task");

        self.persist();
        id
    }

    /// Merges `patch` into the task with `id`. Returns `false` for an unknown id.
    #[tracing::instrument(skip(self, patch), fields(id = %id))]
    pub fn update_task(&mut self, id: &TaskId, patch: TaskPatch) -> bool {
        let layout = self.layout;
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!("update for unknown task ignored");
            return false;
        };

        patch.apply(task);
        let (start_hour, duration) = layout.fit(task.start_hour, task.duration);
        task.start_hour = start_hour;
        task.duration = duration;
        debug!(?start_hour, duration, status = %task.status, "updated task");

        self.persist();
        true
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub fn delete_task(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() == before {
            debug!("delete for unknown task ignored");
            return false;
        }

        debug!("deleted task");
        self.persist();
        true
    }

    /// Gives every listed task on `date` its index as `order`. Ids from other dates
    /// or unknown ids are skipped; unlisted tasks keep their order.
    #[tracing::instrument(skip(self, ordered), fields(count = ordered.len()))]
    pub fn reorder_tasks(&mut self, date: &str, ordered: &[TaskId]) {
        let mut changed = 0_usize;
        for (index, id) in ordered.iter().enumerate() {
            let order = u32::try_from(index).unwrap_or(u32::MAX);
            if let Some(task) = self
                .tasks
                .iter_mut()
                .find(|task| &task.id == id && task.date == date)
            {
                task.order = order;
                changed += 1;
            } else {
                debug!(id = %id, "reorder skipped task not on this date");
            }
        }

        debug!(changed, "reordered tasks");
        self.persist();
    }

    fn normalize(&self, loaded: Vec<Task>) -> Vec<Task> {
        let mut seen = HashSet::with_capacity(loaded.len());
        loaded
            .into_iter()
            .map(|mut task| {
                if !seen.insert(task.id.clone()) {
                    let replacement = TaskId::generate();
                    warn!(
                        duplicate = %task.id,
                        replacement = %replacement,
                        "duplicate task id in persisted data; reassigned"
                    );
                    task.id = replacement.clone();
                    seen.insert(replacement);
                }
                let (start_hour, duration) = self.layout.fit(task.start_hour, task.duration);
                task.start_hour = start_hour;
                task.duration = duration;
                task
            })
            .collect()
    }

    fn persist(&mut self) {
        if !self.hydrated {
            debug!("store not hydrated yet; skipping persistence");
            return;
        }

        let result = serde_json::to_string(&self.tasks)
            .context("failed encoding tasks")
            .and_then(|json| self.storage.write(&self.key, &json));

        match result {
            Ok(()) => debug!(key = %self.key, count = self.tasks.len(), "persisted tasks"),
            Err(error) => {
                error!(
                    key = %self.key,
                    error = %format!("{error:#}"),
                    "failed persisting tasks; keeping in-memory state"
                );
            }
        }
    }
}

/// Decodes the persisted array. Records that do not parse are skipped; a document
/// that is not a JSON array at all is an error.
fn decode_tasks(raw: &str) -> anyhow::Result<Vec<Task>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<serde_json::Value> =
        serde_json::from_str(raw).context("persisted tasks are not a JSON array")?;

    let mut tasks = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Task>(record) {
            Ok(task) => tasks.push(task),
            Err(error) => warn!(index = idx, %error, "skipping unreadable task record"),
        }
    }
    Ok(tasks)
}

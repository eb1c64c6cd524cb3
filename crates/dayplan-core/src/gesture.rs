//! Pointer gestures on the day timeline.
//!
//! A gesture starts on pointer-down over a block's move or resize handle, produces a
//! ghost placement on every pointer move, and turns into at most one store update on
//! release. Only one gesture exists at a time.

use tracing::{debug, trace};

use crate::geometry::TimelineLayout;
use crate::task::{Task, TaskId, TaskPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Move,
    Resize,
}

/// Candidate placement previewed while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ghost {
    pub hour: i32,
    pub duration: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveGesture {
    pub kind: GestureKind,
    pub task_id: TaskId,
    pub origin_hour: i32,
    pub origin_duration: i32,
    pub origin_pointer_y: f64,
    /// False when an unscheduled task is being dropped onto the timeline.
    pub was_scheduled: bool,
    pub ghost: Option<Ghost>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    Move { task_id: TaskId, start_hour: i32 },
    Resize { task_id: TaskId, duration: i32 },
}

impl Commit {
    pub fn task_id(&self) -> &TaskId {
        match self {
            Self::Move { task_id, .. } | Self::Resize { task_id, .. } => task_id,
        }
    }

    pub fn into_patch(self) -> (TaskId, TaskPatch) {
        match self {
            Self::Move {
                task_id,
                start_hour,
            } => (task_id, TaskPatch::schedule_at(start_hour)),
            Self::Resize { task_id, duration } => (task_id, TaskPatch::resize_to(duration)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimelineGesture {
    active: Option<ActiveGesture>,
}

impl TimelineGesture {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveGesture> {
        self.active.as_ref()
    }

    pub fn dragging_task(&self) -> Option<&TaskId> {
        self.active.as_ref().map(|gesture| &gesture.task_id)
    }

    pub fn ghost_for(&self, task_id: &TaskId) -> Option<Ghost> {
        self.active
            .as_ref()
            .filter(|gesture| &gesture.task_id == task_id)
            .and_then(|gesture| gesture.ghost)
    }

    /// Starts a gesture. Returns `false` and leaves the running gesture untouched when
    /// one is already active.
    pub fn press(
        &mut self,
        kind: GestureKind,
        task: &Task,
        pointer_y: f64,
        layout: &TimelineLayout,
    ) -> bool {
        if let Some(current) = &self.active {
            debug!(
                active = %current.task_id,
                ignored = %task.id,
                "gesture already active; ignoring pointer down"
            );
            return false;
        }

        let origin_duration = layout.clamp_duration(task.duration);
        let origin_hour = task
            .start_hour
            .map(|hour| layout.clamp_hour(hour, origin_duration))
            .unwrap_or(layout.first_hour);

        debug!(
            task = %task.id,
            ?kind,
            origin_hour,
            origin_duration,
            "gesture started"
        );

        self.active = Some(ActiveGesture {
            kind,
            task_id: task.id.clone(),
            origin_hour,
            origin_duration,
            origin_pointer_y: if pointer_y.is_finite() { pointer_y } else { 0.0 },
            was_scheduled: task.is_scheduled(),
            ghost: None,
        });
        true
    }

    /// Recomputes the ghost from the current pointer position.
    pub fn track(&mut self, pointer_y: f64, layout: &TimelineLayout) -> Option<Ghost> {
        let gesture = self.active.as_mut()?;
        let delta = layout.pointer_delta_hours(pointer_y - gesture.origin_pointer_y);

        let ghost = match gesture.kind {
            GestureKind::Move => Ghost {
                hour: layout.clamp_hour(
                    gesture.origin_hour.saturating_add(delta),
                    gesture.origin_duration,
                ),
                duration: gesture.origin_duration,
            },
            GestureKind::Resize => Ghost {
                hour: gesture.origin_hour,
                duration: layout.clamp_resize(
                    gesture.origin_hour,
                    gesture.origin_duration.saturating_add(delta),
                ),
            },
        };

        trace!(task = %gesture.task_id, delta, ?ghost, "gesture tracked");
        gesture.ghost = Some(ghost);
        Some(ghost)
    }

    /// Ends the gesture. Yields a commit only when a ghost was computed and it differs
    /// from where the task sat when the gesture began.
    pub fn release(&mut self) -> Option<Commit> {
        let gesture = self.active.take()?;
        let Some(ghost) = gesture.ghost else {
            debug!(task = %gesture.task_id, "gesture released without movement");
            return None;
        };

        let commit = match gesture.kind {
            GestureKind::Move => {
                if gesture.was_scheduled && ghost.hour == gesture.origin_hour {
                    None
                } else {
                    Some(Commit::Move {
                        task_id: gesture.task_id,
                        start_hour: ghost.hour,
                    })
                }
            }
            GestureKind::Resize => {
                if ghost.duration == gesture.origin_duration {
                    None
                } else {
                    Some(Commit::Resize {
                        task_id: gesture.task_id,
                        duration: ghost.duration,
                    })
                }
            }
        };

        debug!(?commit, "gesture released");
        commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{FIRST_HOUR, HOUR_HEIGHT, LAST_HOUR};
    use crate::task::TaskStatus;

    fn task(id: &str, start_hour: Option<i32>, duration: i32) -> Task {
        Task {
            id: TaskId::from(id),
            date: "2024-03-01".to_string(),
            title: id.to_string(),
            notes: String::new(),
            start_hour,
            duration,
            status: TaskStatus::NotStarted,
            order: 0,
        }
    }

    #[test]
    fn move_far_down_clamps_to_last_slot() {
        let layout = TimelineLayout::default();
        let duration = 1;
        let a = task("a", Some(9), duration);
        let mut gesture = TimelineGesture::default();

        assert!(gesture.press(GestureKind::Move, &a, 100.0, &layout));
        let ghost = gesture
            .track(100.0 + 20.0 * HOUR_HEIGHT, &layout)
            .expect("ghost while dragging");
        assert_eq!(ghost, Ghost { hour: LAST_HOUR, duration });

        let commit = gesture.release().expect("commit");
        assert_eq!(
            commit,
            Commit::Move {
                task_id: TaskId::from("a"),
                start_hour: LAST_HOUR - duration + 1,
            }
        );
        assert!(!gesture.is_active());
    }

    #[test]
    fn move_keeps_multi_hour_block_inside_window() {
        let layout = TimelineLayout::default();
        let a = task("a", Some(10), 3);
        let mut gesture = TimelineGesture::default();

        gesture.press(GestureKind::Move, &a, 0.0, &layout);
        let ghost = gesture.track(50.0 * HOUR_HEIGHT, &layout).expect("ghost");
        assert_eq!(ghost.hour, LAST_HOUR - 3 + 1);
        assert_eq!(ghost.duration, 3);

        let ghost = gesture.track(-50.0 * HOUR_HEIGHT, &layout).expect("ghost");
        assert_eq!(ghost.hour, FIRST_HOUR);
    }

    #[test]
    fn resize_never_leaves_bounds() {
        let layout = TimelineLayout::default();
        let a = task("a", Some(20), 2);
        let mut gesture = TimelineGesture::default();
        gesture.press(GestureKind::Resize, &a, 0.0, &layout);

        for delta in [-1e12, -500.0, -72.0, 0.0, 72.0, 1e6, f64::INFINITY] {
            let ghost = gesture.track(delta, &layout).expect("ghost");
            assert_eq!(ghost.hour, 20);
            assert!(ghost.duration >= 1);
            assert!(ghost.hour + ghost.duration <= LAST_HOUR + 1);
        }

        gesture.track(-10.0 * HOUR_HEIGHT, &layout);
        assert_eq!(
            gesture.release(),
            Some(Commit::Resize {
                task_id: TaskId::from("a"),
                duration: 1,
            })
        );
    }

    #[test]
    fn resize_extends_by_rounded_hours() {
        let layout = TimelineLayout::default();
        let a = task("a", Some(9), 1);
        let mut gesture = TimelineGesture::default();
        gesture.press(GestureKind::Resize, &a, 300.0, &layout);

        let ghost = gesture.track(300.0 + 2.4 * HOUR_HEIGHT, &layout).expect("ghost");
        assert_eq!(ghost, Ghost { hour: 9, duration: 3 });

        let (id, patch) = gesture.release().expect("commit").into_patch();
        assert_eq!(id, TaskId::from("a"));
        assert_eq!(patch, TaskPatch::resize_to(3));
    }

    #[test]
    fn release_without_move_issues_nothing() {
        let layout = TimelineLayout::default();
        let a = task("a", Some(9), 1);
        let mut gesture = TimelineGesture::default();

        gesture.press(GestureKind::Move, &a, 10.0, &layout);
        assert_eq!(gesture.release(), None);
        assert!(!gesture.is_active());
        assert_eq!(gesture.release(), None);
    }

    #[test]
    fn release_with_zero_net_movement_skips_commit() {
        let layout = TimelineLayout::default();
        let a = task("a", Some(9), 2);
        let mut gesture = TimelineGesture::default();

        gesture.press(GestureKind::Move, &a, 10.0, &layout);
        gesture.track(10.0 + 3.0 * HOUR_HEIGHT, &layout);
        gesture.track(12.0, &layout);
        assert_eq!(gesture.release(), None);

        gesture.press(GestureKind::Resize, &a, 10.0, &layout);
        gesture.track(20.0, &layout);
        assert_eq!(gesture.release(), None);
    }

    #[test]
    fn unscheduled_task_starts_at_first_hour_and_always_commits() {
        let layout = TimelineLayout::default();
        let a = task("a", None, 1);
        let mut gesture = TimelineGesture::default();

        gesture.press(GestureKind::Move, &a, 0.0, &layout);
        let active = gesture.active().expect("active gesture");
        assert_eq!(active.origin_hour, FIRST_HOUR);
        assert!(!active.was_scheduled);

        gesture.track(5.0, &layout);
        assert_eq!(
            gesture.release(),
            Some(Commit::Move {
                task_id: TaskId::from("a"),
                start_hour: FIRST_HOUR,
            })
        );
    }

    #[test]
    fn second_press_is_ignored_while_dragging() {
        let layout = TimelineLayout::default();
        let a = task("a", Some(9), 1);
        let b = task("b", Some(14), 1);
        let mut gesture = TimelineGesture::default();

        assert!(gesture.press(GestureKind::Move, &a, 0.0, &layout));
        assert!(!gesture.press(GestureKind::Resize, &b, 0.0, &layout));
        assert_eq!(gesture.dragging_task(), Some(&TaskId::from("a")));

        gesture.track(HOUR_HEIGHT, &layout);
        assert_eq!(gesture.ghost_for(&TaskId::from("b")), None);
        assert_eq!(
            gesture.ghost_for(&TaskId::from("a")),
            Some(Ghost { hour: 10, duration: 1 })
        );
        assert_eq!(
            gesture.release().as_ref().map(Commit::task_id),
            Some(&TaskId::from("a"))
        );
    }

    #[test]
    fn track_while_idle_does_nothing() {
        let layout = TimelineLayout::default();
        let mut gesture = TimelineGesture::default();
        assert_eq!(gesture.track(400.0, &layout), None);
        assert!(!gesture.is_active());
    }
}

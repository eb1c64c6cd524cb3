use std::rc::Rc;

use dayplan_core::{
  GestureKind,
  NewTask,
  PlannerConfig,
  TaskId,
  TaskPatch,
  TaskStore,
  TimelineGesture
};
use yew::Reducible;

use super::storage::BrowserStorage;

pub type PlannerStore =
  TaskStore<Option<BrowserStorage>>;

/// Everything the timeline mutates: the
/// task store and the one gesture that may
/// be in flight.
#[derive(Debug, Clone)]
pub struct PlannerState {
  pub store:   PlannerStore,
  pub gesture: TimelineGesture
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlannerAction {
  Hydrate,
  Add(NewTask),
  Update(TaskId, TaskPatch),
  Delete(TaskId),
  Reorder {
    date:    String,
    ordered: Vec<TaskId>
  },
  PointerDown {
    kind:      GestureKind,
    task_id:   TaskId,
    pointer_y: f64
  },
  PointerMove {
    pointer_y: f64
  },
  PointerUp
}

impl PlannerState {
  pub fn new(
    config: &PlannerConfig
  ) -> Self {
    Self::with_store(
      TaskStore::from_config(
        BrowserStorage::detect(),
        config
      )
    )
  }

  pub fn with_store(
    store: PlannerStore
  ) -> Self {
    Self {
      store,
      gesture: TimelineGesture::default()
    }
  }
}

impl Reducible for PlannerState {
  type Action = PlannerAction;

  fn reduce(
    self: Rc<Self>,
    action: Self::Action
  ) -> Rc<Self> {
    // Pointer moves arrive at input rate;
    // skip the clone when the ghost is
    // unchanged.
    if let PlannerAction::PointerMove {
      pointer_y
    } = action
    {
      let mut gesture =
        self.gesture.clone();
      let before = gesture
        .active()
        .and_then(|active| active.ghost);
      let after = gesture.track(
        pointer_y,
        self.store.layout()
      );
      if after.is_none() || after == before
      {
        return self;
      }
      let mut next =
        Rc::unwrap_or_clone(self);
      next.gesture = gesture;
      return Rc::new(next);
    }

    let mut next =
      Rc::unwrap_or_clone(self);

    match action {
      | PlannerAction::Hydrate => {
        next.store.hydrate();
      }
      | PlannerAction::Add(new_task) => {
        next.store.add_task(new_task);
      }
      | PlannerAction::Update(id, patch) => {
        next.store.update_task(&id, patch);
      }
      | PlannerAction::Delete(id) => {
        next.store.delete_task(&id);
      }
      | PlannerAction::Reorder {
        date,
        ordered
      } => {
        next
          .store
          .reorder_tasks(&date, &ordered);
      }
      | PlannerAction::PointerDown {
        kind,
        task_id,
        pointer_y
      } => {
        let layout = *next.store.layout();
        match next.store.get(&task_id).cloned()
        {
          | Some(task) => {
            next.gesture.press(
              kind, &task, pointer_y,
              &layout
            );
          }
          | None => {
            tracing::warn!(
              task = %task_id,
              "pointer down on unknown \
               task"
            );
          }
        }
      }
      | PlannerAction::PointerMove {
        ..
      } => {}
      | PlannerAction::PointerUp => {
        if let Some(commit) =
          next.gesture.release()
        {
          let (id, patch) =
            commit.into_patch();
          next.store.update_task(&id, patch);
        }
      }
    }

    Rc::new(next)
  }
}

#[cfg(test)]
mod tests {
  use dayplan_core::{
    HOUR_HEIGHT,
    TimelineLayout
  };

  use super::*;

  fn hydrated_state() -> Rc<PlannerState> {
    let mut store = TaskStore::new(
      None,
      "dayplan.tasks",
      TimelineLayout::default()
    );
    store.hydrate();
    Rc::new(PlannerState::with_store(store))
  }

  fn add_scheduled(
    state: Rc<PlannerState>,
    hour: i32
  ) -> (Rc<PlannerState>, TaskId) {
    let state = state.reduce(
      PlannerAction::Add(NewTask {
        start_hour: Some(hour),
        ..NewTask::new(
          "2024-03-01",
          "block"
        )
      })
    );
    let id = state.store.tasks()[0]
      .id
      .clone();
    (state, id)
  }

  #[test]
  fn drag_commits_on_pointer_up() {
    let (state, id) =
      add_scheduled(hydrated_state(), 9);

    let state = state.reduce(
      PlannerAction::PointerDown {
        kind:      GestureKind::Move,
        task_id:   id.clone(),
        pointer_y: 50.0
      }
    );
    let state = state.reduce(
      PlannerAction::PointerMove {
        pointer_y: 50.0 + 2.0 * HOUR_HEIGHT
      }
    );
    assert_eq!(
      state
        .gesture
        .ghost_for(&id)
        .map(|ghost| ghost.hour),
      Some(11)
    );
    assert_eq!(
      state
        .store
        .get(&id)
        .and_then(|task| task.start_hour),
      Some(9)
    );

    let state =
      state.reduce(PlannerAction::PointerUp);
    assert!(!state.gesture.is_active());
    assert_eq!(
      state
        .store
        .get(&id)
        .and_then(|task| task.start_hour),
      Some(11)
    );
  }

  #[test]
  fn unchanged_ghost_keeps_same_state() {
    let (state, id) =
      add_scheduled(hydrated_state(), 9);
    let state = state.reduce(
      PlannerAction::PointerDown {
        kind:      GestureKind::Resize,
        task_id:   id,
        pointer_y: 0.0
      }
    );
    let first = state.reduce(
      PlannerAction::PointerMove {
        pointer_y: 1.0
      }
    );
    let second = Rc::clone(&first).reduce(
      PlannerAction::PointerMove {
        pointer_y: 2.0
      }
    );
    assert!(Rc::ptr_eq(&first, &second));
  }

  #[test]
  fn pointer_down_on_missing_task_stays_idle() {
    let state = hydrated_state().reduce(
      PlannerAction::PointerDown {
        kind:      GestureKind::Move,
        task_id:   TaskId::from("ghost"),
        pointer_y: 0.0
      }
    );
    assert!(!state.gesture.is_active());
  }
}

use chrono::NaiveDate;
use dayplan_core::calendar::date_key;
use dayplan_core::geometry::format_hour;
use dayplan_core::{
  NewTask,
  Task,
  TaskId,
  TimelineGesture,
  TimelineLayout
};
use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{
  MouseEvent,
  PointerEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html,
  use_effect_with,
  use_state
};

use super::{
  AddTaskDialog,
  TaskCard,
  TimelineBlock
};
use crate::app::PlannerAction;

#[derive(Properties, PartialEq)]
pub struct DayPanelProps {
  pub date:      NaiveDate,
  pub today:     NaiveDate,
  /// Tasks for `date`, already in display
  /// order.
  pub tasks:     Vec<Task>,
  pub gesture:   TimelineGesture,
  pub layout:    TimelineLayout,
  pub on_action: Callback<PlannerAction>
}

#[function_component(DayPanel)]
pub fn day_panel(
  props: &DayPanelProps
) -> Html {
  let show_add = use_state(|| false);
  let add_hour = use_state(|| None::<i32>);
  let reorder_source =
    use_state(|| None::<TaskId>);
  let reorder_target =
    use_state(|| None::<TaskId>);

  // Window-level listeners exist only while
  // a gesture is in flight; dropping them
  // detaches them.
  {
    let on_action =
      props.on_action.clone();
    use_effect_with(
      props.gesture.is_active(),
      move |active| {
        let listeners = if *active {
          let window = gloo::utils::window();
          let on_move = on_action.clone();
          let on_up = on_action.clone();
          let on_cancel = on_action;
          vec![
            EventListener::new(
              &window,
              "pointermove",
              move |event| {
                if let Some(event) = event
                  .dyn_ref::<PointerEvent>()
                {
                  on_move.emit(
                    PlannerAction::PointerMove {
                      pointer_y: f64::from(
                        event.client_y()
                      )
                    }
                  );
                }
              }
            ),
            EventListener::new(
              &window,
              "pointerup",
              move |_| {
                on_up.emit(
                  PlannerAction::PointerUp
                )
              }
            ),
            EventListener::new(
              &window,
              "pointercancel",
              move |_| {
                on_cancel.emit(
                  PlannerAction::PointerUp
                )
              }
            ),
          ]
        } else {
          Vec::new()
        };
        move || drop(listeners)
      }
    );
  }

  let date = date_key(props.date);
  let (scheduled, unscheduled): (
    Vec<&Task>,
    Vec<&Task>
  ) = props
    .tasks
    .iter()
    .partition(|task| task.is_scheduled());
  let unscheduled_ids = unscheduled
    .iter()
    .map(|task| task.id.clone())
    .collect::<Vec<_>>();

  let on_drag_start = {
    let reorder_source =
      reorder_source.clone();
    Callback::from(move |id: TaskId| {
      reorder_source.set(Some(id));
    })
  };

  let on_drag_end = {
    let reorder_source =
      reorder_source.clone();
    let reorder_target =
      reorder_target.clone();
    Callback::from(move |_: ()| {
      reorder_source.set(None);
      reorder_target.set(None);
    })
  };

  let on_drag_over = {
    let reorder_target =
      reorder_target.clone();
    Callback::from(move |id: TaskId| {
      if (*reorder_target).as_ref() != Some(&id)
      {
        reorder_target.set(Some(id));
      }
    })
  };

  let on_drop = {
    let reorder_source =
      reorder_source.clone();
    let reorder_target =
      reorder_target.clone();
    let on_action =
      props.on_action.clone();
    let date = date.clone();
    let ids = unscheduled_ids.clone();
    Callback::from(move |target: TaskId| {
      let source =
        (*reorder_source).clone();
      reorder_source.set(None);
      reorder_target.set(None);
      let Some(source) = source else {
        return;
      };
      if let Some(ordered) =
        moved_before(&ids, &source, &target)
      {
        on_action.emit(
          PlannerAction::Reorder {
            date:    date.clone(),
            ordered
          }
        );
      }
    })
  };

  let open_add = |hour: Option<i32>| {
    let show_add = show_add.clone();
    let add_hour = add_hour.clone();
    Callback::from(move |_: MouseEvent| {
      add_hour.set(hour);
      show_add.set(true);
    })
  };

  let on_add = {
    let on_action =
      props.on_action.clone();
    Callback::from(move |task: NewTask| {
      on_action
        .emit(PlannerAction::Add(task));
    })
  };

  let on_close = {
    let show_add = show_add.clone();
    Callback::from(move |_: ()| {
      show_add.set(false);
    })
  };

  let layout = props.layout;
  let dragging = props.gesture.dragging_task();

  // An unscheduled task being dragged onto
  // the timeline has no block yet; preview
  // it with a placeholder.
  let pending_drop = dragging
    .and_then(|id| {
      unscheduled
        .iter()
        .find(|task| &task.id == id)
    })
    .and_then(|task| {
      props
        .gesture
        .ghost_for(&task.id)
        .map(|ghost| (*task, ghost))
    });

  let heading = if props.date == props.today
  {
    "Today".to_string()
  } else {
    props.date.format("%A").to_string()
  };

  html! {
      <section class={classes!("day-panel", props.gesture.is_active().then_some("gesture-active"))}>
          <header class="day-panel-header">
              <div>
                  <h2>{ heading }</h2>
                  <span class="day-panel-date">{ props.date.format("%B %-d, %Y").to_string() }</span>
              </div>
              <button type="button" class="primary" onclick={open_add(None)}>{ "+ Add task" }</button>
          </header>

          <div class="unscheduled">
              <div class="section-title">
                  <span>{ "Unscheduled" }</span>
                  <span class="badge">{ unscheduled.len() }</span>
              </div>
              {
                  if unscheduled.is_empty() {
                      html! { <div class="empty-hint">{ "Nothing waiting for a slot" }</div> }
                  } else {
                      html! {
                          <div class="unscheduled-list">
                              {
                                  for unscheduled.iter().map(|task| {
                                      let is_reorder_source = (*reorder_source).as_ref() == Some(&task.id);
                                      let is_gesture_source = dragging == Some(&task.id);
                                      html! {
                                          <TaskCard
                                              key={task.id.to_string()}
                                              task={(*task).clone()}
                                              layout={layout}
                                              is_dragging={is_reorder_source || is_gesture_source}
                                              is_drop_hint={(*reorder_target).as_ref() == Some(&task.id) && !is_reorder_source}
                                              on_action={props.on_action.clone()}
                                              on_drag_start={on_drag_start.clone()}
                                              on_drag_end={on_drag_end.clone()}
                                              on_drag_over={on_drag_over.clone()}
                                              on_drop={on_drop.clone()}
                                          />
                                      }
                                  })
                              }
                          </div>
                      }
                  }
              }
          </div>

          <div class="timeline" style={format!("height:{}px", layout.timeline_height())}>
              {
                  for layout.hours().map(|hour| html! {
                      <div
                          class="hour-row"
                          style={format!("top:{}px;height:{}px", layout.hour_offset(hour), layout.hour_height)}
                          ondblclick={open_add(Some(hour))}
                      >
                          <span class="hour-label">{ format_hour(hour) }</span>
                      </div>
                  })
              }
              {
                  for scheduled.iter().map(|task| html! {
                      <TimelineBlock
                          key={task.id.to_string()}
                          task={(*task).clone()}
                          ghost={props.gesture.ghost_for(&task.id)}
                          layout={layout}
                          on_action={props.on_action.clone()}
                      />
                  })
              }
              {
                  match pending_drop {
                      Some((task, ghost)) => html! {
                          <div
                              class="timeline-ghost"
                              style={format!(
                                  "top:{}px;height:{}px",
                                  layout.hour_offset(ghost.hour),
                                  layout.duration_height(ghost.duration)
                              )}
                          >
                              { &task.title }
                          </div>
                      },
                      None => html! {}
                  }
              }
          </div>

          {
              if *show_add {
                  html! {
                      <AddTaskDialog
                          date={date.clone()}
                          layout={layout}
                          initial_hour={*add_hour}
                          on_add={on_add}
                          on_close={on_close}
                      />
                  }
              } else {
                  html! {}
              }
          }
      </section>
  }
}

/// New id order with `source` placed where
/// `target` sits. `None` when nothing moves.
fn moved_before(
  ids: &[TaskId],
  source: &TaskId,
  target: &TaskId
) -> Option<Vec<TaskId>> {
  if source == target {
    return None;
  }
  let from =
    ids.iter().position(|id| id == source)?;
  let to =
    ids.iter().position(|id| id == target)?;

  let mut ordered = ids.to_vec();
  let moved = ordered.remove(from);
  ordered.insert(to, moved);
  Some(ordered)
}

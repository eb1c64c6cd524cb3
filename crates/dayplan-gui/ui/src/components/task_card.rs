use dayplan_core::{
  GestureKind,
  Task,
  TaskId,
  TaskPatch,
  TaskStatus,
  TimelineLayout
};
use web_sys::{
  DragEvent,
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
  use_state
};

use super::{
  StatusSelect,
  confirm_delete,
  hour_options,
  input_value,
  parse_hour_choice
};
use crate::app::PlannerAction;

#[derive(Properties, PartialEq)]
pub struct TaskCardProps {
  pub task:          Task,
  pub layout:        TimelineLayout,
  pub is_dragging:   bool,
  pub is_drop_hint:  bool,
  pub on_action: Callback<PlannerAction>,
  pub on_drag_start: Callback<TaskId>,
  pub on_drag_end:   Callback<()>,
  pub on_drag_over:  Callback<TaskId>,
  pub on_drop:       Callback<TaskId>
}

/// An unscheduled task. The card itself is
/// reordered with native drag-and-drop; the
/// grip starts a timeline gesture that drops
/// it into an hour slot.
#[function_component(TaskCard)]
pub fn task_card(
  props: &TaskCardProps
) -> Html {
  let editing = use_state(|| false);
  let title_draft =
    use_state(String::new);
  let notes_draft =
    use_state(String::new);
  let hour_draft =
    use_state(|| None::<i32>);

  let task_id = props.task.id.clone();
  let status = props.task.status;

  let ondragstart = {
    let on_drag_start =
      props.on_drag_start.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: DragEvent| {
        if let Some(data_transfer) =
          event.data_transfer()
        {
          let _ = data_transfer.set_data(
            "text/plain",
            task_id.as_str()
          );
          data_transfer
            .set_drop_effect("move");
        }
        on_drag_start
          .emit(task_id.clone());
      }
    )
  };

  let ondragend = {
    let on_drag_end =
      props.on_drag_end.clone();
    Callback::from(move |_| {
      on_drag_end.emit(());
    })
  };

  let ondragover = {
    let on_drag_over =
      props.on_drag_over.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        on_drag_over
          .emit(task_id.clone());
      }
    )
  };

  let ondrop = {
    let on_drop = props.on_drop.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: DragEvent| {
        event.prevent_default();
        event.stop_propagation();
        on_drop.emit(task_id.clone());
      }
    )
  };

  let on_grip = {
    let on_action =
      props.on_action.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |event: PointerEvent| {
        if event.button() != 0 {
          return;
        }
        event.prevent_default();
        event.stop_propagation();
        on_action.emit(
          PlannerAction::PointerDown {
            kind:      GestureKind::Move,
            task_id:   task_id.clone(),
            pointer_y: f64::from(
              event.client_y()
            )
          }
        );
      }
    )
  };

  let on_toggle_done = {
    let on_action =
      props.on_action.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |_: web_sys::Event| {
        on_action.emit(
          PlannerAction::Update(
            task_id.clone(),
            TaskPatch::with_status(
              status.toggled_done()
            )
          )
        );
      }
    )
  };

  let on_status = {
    let on_action =
      props.on_action.clone();
    let task_id = task_id.clone();
    Callback::from(
      move |status: TaskStatus| {
        on_action.emit(
          PlannerAction::Update(
            task_id.clone(),
            TaskPatch::with_status(status)
          )
        );
      }
    )
  };

  let on_delete = {
    let on_action =
      props.on_action.clone();
    let task_id = task_id.clone();
    let title = props.task.title.clone();
    Callback::from(move |_: MouseEvent| {
      if confirm_delete(&title) {
        on_action.emit(
          PlannerAction::Delete(
            task_id.clone()
          )
        );
      }
    })
  };

  let on_edit = {
    let editing = editing.clone();
    let title_draft =
      title_draft.clone();
    let notes_draft =
      notes_draft.clone();
    let hour_draft = hour_draft.clone();
    let task = props.task.clone();
    Callback::from(move |_: MouseEvent| {
      title_draft.set(task.title.clone());
      notes_draft.set(task.notes.clone());
      hour_draft.set(task.start_hour);
      editing.set(true);
    })
  };

  let on_save = {
    let editing = editing.clone();
    let title_draft =
      title_draft.clone();
    let notes_draft =
      notes_draft.clone();
    let hour_draft = hour_draft.clone();
    let on_action =
      props.on_action.clone();
    let task_id = task_id.clone();
    Callback::from(move |_: MouseEvent| {
      let title = title_draft.trim();
      if title.is_empty() {
        tracing::warn!(
          task = %task_id,
          "refusing to save empty title"
        );
        return;
      }
      on_action.emit(
        PlannerAction::Update(
          task_id.clone(),
          TaskPatch {
            start_hour: Some(*hour_draft),
            ..TaskPatch::with_text(
              title,
              notes_draft.trim()
            )
          }
        )
      );
      editing.set(false);
    })
  };

  let on_cancel = {
    let editing = editing.clone();
    Callback::from(move |_: MouseEvent| {
      editing.set(false)
    })
  };

  if *editing {
    let on_title_input = {
      let title_draft =
        title_draft.clone();
      Callback::from(
        move |event: web_sys::InputEvent| {
          title_draft
            .set(input_value(&event));
        }
      )
    };
    let on_notes_input = {
      let notes_draft =
        notes_draft.clone();
      Callback::from(
        move |event: web_sys::InputEvent| {
          notes_draft
            .set(input_value(&event));
        }
      )
    };
    let on_hour_change = {
      let hour_draft = hour_draft.clone();
      Callback::from(
        move |event: web_sys::Event| {
          hour_draft.set(parse_hour_choice(
            &input_value(&event)
          ));
        }
      )
    };

    return html! {
        <div class="task-card editing">
            <input
                class="card-title-input"
                value={(*title_draft).clone()}
                oninput={on_title_input}
            />
            <textarea
                class="card-notes-input"
                placeholder="Notes"
                value={(*notes_draft).clone()}
                oninput={on_notes_input}
            />
            <label class="field">
                <span>{ "Start" }</span>
                <select onchange={on_hour_change}>
                    { hour_options(&props.layout, *hour_draft) }
                </select>
            </label>
            <div class="card-actions">
                <button type="button" class="small primary" onclick={on_save}>{ "Save" }</button>
                <button type="button" class="small" onclick={on_cancel}>{ "Cancel" }</button>
            </div>
        </div>
    };
  }

  html! {
      <div
          class={classes!(
              "task-card",
              status.css_class(),
              props.is_dragging.then_some("dragging"),
              props.is_drop_hint.then_some("drop-hint")
          )}
          draggable="true"
          {ondragstart}
          {ondragend}
          {ondragover}
          {ondrop}
      >
          <div class="card-header">
              <span
                  class="schedule-grip"
                  title="Drag onto the timeline"
                  onpointerdown={on_grip}
              >{ "⠿" }</span>
              <input
                  type="checkbox"
                  class="done-toggle"
                  aria-label="Done"
                  checked={props.task.is_done()}
                  onchange={on_toggle_done}
              />
              <span class="card-title">{ &props.task.title }</span>
          </div>
          {
              if props.task.notes.trim().is_empty() {
                  html! {}
              } else {
                  html! { <div class="card-notes">{ &props.task.notes }</div> }
              }
          }
          <div class="card-actions">
              <StatusSelect status={status} on_change={on_status} />
              <button type="button" class="small" onclick={on_edit}>{ "Edit" }</button>
              <button type="button" class="small danger" onclick={on_delete}>{ "Delete" }</button>
          </div>
      </div>
  }
}

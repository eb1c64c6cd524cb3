use dayplan_core::geometry::format_span;
use dayplan_core::{
  Ghost,
  GestureKind,
  Task,
  TaskPatch,
  TaskStatus,
  TimelineLayout
};
use web_sys::{
  KeyboardEvent,
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
  input_value
};
use crate::app::PlannerAction;

/// Blocks shorter than this drop the notes
/// and controls row.
const COMPACT_BLOCK_PX: f64 = 56.0;

#[derive(Properties, PartialEq)]
pub struct TimelineBlockProps {
  pub task:      Task,
  /// Live placement while this block is
  /// being dragged or resized.
  pub ghost:     Option<Ghost>,
  pub layout:    TimelineLayout,
  pub on_action: Callback<PlannerAction>
}

#[function_component(TimelineBlock)]
pub fn timeline_block(
  props: &TimelineBlockProps
) -> Html {
  let editing = use_state(|| false);
  let title_draft =
    use_state(String::new);
  let notes_draft =
    use_state(String::new);

  let Some(start_hour) = props
    .ghost
    .map(|ghost| ghost.hour)
    .or(props.task.start_hour)
  else {
    return html! {};
  };
  let duration = props
    .ghost
    .map(|ghost| ghost.duration)
    .unwrap_or(props.task.duration);

  let top =
    props.layout.hour_offset(start_hour);
  let height = props
    .layout
    .duration_height(duration);
  let compact = height < COMPACT_BLOCK_PX;
  let task_id = props.task.id.clone();
  let status = props.task.status;

  let start_gesture = |kind: GestureKind| {
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
            kind,
            task_id: task_id.clone(),
            pointer_y: f64::from(
              event.client_y()
            )
          }
        );
      }
    )
  };

  let update = |patch: TaskPatch| {
    let on_action =
      props.on_action.clone();
    let task_id = task_id.clone();
    move || {
      on_action.emit(
        PlannerAction::Update(
          task_id.clone(),
          patch.clone()
        )
      )
    }
  };

  let on_toggle_done = {
    let emit = update(
      TaskPatch::with_status(
        status.toggled_done()
      )
    );
    Callback::from(move |_: web_sys::Event| {
      emit()
    })
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

  let on_unschedule = {
    let emit =
      update(TaskPatch::unschedule());
    Callback::from(move |_: MouseEvent| {
      emit()
    })
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
      } else {
        tracing::debug!(
          task = %task_id,
          "delete canceled"
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
    let title = props.task.title.clone();
    let notes = props.task.notes.clone();
    Callback::from(move |_: MouseEvent| {
      title_draft.set(title.clone());
      notes_draft.set(notes.clone());
      editing.set(true);
    })
  };

  let save = {
    let editing = editing.clone();
    let title_draft =
      title_draft.clone();
    let notes_draft =
      notes_draft.clone();
    let on_action =
      props.on_action.clone();
    let task_id = task_id.clone();
    move || {
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
          TaskPatch::with_text(
            title,
            notes_draft.trim()
          )
        )
      );
      editing.set(false);
    }
  };

  let on_save = {
    let save = save.clone();
    Callback::from(move |_: MouseEvent| {
      save()
    })
  };

  let on_cancel = {
    let editing = editing.clone();
    Callback::from(move |_: MouseEvent| {
      editing.set(false)
    })
  };

  let on_title_keydown = {
    let editing = editing.clone();
    Callback::from(
      move |event: KeyboardEvent| {
        match event.key().as_str() {
          | "Enter" => save(),
          | "Escape" => editing.set(false),
          | _ => {}
        }
      }
    )
  };

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

  let stop = |event: PointerEvent| {
    event.stop_propagation()
  };

  let style = format!(
    "top:{top}px;height:{height}px;"
  );
  let class = classes!(
    "timeline-block",
    status.css_class(),
    compact.then_some("compact"),
    props.ghost.is_some().then_some("dragging"),
    (*editing).then_some("editing")
  );

  if *editing {
    return html! {
        <div {class} {style}>
            <input
                class="block-title-input"
                value={(*title_draft).clone()}
                oninput={on_title_input}
                onkeydown={on_title_keydown}
                onpointerdown={stop}
            />
            {
                if compact {
                    html! {}
                } else {
                    html! {
                        <textarea
                            class="block-notes-input"
                            value={(*notes_draft).clone()}
                            oninput={on_notes_input}
                            onpointerdown={stop}
                        />
                    }
                }
            }
            <div class="block-actions">
                <button type="button" class="small primary" onclick={on_save} onpointerdown={stop}>{ "Save" }</button>
                <button type="button" class="small" onclick={on_cancel} onpointerdown={stop}>{ "Cancel" }</button>
            </div>
        </div>
    };
  }

  html! {
      <div {class} {style} onpointerdown={start_gesture(GestureKind::Move)}>
          <div class="block-header">
              <input
                  type="checkbox"
                  class="done-toggle"
                  aria-label="Done"
                  checked={props.task.is_done()}
                  onchange={on_toggle_done}
                  onpointerdown={stop}
              />
              <span class="block-title">{ &props.task.title }</span>
              <span class="block-span">{ format_span(start_hour, duration) }</span>
          </div>
          {
              if compact || props.task.notes.trim().is_empty() {
                  html! {}
              } else {
                  html! { <div class="block-notes">{ &props.task.notes }</div> }
              }
          }
          {
              if compact {
                  html! {}
              } else {
                  html! {
                      <div class="block-actions">
                          <StatusSelect status={status} on_change={on_status} compact={true} />
                          <button type="button" class="small" onclick={on_edit} onpointerdown={stop}>{ "Edit" }</button>
                          <button type="button" class="small" onclick={on_unschedule} onpointerdown={stop}>{ "Unschedule" }</button>
                          <button type="button" class="small danger" onclick={on_delete} onpointerdown={stop}>{ "Delete" }</button>
                      </div>
                  }
              }
          }
          <div
              class="resize-handle"
              aria-label="Resize"
              onpointerdown={start_gesture(GestureKind::Resize)}
          ></div>
      </div>
  }
}

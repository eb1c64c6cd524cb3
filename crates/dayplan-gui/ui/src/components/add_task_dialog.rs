use dayplan_core::{
  NewTask,
  TaskStatus,
  TimelineLayout
};
use web_sys::{
  MouseEvent,
  SubmitEvent
};
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html,
  use_state
};

use super::{
  StatusSelect,
  hour_options,
  input_value,
  parse_hour_choice
};

#[derive(Properties, PartialEq)]
pub struct AddTaskDialogProps {
  pub date:         String,
  pub layout:       TimelineLayout,
  /// Prefilled start hour, e.g. when opened
  /// from an empty timeline slot.
  #[prop_or_default]
  pub initial_hour: Option<i32>,
  pub on_add:       Callback<NewTask>,
  pub on_close:     Callback<()>
}

#[function_component(AddTaskDialog)]
pub fn add_task_dialog(
  props: &AddTaskDialogProps
) -> Html {
  let title = use_state(String::new);
  let notes = use_state(String::new);
  let start_hour = {
    let initial = props.initial_hour;
    use_state(move || initial)
  };
  let duration = use_state(|| 1_i32);
  let status =
    use_state(TaskStatus::default);
  let error =
    use_state(|| None::<&'static str>);

  let on_title = {
    let title = title.clone();
    let error = error.clone();
    Callback::from(
      move |event: web_sys::InputEvent| {
        title.set(input_value(&event));
        error.set(None);
      }
    )
  };

  let on_notes = {
    let notes = notes.clone();
    Callback::from(
      move |event: web_sys::InputEvent| {
        notes.set(input_value(&event));
      }
    )
  };

  let on_start = {
    let start_hour = start_hour.clone();
    Callback::from(
      move |event: web_sys::Event| {
        start_hour.set(parse_hour_choice(
          &input_value(&event)
        ));
      }
    )
  };

  let on_duration = {
    let duration = duration.clone();
    Callback::from(
      move |event: web_sys::Event| {
        match input_value(&event)
          .trim()
          .parse::<i32>()
        {
          | Ok(value) => duration.set(value),
          | Err(parse_error) => {
            tracing::warn!(
              %parse_error,
              "ignoring invalid duration"
            )
          }
        }
      }
    )
  };

  let on_status = {
    let status = status.clone();
    Callback::from(
      move |value: TaskStatus| {
        status.set(value);
      }
    )
  };

  let onsubmit = {
    let title = title.clone();
    let notes = notes.clone();
    let start_hour = start_hour.clone();
    let duration = duration.clone();
    let status = status.clone();
    let error = error.clone();
    let date = props.date.clone();
    let on_add = props.on_add.clone();
    let on_close = props.on_close.clone();
    Callback::from(
      move |event: SubmitEvent| {
        event.prevent_default();
        let trimmed = title.trim();
        if trimmed.is_empty() {
          error.set(Some(
            "Title is required"
          ));
          return;
        }
        on_add.emit(NewTask {
          notes: notes
            .trim()
            .to_string(),
          start_hour: *start_hour,
          duration: *duration,
          status: *status,
          ..NewTask::new(
            date.clone(),
            trimmed
          )
        });
        on_close.emit(());
      }
    )
  };

  let on_cancel = {
    let on_close =
      props.on_close.clone();
    Callback::from(move |_: MouseEvent| {
      on_close.emit(());
    })
  };

  let on_backdrop = {
    let on_close =
      props.on_close.clone();
    Callback::from(
      move |event: MouseEvent| {
        if event.target()
          == event.current_target()
        {
          on_close.emit(());
        }
      }
    )
  };

  let max_duration = props.layout.span();

  html! {
      <div class="modal-backdrop" onclick={on_backdrop}>
          <form class="modal add-task-dialog" {onsubmit}>
              <h2>{ "New task" }</h2>
              <label class="field">
                  <span>{ "Title" }</span>
                  <input value={(*title).clone()} oninput={on_title} placeholder="What needs doing?" />
              </label>
              {
                  match *error {
                      Some(message) => html! { <div class="field-error">{ message }</div> },
                      None => html! {}
                  }
              }
              <label class="field">
                  <span>{ "Notes" }</span>
                  <textarea value={(*notes).clone()} oninput={on_notes} />
              </label>
              <div class="field-row">
                  <label class="field">
                      <span>{ "Start" }</span>
                      <select onchange={on_start}>
                          { hour_options(&props.layout, *start_hour) }
                      </select>
                  </label>
                  <label class="field">
                      <span>{ "Hours" }</span>
                      <input
                          type="number"
                          min="1"
                          max={max_duration.to_string()}
                          value={duration.to_string()}
                          onchange={on_duration}
                      />
                  </label>
                  <label class="field">
                      <span>{ "Status" }</span>
                      <StatusSelect status={*status} on_change={on_status} />
                  </label>
              </div>
              <div class="modal-actions">
                  <button type="button" onclick={on_cancel}>{ "Cancel" }</button>
                  <button type="submit" class="primary">{ "Add task" }</button>
              </div>
          </form>
      </div>
  }
}

use dayplan_core::TaskStatus;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::input_value;

#[derive(Properties, PartialEq)]
pub struct StatusSelectProps {
  pub status:    TaskStatus,
  pub on_change: Callback<TaskStatus>,
  #[prop_or_default]
  pub compact:   bool
}

#[function_component(StatusSelect)]
pub fn status_select(
  props: &StatusSelectProps
) -> Html {
  let onchange = {
    let on_change =
      props.on_change.clone();
    Callback::from(
      move |event: web_sys::Event| {
        let raw = input_value(&event);
        match TaskStatus::parse(&raw) {
          | Some(status) => {
            on_change.emit(status)
          }
          | None => {
            tracing::warn!(
              raw,
              "ignoring unknown status \
               choice"
            )
          }
        }
      }
    )
  };

  let class = if props.compact {
    "status-select compact"
  } else {
    "status-select"
  };

  html! {
      <select
          class={class}
          aria-label="Status"
          {onchange}
          onpointerdown={|event: web_sys::PointerEvent| event.stop_propagation()}
      >
          {
              for TaskStatus::ALL.iter().map(|status| html! {
                  <option value={status.as_str()} selected={*status == props.status}>
                      { status.label() }
                  </option>
              })
          }
      </select>
  }
}

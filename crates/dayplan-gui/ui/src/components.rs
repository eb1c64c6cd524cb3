mod add_task_dialog;
mod day_panel;
mod month_calendar;
mod quick_stats;
mod status_select;
mod task_card;
mod timeline_block;
mod week_strip;

pub use add_task_dialog::AddTaskDialog;
pub use day_panel::DayPanel;
use dayplan_core::TimelineLayout;
use dayplan_core::geometry::format_hour;
pub use month_calendar::MonthCalendar;
pub use quick_stats::QuickStats;
pub use status_select::StatusSelect;
pub use task_card::TaskCard;
pub use timeline_block::TimelineBlock;
pub use week_strip::WeekStrip;
use yew::{
  Html,
  TargetCast,
  html
};

fn input_value(
  event: &web_sys::Event
) -> String {
  if let Some(input) = event
    .target_dyn_into::<
      web_sys::HtmlInputElement
    >()
  {
    return input.value();
  }
  if let Some(area) = event
    .target_dyn_into::<
      web_sys::HtmlTextAreaElement
    >()
  {
    return area.value();
  }
  if let Some(select) = event
    .target_dyn_into::<
      web_sys::HtmlSelectElement
    >()
  {
    return select.value();
  }
  tracing::warn!(
    "input event had unexpected target"
  );
  String::new()
}

/// `<option>`s for every hour slot on the
/// timeline, plus an empty "unscheduled"
/// choice.
fn hour_options(
  layout: &TimelineLayout,
  selected: Option<i32>
) -> Html {
  html! {
      <>
          <option value="" selected={selected.is_none()}>{ "Unscheduled" }</option>
          {
              for layout.hours().map(|hour| html! {
                  <option value={hour.to_string()} selected={selected == Some(hour)}>
                      { format_hour(hour) }
                  </option>
              })
          }
      </>
  }
}

fn parse_hour_choice(
  raw: &str
) -> Option<i32> {
  raw.trim().parse::<i32>().ok()
}

fn confirm_delete(title: &str) -> bool {
  web_sys::window()
    .and_then(|window| {
      window
        .confirm_with_message(&format!(
          "Delete '{title}'?"
        ))
        .ok()
    })
    .unwrap_or(false)
}

use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::{
  Datelike,
  NaiveDate,
  Weekday
};
use dayplan_core::calendar::{
  add_days,
  date_key,
  week_days
};
use yew::{
  Callback,
  Html,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct WeekStripProps {
  pub selected:         NaiveDate,
  pub today:            NaiveDate,
  pub week_start:       Weekday,
  pub dates_with_tasks:
    Rc<BTreeSet<String>>,
  pub on_select: Callback<NaiveDate>
}

/// Compact seven-day picker shown above the
/// day panel on narrow screens.
#[function_component(WeekStrip)]
pub fn week_strip(
  props: &WeekStripProps
) -> Html {
  let jump = |days: i64| {
    let on_select =
      props.on_select.clone();
    let target =
      add_days(props.selected, days);
    Callback::from(move |_| {
      on_select.emit(target);
    })
  };

  html! {
      <div class="week-strip">
          <button type="button" class="icon-button" aria-label="Previous week" onclick={jump(-7)}>{ "‹" }</button>
          {
              for week_days(props.selected, props.week_start).into_iter().map(|day| {
                  let on_select = props.on_select.clone();
                  let has_tasks = props.dates_with_tasks.contains(&date_key(day));
                  html! {
                      <button
                          type="button"
                          class={classes!(
                              "week-day",
                              (day == props.selected).then_some("selected"),
                              (day == props.today).then_some("today")
                          )}
                          onclick={move |_| on_select.emit(day)}
                      >
                          <span class="week-day-name">{ day.format("%a").to_string() }</span>
                          <span class="week-day-number">{ day.day() }</span>
                          {
                              if has_tasks {
                                  html! { <span class="task-dot"></span> }
                              } else {
                                  html! {}
                              }
                          }
                      </button>
                  }
              })
          }
          <button type="button" class="icon-button" aria-label="Next week" onclick={jump(7)}>{ "›" }</button>
      </div>
  }
}

use std::collections::BTreeSet;
use std::rc::Rc;

use chrono::{
  Datelike,
  NaiveDate,
  Weekday
};
use dayplan_core::calendar::{
  date_key,
  month_grid,
  weekday_labels
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
pub struct MonthCalendarProps {
  pub current_month:    NaiveDate,
  pub selected:         NaiveDate,
  pub today:            NaiveDate,
  pub week_start:       Weekday,
  pub dates_with_tasks:
    Rc<BTreeSet<String>>,
  pub on_select: Callback<NaiveDate>,
  pub on_change_month: Callback<i32>
}

#[function_component(MonthCalendar)]
pub fn month_calendar(
  props: &MonthCalendarProps
) -> Html {
  let cells = month_grid(
    props.current_month,
    props.week_start
  );
  let title = props
    .current_month
    .format("%B %Y")
    .to_string();

  let shift = |offset: i32| {
    let on_change_month =
      props.on_change_month.clone();
    Callback::from(move |_| {
      on_change_month.emit(offset);
    })
  };

  let on_today = {
    let on_select =
      props.on_select.clone();
    let today = props.today;
    Callback::from(move |_| {
      on_select.emit(today);
    })
  };

  let viewing_today_month = props
    .current_month
    .year()
    == props.today.year()
    && props.current_month.month()
      == props.today.month();

  html! {
      <section class="month-calendar">
          <div class="month-calendar-header">
              <button type="button" class="icon-button" aria-label="Previous month" onclick={shift(-1)}>{ "‹" }</button>
              <span class="month-title">{ title }</span>
              <button type="button" class="icon-button" aria-label="Next month" onclick={shift(1)}>{ "›" }</button>
          </div>
          {
              if viewing_today_month {
                  html! {}
              } else {
                  html! {
                      <button type="button" class="today-button" onclick={on_today}>{ "Today" }</button>
                  }
              }
          }
          <div class="month-grid">
              {
                  for weekday_labels(props.week_start).into_iter().map(|label| html! {
                      <span class="weekday-label">{ label }</span>
                  })
              }
              {
                  for cells.into_iter().map(|cell| {
                      let Some(day) = cell else {
                          return html! { <span class="day-cell blank"></span> };
                      };
                      let has_tasks = props.dates_with_tasks.contains(&date_key(day));
                      let on_select = props.on_select.clone();
                      html! {
                          <button
                              type="button"
                              class={classes!(
                                  "day-cell",
                                  (day == props.selected).then_some("selected"),
                                  (day == props.today).then_some("today")
                              )}
                              onclick={move |_| on_select.emit(day)}
                          >
                              <span>{ day.day() }</span>
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
          </div>
      </section>
  }
}

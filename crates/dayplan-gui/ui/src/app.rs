mod state;
mod storage;

use std::rc::Rc;

use chrono::{
  Datelike,
  NaiveDate
};
use dayplan_core::PlannerConfig;
use web_sys::MouseEvent;
use dayplan_core::calendar::{
  date_key,
  first_day_of_month,
  shift_months
};
use yew::{
  Callback,
  Html,
  function_component,
  html,
  use_effect_with,
  use_memo,
  use_reducer,
  use_state
};

pub use self::state::PlannerAction;
use self::state::PlannerState;
use crate::components::{
  DayPanel,
  MonthCalendar,
  QuickStats,
  WeekStrip
};

const PLANNER_CONFIG_TOML: &str =
  include_str!("../assets/planner.toml");

#[function_component(App)]
pub fn app() -> Html {
  let config = use_memo((), |_| {
    PlannerConfig::load_or_default(
      PLANNER_CONFIG_TOML
    )
  });
  let planner = {
    let config = Rc::clone(&config);
    use_reducer(move || {
      PlannerState::new(&config)
    })
  };
  let today = *use_memo((), |_| today_local());
  let selected_date = use_state(|| today);
  let current_month = use_state(|| {
    first_day_of_month(
      today.year(),
      today.month()
    )
  });
  let calendar_open = use_state(|| false);

  {
    let planner = planner.clone();
    use_effect_with((), move |_| {
      planner
        .dispatch(PlannerAction::Hydrate);
      || ()
    });
  }

  let on_action = {
    let planner = planner.clone();
    Callback::from(
      move |action: PlannerAction| {
        planner.dispatch(action);
      }
    )
  };

  let on_select_date = {
    let selected_date =
      selected_date.clone();
    let current_month =
      current_month.clone();
    let calendar_open =
      calendar_open.clone();
    Callback::from(
      move |date: NaiveDate| {
        tracing::debug!(date = %date, "selected date");
        selected_date.set(date);
        current_month.set(
          first_day_of_month(
            date.year(),
            date.month()
          )
        );
        calendar_open.set(false);
      }
    )
  };

  let on_change_month = {
    let current_month =
      current_month.clone();
    Callback::from(move |offset: i32| {
      current_month.set(shift_months(
        *current_month,
        offset
      ));
    })
  };

  let toggle_calendar = {
    let calendar_open =
      calendar_open.clone();
    Callback::from(move |_: MouseEvent| {
      calendar_open.set(!*calendar_open);
    })
  };

  if !planner.store.is_hydrated() {
    return html! {
        <div class="loading-screen">
            <div class="spinner"></div>
        </div>
    };
  }

  let week_start =
    config.calendar.week_start();
  let selected_key =
    date_key(*selected_date);
  let day_tasks = planner
    .store
    .tasks_for_date(&selected_key)
    .into_iter()
    .cloned()
    .collect::<Vec<_>>();
  let dates_with_tasks =
    Rc::new(planner.store.dates_with_tasks());
  let summary =
    planner.store.day_summary(&selected_key);

  let month_calendar = html! {
      <MonthCalendar
          current_month={*current_month}
          selected={*selected_date}
          today={today}
          week_start={week_start}
          dates_with_tasks={Rc::clone(&dates_with_tasks)}
          on_select={on_select_date.clone()}
          on_change_month={on_change_month.clone()}
      />
  };

  html! {
      <div class="planner">
          <header class="planner-header">
              <div class="brand">
                  <span class="brand-icon">{ "▦" }</span>
                  <h1>{ "Planner" }</h1>
              </div>
              <span class="header-date">{ today.format("%A, %B %-d, %Y").to_string() }</span>
          </header>

          <div class="mobile-strip">
              <WeekStrip
                  selected={*selected_date}
                  today={today}
                  week_start={week_start}
                  dates_with_tasks={Rc::clone(&dates_with_tasks)}
                  on_select={on_select_date.clone()}
              />
              <button type="button" class="icon-button" aria-label="Open calendar" onclick={toggle_calendar}>
                  { if *calendar_open { "▴" } else { "▾" } }
              </button>
          </div>
          {
              if *calendar_open {
                  html! { <div class="mobile-calendar">{ month_calendar.clone() }</div> }
              } else {
                  html! {}
              }
          }

          <div class="planner-body">
              <aside class="planner-sidebar">
                  { month_calendar }
                  <QuickStats summary={summary} />
              </aside>
              <main class="planner-main">
                  <DayPanel
                      date={*selected_date}
                      today={today}
                      tasks={day_tasks}
                      gesture={planner.gesture.clone()}
                      layout={*planner.store.layout()}
                      on_action={on_action}
                  />
              </main>
          </div>
      </div>
  }
}

fn today_local() -> NaiveDate {
  let now = js_sys::Date::new_0();
  NaiveDate::from_ymd_opt(
    now.get_full_year() as i32,
    now.get_month() + 1,
    now.get_date()
  )
  .unwrap_or_else(|| {
    chrono::Local::now().date_naive()
  })
}

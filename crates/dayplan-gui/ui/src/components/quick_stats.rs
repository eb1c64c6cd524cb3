use dayplan_core::DaySummary;
use yew::{
  Html,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct QuickStatsProps {
  pub summary: DaySummary
}

#[function_component(QuickStats)]
pub fn quick_stats(
  props: &QuickStatsProps
) -> Html {
  let summary = props.summary;
  let percent = if summary.total == 0 {
    0
  } else {
    summary.done * 100 / summary.total
  };

  let stat = |label: &str,
              value: usize,
              class: &str| {
    html! {
        <div class={format!("stat {class}")}>
            <span class="stat-value">{ value }</span>
            <span class="stat-label">{ label.to_string() }</span>
        </div>
    }
  };

  html! {
      <section class="quick-stats">
          <div class="quick-stats-header">
              <span>{ "Day progress" }</span>
              <span class="badge">{ format!("{percent}%") }</span>
          </div>
          <div class="progress-track">
              <div class="progress-fill" style={format!("width:{percent}%")}></div>
          </div>
          <div class="stat-grid">
              { stat("Tasks", summary.total, "total") }
              { stat("Done", summary.done, "done") }
              { stat("In progress", summary.in_progress, "in-progress") }
              { stat("Submitted", summary.submitted, "submitted") }
              { stat("Not started", summary.not_started, "not-started") }
          </div>
      </section>
  }
}

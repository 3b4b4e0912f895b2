use crate::logs::LogSet;
use crate::models::ProgressSummary;
use crate::phases::Phase;

pub fn render_index(active: &Phase, logs: &LogSet, summary: &ProgressSummary) -> String {
    let tabs: String = summary
        .phases
        .iter()
        .map(|phase| {
            let class = if phase.id == active.id { "tab active" } else { "tab" };
            format!(
                r#"<a class="{class}" href="/?phase={id}">Step {id}: {days} Days</a>"#,
                id = phase.id,
                days = phase.day_count,
            )
        })
        .collect();

    let days: String = active
        .day_keys()
        .map(|key| {
            let log = logs.get(&key);
            let completed = log.is_some_and(|log| log.completed);
            let mut marks = String::new();
            if log.is_some_and(|log| log.weight.is_some()) {
                marks.push_str(r#"<span class="dot" title="weight logged"></span>"#);
            }
            if log.is_some_and(|log| log.note.is_some()) {
                marks.push_str(r#"<span class="dot note" title="note"></span>"#);
            }
            format!(
                r#"<form method="post" action="/days/{phase}/{day}/toggle"><button class="day{done}">{day}{check}{marks}</button></form>"#,
                phase = key.phase_id(),
                day = key.day(),
                done = if completed { " done" } else { "" },
                check = if completed { " &#10003;" } else { "" },
            )
        })
        .collect();

    let tips: String = active
        .tips
        .iter()
        .map(|tip| format!("<li>{}</li>", escape(tip)))
        .collect();

    let weights: String = summary
        .weight_series
        .iter()
        .map(|point| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                point.label,
                point.weight,
                escape(point.note.as_deref().unwrap_or("")),
            )
        })
        .collect();

    let goal = summary
        .goal_weight
        .map_or_else(|| "Set Goal".to_string(), |goal| format!("Goal: {goal}"));
    let heading = if summary.journey_complete {
        "Protocol Completed!"
    } else {
        "Total Progress"
    };

    INDEX_HTML
        .replace("{{HEADING}}", heading)
        .replace("{{PROGRESS}}", &format!("{:.0}", summary.global_progress))
        .replace("{{COMPLETED}}", &summary.total_completed.to_string())
        .replace("{{TOTAL}}", &summary.total_days.to_string())
        .replace("{{TABS}}", &tabs)
        .replace("{{PHASE_NAME}}", &escape(&active.name))
        .replace("{{PHASE_DESCRIPTION}}", &escape(&active.description))
        .replace("{{DAYS}}", &days)
        .replace("{{TIPS}}", &tips)
        .replace("{{GOAL}}", &goal)
        .replace("{{WEIGHTS}}", &weights)
}

/// Escapes markup and template braces so user text is never re-expanded as
/// a `{{TOKEN}}`.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>JellyJourney</title>
  <style>
    body { margin: 0; font-family: "Trebuchet MS", sans-serif; background: #fff1f2; color: #3f3f46; }
    .app { max-width: 860px; margin: 0 auto; padding: 32px 18px; display: grid; gap: 24px; }
    .card { background: white; border-radius: 24px; padding: 24px; box-shadow: 0 12px 40px rgba(244, 63, 94, 0.12); }
    .bar { height: 28px; background: #e4e4e7; border-radius: 999px; overflow: hidden; }
    .bar span { display: block; height: 100%; background: #f43f5e; }
    .tabs { display: flex; gap: 8px; flex-wrap: wrap; }
    .tab { padding: 10px 16px; border-radius: 999px; background: white; color: #a1a1aa; text-decoration: none; }
    .tab.active { background: #f43f5e; color: white; }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(56px, 1fr)); gap: 8px; }
    .grid form { margin: 0; }
    .day { width: 100%; aspect-ratio: 1; border-radius: 16px; border: 2px solid #f4f4f5; background: #fafafa; cursor: pointer; }
    .day.done { border-color: #f43f5e; background: #ffe4e6; }
    .dot { display: inline-block; width: 6px; height: 6px; border-radius: 50%; background: #3b82f6; margin-left: 2px; }
    .dot.note { background: #f59e0b; }
    table { width: 100%; border-collapse: collapse; }
    td { padding: 6px 4px; border-bottom: 1px solid #f4f4f5; }
  </style>
</head>
<body>
  <main class="app">
    <section class="card">
      <h1>JellyJourney</h1>
      <p>{{HEADING}}: {{COMPLETED}} / {{TOTAL}} days</p>
      <div class="bar"><span style="width: {{PROGRESS}}%"></span></div>
      <p>{{PROGRESS}}% Completed</p>
    </section>
    <nav class="tabs">{{TABS}}</nav>
    <section class="card">
      <h2>{{PHASE_NAME}}</h2>
      <p>{{PHASE_DESCRIPTION}}</p>
      <div class="grid">{{DAYS}}</div>
      <ul>{{TIPS}}</ul>
    </section>
    <section class="card">
      <h2>Weight Trend <small>{{GOAL}}</small></h2>
      <table>{{WEIGHTS}}</table>
    </section>
  </main>
</body>
</html>
"#;

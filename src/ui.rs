use crate::models::{clock_time, Activity, ChecklistEntry, Operator};
use crate::stats::Summary;
use chrono::NaiveDate;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Info(String),
}

impl Notice {
    fn kind(&self) -> &'static str {
        match self {
            Notice::Success(_) => "success",
            Notice::Warning(_) => "warning",
            Notice::Info(_) => "info",
        }
    }

    fn text(&self) -> &str {
        match self {
            Notice::Success(text) | Notice::Warning(text) | Notice::Info(text) => text,
        }
    }
}

pub struct ChecklistPage<'a> {
    pub today: NaiveDate,
    pub form_date: NaiveDate,
    pub selected: Option<Operator>,
    pub notice: Option<Notice>,
    pub todays: &'a [ChecklistEntry],
    pub landing_page: bool,
}

pub struct DashboardPage<'a> {
    pub today: NaiveDate,
    pub summary: &'a Summary,
    pub pending: &'a [Operator],
    pub skipped: usize,
    pub landing_page: bool,
}

pub fn render_landing() -> String {
    page(
        "Daily Checklist",
        r#"<section class="hero">
      <h1>Welcome to the checklist system</h1>
      <h2>Warehouse dispatch</h2>
      <p class="subtitle">Daily dispatch control with quality and speed.</p>
      <a class="button" id="enter" href="/checklist">Enter the system</a>
    </section>"#,
    )
}

pub fn render_checklist(view: &ChecklistPage<'_>) -> String {
    let mut body = String::new();
    body.push_str(&nav(view.landing_page, "checklist"));
    body.push_str("<header><h1>Daily Checklist</h1>");
    let _ = write!(body, r#"<p class="subtitle">Today is {}</p></header>"#, view.today);

    if let Some(notice) = &view.notice {
        body.push_str(&notice_html(notice));
    }

    if let Some(operator) = view.selected {
        let submitted = view.todays.iter().any(|entry| entry.operator == operator);
        let banner = if submitted {
            Notice::Success(format!("{operator}, your checklist is already registered today."))
        } else {
            Notice::Warning(format!("{operator}, you have not filled in your checklist today."))
        };
        body.push_str(&notice_html(&banner));
    }

    body.push_str(r#"<form class="card" id="checklist-form" method="post" action="/checklist">"#);
    let _ = write!(
        body,
        r#"<label>Date <input type="date" name="date" id="date" value="{}" /></label>"#,
        view.form_date
    );

    body.push_str(r#"<label>Operator <select name="operator" id="operator"><option value="">Select your name</option>"#);
    for operator in Operator::ROSTER {
        let selected = if view.selected == Some(operator) { " selected" } else { "" };
        let _ = write!(
            body,
            r#"<option value="{name}"{selected}>{name}</option>"#,
            name = escape(operator.name())
        );
    }
    body.push_str("</select></label>");

    body.push_str(r#"<fieldset><legend>Activities of the day</legend>"#);
    for (idx, activity) in Activity::ALL.into_iter().enumerate() {
        let _ = write!(
            body,
            r#"<label class="check"><input type="checkbox" id="activity-{idx}" name="activity" value="{name}" /> {name}</label>"#,
            name = escape(activity.name())
        );
    }
    body.push_str("</fieldset>");
    body.push_str(r#"<label>Notes <textarea name="note" id="note" rows="3"></textarea></label>"#);
    body.push_str(r#"<button type="submit" id="save">Save checklist</button></form>"#);

    body.push_str(r#"<section class="card"><h2>Checklists registered today</h2>"#);
    if view.todays.is_empty() {
        body.push_str(&notice_html(&Notice::Info("No checklist filled in today.".to_string())));
    } else {
        body.push_str(&entries_table(view.todays));
    }
    body.push_str("</section>");
    body.push_str(OPERATOR_SCRIPT);

    page("Daily Checklist", &body)
}

pub fn render_dashboard(view: &DashboardPage<'_>) -> String {
    let summary = view.summary;
    let mut body = String::new();
    body.push_str(&nav(view.landing_page, "dashboard"));
    body.push_str("<header><h1>Performance Dashboard</h1>");
    let _ = write!(body, r#"<p class="subtitle">Submissions for {}</p></header>"#, view.today);

    if view.skipped > 0 {
        body.push_str(&notice_html(&Notice::Warning(format!(
            "{} malformed row(s) in the record store were skipped.",
            view.skipped
        ))));
    }

    let _ = write!(
        body,
        r#"<section class="panel">
      <div class="stat"><span class="label">Activities completed</span><span class="value" id="total">{}</span></div>
      <div class="stat"><span class="label">Operators submitted</span><span class="value" id="submitted">{}</span></div>
      <div class="stat"><span class="label">Operators pending</span><span class="value net" id="pending-count">{}</span></div>
    </section>"#,
        summary.total_entries,
        summary.operators_submitted,
        view.pending.len()
    );

    body.push_str(r#"<section class="card" id="pending"><h2>Pending operators</h2>"#);
    if view.pending.is_empty() {
        body.push_str(&notice_html(&Notice::Success("Everyone has submitted today.".to_string())));
    } else {
        body.push_str("<ul>");
        for operator in view.pending {
            let _ = write!(body, "<li>{}</li>", escape(operator.name()));
        }
        body.push_str("</ul>");
    }
    body.push_str("</section>");

    if summary.total_entries == 0 {
        body.push_str(&notice_html(&Notice::Info("No checklist filled in today.".to_string())));
        return page("Dashboard", &body);
    }

    let by_operator: Vec<(String, u64)> = summary
        .by_operator
        .iter()
        .map(|item| (item.operator.to_string(), item.count))
        .collect();
    let by_activity: Vec<(String, u64)> = summary
        .by_activity
        .iter()
        .map(|item| (item.activity.to_string(), item.count))
        .collect();
    let by_hour: Vec<(String, u64)> = summary
        .by_hour
        .iter()
        .map(|item| (format!("{:02}h", item.hour), item.count))
        .collect();

    body.push_str(r#"<section class="charts">"#);
    body.push_str(&bar_chart("by-operator", "Activities per operator", &by_operator));
    body.push_str(&bar_chart("by-activity", "Most performed activities", &by_activity));
    body.push_str("</section>");
    body.push_str(&bar_chart("by-hour", "Busiest hours", &by_hour));

    body.push_str(r#"<section class="card" id="ranking"><h2>Operator ranking</h2><ol class="ranking">"#);
    for item in &summary.ranking {
        let _ = write!(
            body,
            "<li>{} {}º - {}: {} activities completed</li>",
            item.medal.symbol(),
            item.rank,
            escape(item.operator.name()),
            item.count
        );
    }
    body.push_str("</ol></section>");

    page("Dashboard", &body)
}

fn bar_chart(id: &str, title: &str, rows: &[(String, u64)]) -> String {
    let max = rows.iter().map(|(_, count)| *count).max().unwrap_or(0).max(1);
    let mut html = String::new();
    let _ = write!(html, r#"<div class="card chart" id="{id}"><h3>{}</h3>"#, escape(title));
    for (label, count) in rows {
        let width = (*count as f64 / max as f64) * 100.0;
        let _ = write!(
            html,
            r#"<div class="bar-row"><span class="bar-label">{}</span><span class="bar" style="width: {width:.1}%"></span><span class="bar-value">{count}</span></div>"#,
            escape(label)
        );
    }
    html.push_str("</div>");
    html
}

fn entries_table(entries: &[ChecklistEntry]) -> String {
    let mut html = String::from(
        "<table><thead><tr><th>Date</th><th>Time</th><th>Operator</th><th>Activity</th><th>Status</th><th>Note</th></tr></thead><tbody>",
    );
    for entry in entries {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            entry.date,
            entry.time.format(clock_time::FORMAT),
            escape(entry.operator.name()),
            escape(entry.activity.name()),
            entry.status,
            escape(&entry.note)
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn notice_html(notice: &Notice) -> String {
    format!(
        r#"<div class="notice" data-type="{}">{}</div>"#,
        notice.kind(),
        escape(notice.text())
    )
}

fn nav(landing_page: bool, active: &str) -> String {
    let mut html = String::from(r#"<nav>"#);
    if landing_page {
        html.push_str(r#"<a href="/" id="back">Back</a>"#);
    }
    for (href, key, label) in [
        ("/checklist", "checklist", "Checklist"),
        ("/dashboard", "dashboard", "Dashboards"),
    ] {
        let class = if key == active { r#" class="active""# } else { "" };
        let _ = write!(html, r#"<a href="{href}"{class}>{label}</a>"#);
    }
    html.push_str("</nav>");
    html
}

fn page(title: &str, body: &str) -> String {
    PAGE_HTML
        .replace("{{TITLE}}", &escape(title))
        .replace("{{BODY}}", body)
}

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const OPERATOR_SCRIPT: &str = r#"<script>
    const operatorEl = document.getElementById('operator');
    const dateEl = document.getElementById('date');
    operatorEl.addEventListener('change', () => {
      const params = new URLSearchParams();
      if (operatorEl.value) {
        params.set('operator', operatorEl.value);
      }
      if (dateEl.value) {
        params.set('date', dateEl.value);
      }
      window.location.search = params.toString();
    });
  </script>"#;

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg-1: #ffffff;
      --ink: #2b2a28;
      --accent: #ff0000;
      --accent-2: #4b0082;
      --card: rgba(255, 255, 255, 0.92);
      --shadow: 0 24px 60px rgba(75, 0, 130, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg-1);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    main {
      width: min(960px, 100%);
      display: grid;
      gap: 24px;
    }

    h1, h2, h3 {
      color: var(--accent-2);
      text-align: center;
      margin: 0;
    }

    .subtitle {
      margin: 4px 0 0;
      color: #5f5c57;
      text-align: center;
    }

    nav {
      display: flex;
      gap: 12px;
    }

    nav a {
      color: var(--accent-2);
      font-weight: 600;
      text-decoration: none;
      padding: 8px 14px;
      border-radius: 10px;
    }

    nav a.active {
      background: var(--accent-2);
      color: white;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      box-shadow: var(--shadow);
      padding: 20px;
      display: grid;
      gap: 12px;
    }

    .panel, .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(75, 0, 130, 0.1);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .stat .value.net {
      color: var(--accent);
    }

    button, .button {
      background-color: var(--accent);
      color: white;
      font-weight: bold;
      border: none;
      border-radius: 10px;
      padding: 14px;
      font-size: 1.1rem;
      cursor: pointer;
      text-align: center;
      text-decoration: none;
    }

    button:hover, .button:hover {
      color: var(--accent-2);
    }

    label {
      display: grid;
      gap: 6px;
    }

    label.check {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .notice {
      border-radius: 12px;
      padding: 12px 16px;
    }

    .notice[data-type="success"] {
      background: #e6f6ea;
      color: #1f6b35;
    }

    .notice[data-type="warning"] {
      background: #fff4d6;
      color: #7a5300;
    }

    .notice[data-type="info"] {
      background: #e8eef8;
      color: #2f4858;
    }

    .bar-row {
      display: grid;
      grid-template-columns: 180px 1fr 40px;
      align-items: center;
      gap: 8px;
    }

    .bar {
      display: block;
      height: 18px;
      border-radius: 6px;
      background: var(--accent-2);
      min-width: 2px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
    }

    th, td {
      text-align: left;
      padding: 6px 8px;
      border-bottom: 1px solid rgba(75, 0, 130, 0.1);
    }

    .hero {
      display: grid;
      gap: 16px;
      justify-items: center;
      padding-top: 80px;
    }
  </style>
</head>
<body>
  <main>
    {{BODY}}
  </main>
</body>
</html>
"#;

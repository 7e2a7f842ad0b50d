use crate::errors::{AppError, SubmitError};
use crate::models::{
    Activity, Operator, PendingResponse, RosterResponse, SubmitRequest, SubmitResponse,
    TodayResponse,
};
use crate::pending::pending_operators;
use crate::state::AppState;
use crate::stats::{aggregate, Summary};
use crate::submission::{parse_date, Submission};
use crate::ui::{
    render_checklist, render_dashboard, render_landing, ChecklistPage, DashboardPage, Notice,
};
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct ChecklistQuery {
    pub operator: Option<String>,
    pub date: Option<String>,
}

pub async fn index(State(state): State<AppState>) -> Response {
    if state.landing_page {
        Html(render_landing()).into_response()
    } else {
        Redirect::to("/checklist").into_response()
    }
}

pub async fn checklist_page(
    State(state): State<AppState>,
    Query(query): Query<ChecklistQuery>,
) -> Result<Html<String>, AppError> {
    let today = state.load_today().await?;
    let selected = query.operator.as_deref().and_then(|name| name.parse::<Operator>().ok());
    let form_date = query
        .date
        .as_deref()
        .and_then(|raw| parse_date(raw, today.date).ok())
        .unwrap_or(today.date);

    Ok(Html(render_checklist(&ChecklistPage {
        today: today.date,
        form_date,
        selected,
        notice: None,
        todays: &today.entries,
        landing_page: state.landing_page,
    })))
}

/// Browser form post. Checkboxes arrive as repeated `activity` fields, so the
/// body is read as raw pairs.
pub async fn checklist_submit(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, AppError> {
    let mut operator = String::new();
    let mut raw_date = String::new();
    let mut note = String::new();
    let mut activities = Vec::new();
    for (key, value) in fields {
        match key.as_str() {
            "operator" => operator = value,
            "date" => raw_date = value,
            "note" => note = value,
            "activity" => activities.push(value),
            _ => {}
        }
    }

    let today = crate::daily::today();
    let outcome = match parse_date(&raw_date, today) {
        Ok(date) => {
            state
                .submit(Submission {
                    operator: operator.clone(),
                    activities,
                    note,
                    date,
                })
                .await
        }
        Err(err) => Err(SubmitError::Validation(err)),
    };

    let notice = match outcome {
        Ok(_) => Notice::Success("Checklist saved successfully!".to_string()),
        Err(SubmitError::Validation(err)) => Notice::Warning(err.to_string()),
        Err(SubmitError::Store(err)) => return Err(err.into()),
    };

    let view = state.load_today().await?;
    let form_date = parse_date(&raw_date, view.date).unwrap_or(view.date);
    Ok(Html(render_checklist(&ChecklistPage {
        today: view.date,
        form_date,
        selected: operator.parse::<Operator>().ok(),
        notice: Some(notice),
        todays: &view.entries,
        landing_page: state.landing_page,
    })))
}

pub async fn dashboard_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let today = state.load_today().await?;
    let summary = aggregate(&today.entries);
    let pending = pending_operators(&today.entries);

    Ok(Html(render_dashboard(&DashboardPage {
        today: today.date,
        summary: &summary,
        pending: &pending,
        skipped: today.skipped,
        landing_page: state.landing_page,
    })))
}

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let today = state.load_today().await?;
    Ok(Json(TodayResponse {
        date: today.date,
        entries: today.entries,
    }))
}

pub async fn submit(
    State(state): State<AppState>,
    Json(payload): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let date = payload.date.unwrap_or_else(crate::daily::today);
    let entries = state
        .submit(Submission {
            operator: payload.operator,
            activities: payload.activities,
            note: payload.note,
            date,
        })
        .await?;

    Ok(Json(SubmitResponse {
        message: "checklist saved".to_string(),
        entries,
    }))
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<Summary>, AppError> {
    let today = state.load_today().await?;
    Ok(Json(aggregate(&today.entries)))
}

pub async fn get_pending(State(state): State<AppState>) -> Result<Json<PendingResponse>, AppError> {
    let today = state.load_today().await?;
    let pending = pending_operators(&today.entries);
    Ok(Json(PendingResponse {
        date: today.date,
        all_submitted: pending.is_empty(),
        pending,
    }))
}

pub async fn get_roster() -> Json<RosterResponse> {
    Json(RosterResponse {
        operators: Operator::ROSTER.to_vec(),
        activities: Activity::ALL.to_vec(),
    })
}

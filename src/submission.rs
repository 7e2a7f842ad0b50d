use crate::errors::{SubmitError, ValidationError};
use crate::models::{Activity, ChecklistEntry, Operator, Status};
use crate::store::RecordStore;
use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use tracing::{info, warn};

/// A checklist as it arrives from a form or the API, before validation.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub operator: String,
    pub activities: Vec<String>,
    pub note: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub operator: Operator,
    /// Deduplicated, in checklist order.
    pub activities: Vec<Activity>,
    pub note: String,
    pub date: NaiveDate,
}

impl Submission {
    pub fn validate(self) -> Result<ValidSubmission, ValidationError> {
        let operator = self.operator.trim();
        if operator.is_empty() {
            return Err(ValidationError::MissingOperator);
        }
        let operator: Operator = operator
            .parse()
            .map_err(|_| ValidationError::UnknownOperator(operator.to_string()))?;

        let mut selected = Vec::with_capacity(self.activities.len());
        for raw in self.activities.iter().map(|a| a.trim()).filter(|a| !a.is_empty()) {
            let activity: Activity = raw
                .parse()
                .map_err(|_| ValidationError::UnknownActivity(raw.to_string()))?;
            selected.push(activity);
        }
        if selected.is_empty() {
            return Err(ValidationError::NoActivities);
        }
        selected.sort();
        selected.dedup();

        Ok(ValidSubmission {
            operator,
            activities: selected,
            note: self.note.trim().to_string(),
            date: self.date,
        })
    }
}

impl ValidSubmission {
    /// One row per activity, all sharing date, time, operator and note.
    pub fn into_entries(self, time: NaiveTime) -> Vec<ChecklistEntry> {
        self.activities
            .into_iter()
            .map(|activity| ChecklistEntry {
                date: self.date,
                time,
                operator: self.operator,
                activity,
                status: Status::Completed,
                note: self.note.clone(),
            })
            .collect()
    }
}

/// Validates `submission` and appends its rows to `store` in one write.
pub fn submit(
    store: &RecordStore,
    submission: Submission,
    time: NaiveTime,
) -> Result<Vec<ChecklistEntry>, SubmitError> {
    let valid = submission.validate().inspect_err(|err| {
        warn!("rejected checklist submission: {err}");
    })?;
    let operator = valid.operator;
    let date = valid.date;

    let entries = valid.into_entries(time);
    store.append(&entries)?;

    info!(%operator, %date, rows = entries.len(), "checklist saved");
    Ok(entries)
}

/// Wall-clock time of day, truncated to whole seconds.
pub fn capture_time() -> NaiveTime {
    let now = Local::now().time();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Parses an ISO date from a form field; blank means `fallback`.
pub fn parse_date(raw: &str, fallback: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(fallback);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

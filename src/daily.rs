use crate::models::{ChecklistEntry, Operator};
use chrono::{Local, NaiveDate};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn filter_today(entries: &[ChecklistEntry], today: NaiveDate) -> Vec<ChecklistEntry> {
    entries
        .iter()
        .filter(|entry| entry.date == today)
        .cloned()
        .collect()
}

pub fn filter_by_operator(entries: &[ChecklistEntry], operator: Operator) -> Vec<ChecklistEntry> {
    entries
        .iter()
        .filter(|entry| entry.operator == operator)
        .cloned()
        .collect()
}

/// An operator counts as submitted once any row of theirs exists in `entries`.
pub fn has_submitted(entries: &[ChecklistEntry], operator: Operator) -> bool {
    entries.iter().any(|entry| entry.operator == operator)
}

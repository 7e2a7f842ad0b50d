use crate::config::AppConfig;
use crate::daily::{filter_today, today};
use crate::errors::{StoreError, SubmitError};
use crate::models::ChecklistEntry;
use crate::store::{LoadReport, RecordStore};
use crate::submission::{capture_time, submit, Submission};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub landing_page: bool,
    write_lock: Arc<Mutex<()>>,
}

/// Today's rows plus how many malformed rows the store skipped.
#[derive(Debug, Clone)]
pub struct TodayView {
    pub date: NaiveDate,
    pub entries: Vec<ChecklistEntry>,
    pub skipped: usize,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(RecordStore::new(config.data_path.clone())),
            landing_page: config.landing_page,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn load_today(&self) -> Result<TodayView, StoreError> {
        let date = today();
        let store = Arc::clone(&self.store);
        let report: LoadReport = task::spawn_blocking(move || store.load_report()).await??;
        Ok(TodayView {
            date,
            entries: filter_today(&report.entries, date),
            skipped: report.skipped,
        })
    }

    pub async fn submit(&self, submission: Submission) -> Result<Vec<ChecklistEntry>, SubmitError> {
        let _guard = self.write_lock.lock().await;
        let store = Arc::clone(&self.store);
        let time = capture_time();
        task::spawn_blocking(move || submit(&store, submission, time))
            .await
            .map_err(StoreError::from)?
    }
}

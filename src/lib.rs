pub mod app;
pub mod config;
pub mod daily;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod pending;
pub mod state;
pub mod stats;
pub mod store;
pub mod submission;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use store::RecordStore;

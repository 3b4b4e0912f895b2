pub mod app;
pub mod config;
pub mod errors;
pub mod goal;
pub mod handlers;
pub mod logs;
pub mod milestone;
pub mod models;
pub mod motivation;
pub mod mutations;
pub mod phases;
pub mod state;
pub mod stats;
pub mod storage;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use milestone::{Milestone, detect};
pub use phases::PhaseCatalog;
pub use state::AppState;
pub use storage::load_data;

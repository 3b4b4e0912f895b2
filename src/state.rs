use crate::models::AppData;
use crate::motivation::MotivationClient;
use crate::phases::PhaseCatalog;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Session context handed to every route: the catalog, the single mutable
/// snapshot of logs and goal, and where it is persisted.
#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub catalog: Arc<PhaseCatalog>,
    pub data: Arc<Mutex<AppData>>,
    pub motivation: MotivationClient,
}

impl AppState {
    pub fn new(
        data_dir: PathBuf,
        catalog: PhaseCatalog,
        data: AppData,
        motivation: MotivationClient,
    ) -> Self {
        Self {
            data_dir,
            catalog: Arc::new(catalog),
            data: Arc::new(Mutex::new(data)),
            motivation,
        }
    }
}

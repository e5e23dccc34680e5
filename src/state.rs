use crate::clock::{Clock, SystemClock};
use crate::models::AppData;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub clock: Arc<dyn Clock + Send + Sync>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData) -> Self {
        Self::with_clock(data_path, data, Arc::new(SystemClock))
    }

    pub fn with_clock(
        data_path: PathBuf,
        data: AppData,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            clock,
        }
    }
}

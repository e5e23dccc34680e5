use crate::errors::AppError;
use crate::models::AppData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error, info};

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/records.json"))
}

/// Reads the record store; an unreadable store starts empty rather than
/// blocking startup.
pub async fn load_data(path: &Path) -> AppData {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no record store yet, starting empty");
            return AppData::default();
        }
        Err(err) => {
            error!(path = %path.display(), "cannot read record store: {err}");
            return AppData::default();
        }
    };

    match serde_json::from_slice::<AppData>(&bytes) {
        Ok(data) => {
            for (dataset, records) in &data.datasets {
                debug!(dataset = %dataset, records = records.len(), "dataset loaded");
            }
            data
        }
        Err(err) => {
            error!(path = %path.display(), "record store is not valid dataset JSON: {err}");
            AppData::default()
        }
    }
}

/// Writes the whole store next to `path` first, then swaps it in, so a
/// failed write never truncates the existing datasets.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let staging = staging_path(path);
    fs::write(&staging, payload).await?;
    fs::rename(&staging, path).await?;
    debug!(
        path = %path.display(),
        datasets = data.datasets.len(),
        records = data.record_count(),
        "record store saved"
    );
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        let pid = std::process::id();
        path.push(format!("barangay_dashboard_{tag}_{pid}_{nanos}.json"));
        path
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let data = load_data(&temp_path("missing")).await;
        assert!(data.datasets.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_loads_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, b"{ not json").await.unwrap();
        let data = load_data(&path).await;
        assert!(data.datasets.is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn persisted_records_load_back() {
        let path = temp_path("persist");
        let mut data = AppData::default();
        let record = json!({ "date": "2025-03-05", "type": "Flood" });
        data.datasets
            .entry("incidents".to_string())
            .or_default()
            .push(record.as_object().unwrap().clone());

        persist_data(&path, &data).await.unwrap();
        let loaded = load_data(&path).await;
        assert_eq!(loaded.records("incidents").len(), 1);
        assert_eq!(loaded.records("incidents")[0]["type"], "Flood");
        assert!(loaded.records("residents").is_empty());
        assert!(fs::metadata(staging_path(&path)).await.is_err());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn second_save_replaces_first() {
        let path = temp_path("replace");
        let mut data = AppData::default();
        let record = json!({ "date": "2024-02-29", "asset": "Tent" });
        let rentals = data.datasets.entry("rentals".to_string()).or_default();
        rentals.push(record.as_object().unwrap().clone());
        persist_data(&path, &data).await.unwrap();

        data.datasets.get_mut("rentals").unwrap().clear();
        persist_data(&path, &data).await.unwrap();

        let loaded = load_data(&path).await;
        assert!(loaded.records("rentals").is_empty());
        assert_eq!(loaded.record_count(), 0);
        let _ = fs::remove_file(&path).await;
    }

    #[test]
    fn staging_file_sits_beside_store() {
        let staged = staging_path(Path::new("data/records.json"));
        assert_eq!(staged, PathBuf::from("data/records.json.tmp"));
    }
}

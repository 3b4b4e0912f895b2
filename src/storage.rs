use crate::errors::AppError;
use crate::goal::GoalWeight;
use crate::logs::LogSet;
use crate::models::AppData;
use crate::phases::PhaseCatalog;
use std::path::Path;
use tokio::fs;
use tracing::{error, warn};

/// Blob holding the serialized [`LogSet`].
pub const LOGS_KEY: &str = "logs.json";
/// Blob holding the goal weight as plain decimal text.
pub const GOAL_KEY: &str = "goal.txt";

/// Loads both blobs from `dir`. A missing or corrupt blob starts empty
/// rather than failing startup.
pub async fn load_data(dir: &Path, catalog: &PhaseCatalog) -> AppData {
    let mut logs = match read_blob(dir, LOGS_KEY).await {
        Some(bytes) => match serde_json::from_slice::<LogSet>(&bytes) {
            Ok(logs) => logs,
            Err(err) => {
                error!("failed to parse {LOGS_KEY}: {err}");
                LogSet::default()
            }
        },
        None => LogSet::default(),
    };

    let dropped = logs.retain_catalog(catalog);
    if !dropped.is_empty() {
        warn!(count = dropped.len(), "dropped logs for days outside the phase catalog");
    }

    let goal = read_blob(dir, GOAL_KEY)
        .await
        .map(|bytes| GoalWeight::from_blob(&String::from_utf8_lossy(&bytes)))
        .unwrap_or_default();

    AppData { logs, goal }
}

async fn read_blob(dir: &Path, key: &str) -> Option<Vec<u8>> {
    match fs::read(dir.join(key)).await {
        Ok(bytes) => Some(bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!("failed to read {key}: {err}");
            None
        }
    }
}

pub async fn persist_logs(dir: &Path, logs: &LogSet) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(logs).map_err(AppError::internal)?;
    fs::write(dir.join(LOGS_KEY), payload).await?;
    Ok(())
}

/// Writes the goal, or removes its blob when the goal is unset.
pub async fn persist_goal(dir: &Path, goal: GoalWeight) -> Result<(), AppError> {
    let path = dir.join(GOAL_KEY);
    match goal.to_blob() {
        Some(blob) => fs::write(path, blob).await?,
        None => match fs::remove_file(path).await {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phases::test_catalog;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("jelly_storage_{name}_{}_{nanos}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    #[tokio::test]
    async fn missing_blobs_load_empty() {
        let dir = scratch_dir("missing");
        let data = load_data(&dir, &test_catalog(&[2])).await;
        assert_eq!(data, AppData::default());
    }

    #[tokio::test]
    async fn corrupt_blobs_load_empty() {
        let dir = scratch_dir("corrupt");
        std::fs::write(dir.join(LOGS_KEY), b"{not json").unwrap();
        std::fs::write(dir.join(GOAL_KEY), b"lots").unwrap();
        let data = load_data(&dir, &test_catalog(&[2])).await;
        assert!(data.logs.is_empty());
        assert!(!data.goal.is_set());
    }

    #[tokio::test]
    async fn persisted_state_loads_back() {
        let dir = scratch_dir("roundtrip");
        let catalog = test_catalog(&[2, 2]);
        let key = catalog.day_key(2, 1).unwrap();
        let (logs, _) = crate::mutations::save_day(&catalog, &LogSet::default(), key, "70.2", "hi");
        let goal = GoalWeight::new(65.0).unwrap();

        persist_logs(&dir, &logs).await.unwrap();
        persist_goal(&dir, goal).await.unwrap();

        let raw = std::fs::read_to_string(dir.join(LOGS_KEY)).unwrap();
        assert!(raw.contains("\"2-1\""));
        assert_eq!(std::fs::read_to_string(dir.join(GOAL_KEY)).unwrap(), "65");

        let data = load_data(&dir, &catalog).await;
        assert_eq!(data.logs, logs);
        assert_eq!(data.goal, goal);
    }

    #[tokio::test]
    async fn clearing_goal_removes_blob() {
        let dir = scratch_dir("goal");
        persist_goal(&dir, GoalWeight::new(60.0).unwrap()).await.unwrap();
        persist_goal(&dir, GoalWeight::default()).await.unwrap();
        assert!(!dir.join(GOAL_KEY).exists());
        persist_goal(&dir, GoalWeight::default()).await.unwrap();
    }

    #[tokio::test]
    async fn load_drops_keys_outside_catalog() {
        let dir = scratch_dir("unknown_keys");
        std::fs::write(
            dir.join(LOGS_KEY),
            br#"{"1-1":{"completed":true},"9-9":{"completed":true}}"#,
        )
        .unwrap();
        let data = load_data(&dir, &test_catalog(&[2])).await;
        assert_eq!(data.logs.len(), 1);
    }
}

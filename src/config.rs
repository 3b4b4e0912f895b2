use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_MOTIVATION_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MOTIVATION_TIMEOUT_MS: u64 = 4000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub phases_path: Option<PathBuf>,
    pub motivation: MotivationConfig,
}

#[derive(Debug, Clone)]
pub struct MotivationConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_dir = env::var("APP_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        let phases_path = non_empty_var("APP_PHASES_PATH").map(PathBuf::from);

        let timeout_ms = env::var("MOTIVATION_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_MOTIVATION_TIMEOUT_MS);

        Self {
            port,
            data_dir,
            phases_path,
            motivation: MotivationConfig {
                api_key: non_empty_var("GEMINI_API_KEY"),
                base_url: non_empty_var("MOTIVATION_API_URL")
                    .unwrap_or_else(|| DEFAULT_MOTIVATION_URL.to_string()),
                timeout: Duration::from_millis(timeout_ms),
            },
        }
    }
}

impl Default for MotivationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_MOTIVATION_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_MOTIVATION_TIMEOUT_MS),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

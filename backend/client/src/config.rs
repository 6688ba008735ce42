use std::{env, path::PathBuf};

use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const APP_DIR: &str = "rasoi";

pub struct Config {
    pub api_url: String,
    pub data_dir: PathBuf,
}

impl Config {
    /// Flags win over the environment, the environment over defaults.
    pub fn load(api_url: Option<String>, data_dir: Option<PathBuf>) -> Self {
        Self {
            api_url: api_url.unwrap_or_else(|| try_load("RASOI_API_URL", DEFAULT_API_URL)),
            data_dir: data_dir
                .or_else(|| var("RASOI_DATA_DIR").map(PathBuf::from))
                .unwrap_or_else(default_data_dir),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn try_load(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn default_data_dir() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join(APP_DIR),
        None => {
            warn!("No platform data directory, storing in ./.{APP_DIR}");
            PathBuf::from(format!(".{APP_DIR}"))
        }
    }
}

use std::env;
use std::path::PathBuf;

/// Environment variable the FoodData Central key is read from.
pub const API_KEY_ENV_VAR: &str = "USDA_API_KEY";

const DEFAULT_USER_DB_PATH: &str = "user_db.json";
const DEFAULT_PAGE_SIZE: u32 = 100;
const DEFAULT_TOP_N: usize = 20;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_key_env_var: String,
    pub user_db_path: PathBuf,
    pub page_size: u32,
    pub top_n: usize,
    pub telemetry: TelemetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key_env_var: API_KEY_ENV_VAR.to_string(),
            user_db_path: PathBuf::from(DEFAULT_USER_DB_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            top_n: DEFAULT_TOP_N,
            telemetry: TelemetryConfig {
                log_level: DEFAULT_LOG_LEVEL.to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Reads `.env` and the process environment. Unparsable numbers fall back to defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_key_env_var: defaults.api_key_env_var,
            user_db_path: lookup("USER_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.user_db_path),
            page_size: lookup("FOOD_SEARCH_PAGE_SIZE")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(defaults.page_size),
            top_n: lookup("RANK_TOP_N")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(defaults.top_n),
            telemetry: TelemetryConfig {
                log_level: lookup("LOG_LEVEL").unwrap_or(defaults.telemetry.log_level),
            },
        }
    }
}

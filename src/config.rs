use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    pub state_file: PathBuf,
    pub console_capacity: usize,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: std::env::var("GALLERY_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            http_timeout_secs: std::env::var("GALLERY_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            state_file: std::env::var("GALLERY_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("gallery-state.json")),
            console_capacity: std::env::var("GALLERY_CONSOLE_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(500),
            log_json: std::env::var("GALLERY_LOG_JSON")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err("GALLERY_API_BASE_URL must start with http:// or https://".to_string());
        }

        if self.http_timeout_secs == 0 {
            return Err("GALLERY_HTTP_TIMEOUT_SECS must be at least 1 second".to_string());
        }

        if self.console_capacity < 1 || self.console_capacity > 10_000 {
            return Err("GALLERY_CONSOLE_CAPACITY must be between 1 and 10000".to_string());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            http_timeout_secs: 30,
            state_file: PathBuf::from("gallery-state.json"),
            console_capacity: 500,
            log_json: false,
        }
    }
}

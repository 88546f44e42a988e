use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    pub services: ServicesConfig,
    pub tracking: TrackingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base path of the garage API, e.g. "http://127.0.0.1:5000/api"
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub title: String,
    /// Pause between a confirmed booking and the switch to the tracker
    pub handoff_delay_ms: u64,
    /// Pause between a successful login and the dashboard
    pub login_delay_ms: u64,
    pub tick_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Pit Stop Garage".to_string(),
            handoff_delay_ms: 2000,
            login_delay_ms: 1500,
            tick_ms: 250,
        }
    }
}

impl UiConfig {
    pub fn handoff_delay(&self) -> Duration {
        Duration::from_millis(self.handoff_delay_ms)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub available: Vec<String>,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            available: vec![
                "Oil Change".to_string(),
                "Tire Rotation".to_string(),
                "Brake Inspection".to_string(),
                "Engine Diagnostics".to_string(),
                "Air Conditioning Service".to_string(),
                "Full Service".to_string(),
            ],
        }
    }
}

/// Ordered repair lifecycle. The tracker consumes this list positionally; the
/// set itself is owned by the service side and must match what the API emits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub stages: Vec<String>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            stages: vec![
                "Booking Confirmed".to_string(),
                "Awaiting Drop-off".to_string(),
                "Vehicle Received".to_string(),
                "Inspection & Estimate".to_string(),
                "Awaiting Parts".to_string(),
                "In Progress".to_string(),
                "Quality Check".to_string(),
                "Completed".to_string(),
            ],
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pitstop").join("config.toml"))
    }

    /// Load from the user config dir, falling back to defaults when absent.
    pub fn load() -> Result<Self, crate::error::PitstopError> {
        match Self::default_path() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, crate::error::PitstopError> {
        let path = path.as_ref();

        if !path.exists() {
            info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from("/nonexistent/pitstop.toml").unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.tracking.stages.len(), 8);
    }

    #[test]
    fn partial_file_keeps_section_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "https://garage.example/api"

[tracking]
stages = ["Received", "In Progress", "Ready", "Completed"]
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://garage.example/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.tracking.stages.len(), 4);
        assert_eq!(config.ui.handoff_delay_ms, 2000);
        assert!(!config.services.available.is_empty());
    }

    #[test]
    fn bad_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = nope").unwrap();
        assert!(AppConfig::load_from(file.path()).is_err());
    }
}

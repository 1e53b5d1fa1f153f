use crate::broker::MAX_CHANNEL_CAPACITY;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;
use tokio::time::Duration;

const DEFAULT_RELAUNCH_DELAY: Duration = Duration::from_secs(2);

const DEFAULT_LINKS: [&str; 5] = [
    "https://google.com",
    "https://facebook.com",
    "https://stackoverflow.com",
    "https://golang.org",
    "https://amazon.com",
];

// Parses a duration string (e.g., "5s", "1m") into a `tokio::time::Duration`.
fn parse_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(&s).map_err(serde::de::Error::custom)
}

fn parse_optional_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    parse_duration(deserializer).map(Some)
}

/// Configuration specific to the reporters.
/// Corresponds to the [reporter] section in the TOML config file.
#[derive(Debug, Deserialize, Clone)]
pub struct ReporterConfig {
    // Whether to print probe results to standard output.
    #[serde(default = "ReporterConfig::default_enable_stdout")]
    pub enable_stdout: bool,
}

impl ReporterConfig {
    fn default_enable_stdout() -> bool {
        true
    }
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            enable_stdout: Self::default_enable_stdout(),
        }
    }
}

/// Application configuration, loaded from a TOML file or left at defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    // Wait between a link reporting back and its next probe.
    #[serde(
        default = "Config::default_relaunch_delay",
        deserialize_with = "parse_duration"
    )]
    pub relaunch_delay: Duration,

    // Bound of the completion channel.
    #[serde(default = "Config::default_channel_capacity")]
    pub channel_capacity: usize,

    // Client-side request timeout. Unset means the HTTP client decides.
    #[serde(default, deserialize_with = "parse_optional_duration")]
    pub request_timeout: Option<Duration>,

    #[serde(default = "Config::default_links")]
    pub links: Vec<String>,

    #[serde(default)]
    pub reporter: ReporterConfig,
}

impl Config {
    pub fn new(config_path: &Path) -> Result<Self> {
        let config = Self::load_from_file(config_path)?;
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)?;
        toml::from_str::<Config>(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_capacity == 0 {
            bail!("channel_capacity must be at least 1");
        }
        if self.channel_capacity > MAX_CHANNEL_CAPACITY {
            bail!(
                "channel_capacity must be at most {}, got {}",
                MAX_CHANNEL_CAPACITY,
                self.channel_capacity
            );
        }
        if self.links.is_empty() {
            bail!("links must not be empty");
        }
        if let Some(link) = self.links.iter().find(|link| link.trim().is_empty()) {
            bail!("links must not contain blank entries, got {:?}", link);
        }
        Ok(())
    }

    fn default_relaunch_delay() -> Duration {
        DEFAULT_RELAUNCH_DELAY
    }

    fn default_channel_capacity() -> usize {
        1
    }

    fn default_links() -> Vec<String> {
        DEFAULT_LINKS.iter().map(|link| link.to_string()).collect()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relaunch_delay: Self::default_relaunch_delay(),
            channel_capacity: Self::default_channel_capacity(),
            request_timeout: None,
            links: Self::default_links(),
            reporter: ReporterConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    // Helper function to create a temporary config file with given content.
    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
relaunch_delay = "5s"
channel_capacity = 4
request_timeout = "500ms"
links = ["https://a.test", "https://b.test"]

[reporter]
enable_stdout = false
"#;
        let temp_file = create_temp_config(config_content);

        let config = Config::new(temp_file.path()).unwrap();

        assert_eq!(config.relaunch_delay, Duration::from_secs(5));
        assert_eq!(config.channel_capacity, 4);
        assert_eq!(config.request_timeout, Some(Duration::from_millis(500)));
        assert_eq!(config.links, vec!["https://a.test", "https://b.test"]);
        assert!(!config.reporter.enable_stdout);
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let temp_file = create_temp_config("");

        let config = Config::new(temp_file.path()).unwrap();

        assert_eq!(config.relaunch_delay, DEFAULT_RELAUNCH_DELAY);
        assert_eq!(config.channel_capacity, 1);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.links.len(), DEFAULT_LINKS.len());
        assert_eq!(config.links[0], "https://google.com");
        assert!(config.reporter.enable_stdout);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_load_invalid_toml() {
        let config_content = r#"
[reporter
enable_stdout = true # Missing closing bracket
"#;
        let temp_file = create_temp_config(config_content);

        let err = Config::new(temp_file.path()).unwrap_err();
        let found = err.chain().any(|e| e.is::<toml::de::Error>());
        assert!(found, "Error should be toml::de::Error");
    }

    #[test]
    fn test_load_non_existent_file() {
        let config_path = PathBuf::from("non_existent_config_file.toml");
        let err = Config::new(&config_path).unwrap_err();
        let io_err = err
            .downcast_ref::<std::io::Error>()
            .expect("Error should be std::io::Error");
        assert_eq!(io_err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_load_config_with_invalid_duration() {
        let temp_file = create_temp_config(r#"relaunch_delay = "5xyz""#);

        let err = Config::new(temp_file.path()).unwrap_err();
        let found = err.chain().any(|e| e.is::<toml::de::Error>());
        assert!(found, "Error should be toml::de::Error");
    }

    #[test]
    fn test_load_config_with_wrong_type() {
        let temp_file = create_temp_config(r#"channel_capacity = "not a number""#);

        let err = Config::new(temp_file.path()).unwrap_err();
        let found = err.chain().any(|e| e.is::<toml::de::Error>());
        assert!(found, "Error should be toml::de::Error");
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let temp_file = create_temp_config("channel_capacity = 0");

        let err = Config::new(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("channel_capacity"));
    }

    #[test]
    fn test_huge_capacity_rejected() {
        let temp_file = create_temp_config("channel_capacity = 4611686018427387904");

        let err = Config::new(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("at most"));
    }

    #[test]
    fn test_largest_capacity_accepted() {
        let temp_file =
            create_temp_config(&format!("channel_capacity = {}", MAX_CHANNEL_CAPACITY));

        let config = Config::new(temp_file.path()).unwrap();
        assert_eq!(config.channel_capacity, MAX_CHANNEL_CAPACITY);
    }

    #[test]
    fn test_empty_links_rejected() {
        let temp_file = create_temp_config("links = []");

        let err = Config::new(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("links"));
    }

    #[test]
    fn test_blank_link_rejected() {
        let temp_file = create_temp_config(r#"links = ["https://a.test", "  "]"#);

        assert!(Config::new(temp_file.path()).is_err());
    }

    #[test]
    fn test_duplicate_links_are_kept() {
        let temp_file = create_temp_config(r#"links = ["https://a.test", "https://a.test"]"#);

        let config = Config::new(temp_file.path()).unwrap();
        assert_eq!(config.links.len(), 2);
    }
}

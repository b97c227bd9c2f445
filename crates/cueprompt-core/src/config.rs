use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw control value domain for the speed slider (see `scroll::speed`).
pub const MIN_CONTROL_VALUE: u32 = 200;
pub const MAX_CONTROL_VALUE: u32 = 100_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// How long the prompter stays on each paragraph before auto-advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeControlMode {
    /// One configured duration applies to every paragraph.
    Global,
    /// Inline `({MM:SS})` overrides win; paragraphs without one fall back
    /// to the global duration.
    Local,
}

impl Default for TimeControlMode {
    fn default() -> Self {
        TimeControlMode::Global
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Seconds each paragraph stays on screen in global mode
    #[serde(default = "default_paragraph_duration")]
    pub paragraph_duration_secs: u32,
    /// Duration source: "global" or "local"
    #[serde(default)]
    pub time_control: TimeControlMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            paragraph_duration_secs: default_paragraph_duration(),
            time_control: TimeControlMode::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Speed slider value in [200, 100000]; smaller scrolls faster
    #[serde(default = "default_control_value")]
    pub control_value: u32,
    /// Scroll tick cadence in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Display font size in points; the time-per-line estimate assumes a
    /// line height of 1.2x this value
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            control_value: default_control_value(),
            tick_rate_ms: default_tick_rate(),
            font_size: default_font_size(),
        }
    }
}

fn default_paragraph_duration() -> u32 {
    10
}

fn default_control_value() -> u32 {
    1000
}

fn default_tick_rate() -> u64 {
    30 // ~33 Hz, smooth but cheap
}

fn default_font_size() -> u32 {
    36
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/cueprompt/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("cueprompt")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.playback.paragraph_duration_secs, 10);
        assert_eq!(config.playback.time_control, TimeControlMode::Global);
        assert_eq!(config.scroll.control_value, 1000);
        assert_eq!(config.scroll.tick_rate_ms, 30);
        assert_eq!(config.scroll.font_size, 36);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [playback]
            time_control = "local"
            "#,
        )
        .unwrap();
        assert_eq!(config.playback.time_control, TimeControlMode::Local);
        assert_eq!(config.playback.paragraph_duration_secs, 10);
        assert_eq!(config.scroll.control_value, 1000);
    }

    #[test]
    fn test_mode_roundtrip() {
        let config = AppConfig {
            playback: PlaybackConfig {
                paragraph_duration_secs: 7,
                time_control: TimeControlMode::Local,
            },
            scroll: ScrollConfig::default(),
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.playback.paragraph_duration_secs, 7);
        assert_eq!(back.playback.time_control, TimeControlMode::Local);
    }
}

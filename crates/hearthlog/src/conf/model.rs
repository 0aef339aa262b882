//! Model — ReaderConfig and related structs.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::filter::regex::{loggers, named_loggers_only};
use crate::filter::{FilterEngine, FilterError, FilterMode};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Client log to read.
    pub log_path: String,
    /// Keep waiting for new lines at end of file.
    pub follow: bool,
    pub poll_interval_ms: u64,
    pub output: OutputFormat,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Drop lines that do not come from a `[Logger]`.
    pub named_loggers_only: bool,
    /// Restrict to these loggers (`Power`, `Zone`, ...). Empty keeps all.
    pub loggers: Vec<String>,
    /// Extra regex applied after the logger filters.
    pub pattern: Option<String>,
    pub case_sensitive: bool,
    pub mode: FilterMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line.
    Json,
    /// Pretty `Debug` output.
    Debug,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "debug" => Ok(OutputFormat::Debug),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            log_path: "output_log.txt".to_string(),
            follow: false,
            poll_interval_ms: 100,
            output: OutputFormat::Json,
            filter: FilterConfig::default(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            named_loggers_only: true,
            loggers: Vec::new(),
            pattern: None,
            case_sensitive: false,
            mode: FilterMode::Include,
        }
    }
}

impl ReaderConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.log_path.is_empty() {
            return Err("log_path must not be empty".to_string());
        }
        if self.follow && self.poll_interval_ms == 0 {
            return Err("poll_interval_ms must be > 0 when follow is enabled".to_string());
        }
        self.filter.validate()
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.loggers.iter().any(|name| name.is_empty()) {
            return Err("filter.loggers must not contain empty names".to_string());
        }
        if matches!(&self.pattern, Some(p) if p.is_empty()) {
            return Err("filter.pattern must not be empty when set".to_string());
        }
        self.engines().map(|_| ()).map_err(|e| format!("filter: {}", e))
    }

    /// Compile the configured filters, cheapest first.
    pub fn engines(&self) -> Result<Vec<FilterEngine>, FilterError> {
        let mut engines = Vec::new();
        if self.named_loggers_only {
            engines.push(named_loggers_only()?);
        }
        if !self.loggers.is_empty() {
            let names: Vec<&str> = self.loggers.iter().map(String::as_str).collect();
            engines.push(loggers(&names)?);
        }
        if let Some(pattern) = &self.pattern {
            engines.push(FilterEngine::new(pattern, self.case_sensitive, self.mode)?);
        }
        Ok(engines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── ReaderConfig Defaults ────────────────────────────────────

    #[test]
    fn test_reader_config_defaults() {
        let cfg = ReaderConfig::default();
        assert_eq!(cfg.log_path, "output_log.txt");
        assert!(!cfg.follow);
        assert_eq!(cfg.poll_interval(), Duration::from_millis(100));
        assert_eq!(cfg.output, OutputFormat::Json);
    }

    #[test]
    fn test_filter_config_defaults() {
        let f = FilterConfig::default();
        assert!(f.named_loggers_only);
        assert!(f.loggers.is_empty());
        assert!(f.pattern.is_none());
        assert!(!f.case_sensitive);
        assert_eq!(f.mode, FilterMode::Include);
        assert_eq!(f.engines().unwrap().len(), 1);
    }

    // ── Validation ───────────────────────────────────────────────

    #[test]
    fn test_validate_default_passes() {
        assert!(ReaderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let cfg = ReaderConfig {
            log_path: String::new(),
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("log_path"), "Error should mention log_path: {}", err);
    }

    #[test]
    fn test_validate_follow_rejects_zero_poll_interval() {
        let cfg = ReaderConfig {
            follow: true,
            poll_interval_ms: 0,
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.contains("poll_interval_ms"), "Error should mention poll_interval_ms: {}", err);
    }

    #[test]
    fn test_validate_no_follow_allows_zero_poll_interval() {
        let cfg = ReaderConfig {
            follow: false,
            poll_interval_ms: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let cfg = ReaderConfig {
            filter: FilterConfig {
                pattern: Some("[unclosed".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.starts_with("filter:"), "unexpected error: {}", err);
    }

    #[test]
    fn test_validate_rejects_empty_logger_name() {
        let f = FilterConfig {
            loggers: vec!["Power".to_string(), String::new()],
            ..Default::default()
        };
        assert!(f.validate().is_err());
    }

    // ── Filters ──────────────────────────────────────────────────

    #[test]
    fn test_engines_compose_in_order() {
        let f = FilterConfig {
            loggers: vec!["Power".to_string()],
            pattern: Some("DebugPrintOptions".to_string()),
            mode: FilterMode::Exclude,
            ..Default::default()
        };
        let engines = f.engines().unwrap();
        assert_eq!(engines.len(), 3);
        assert_eq!(engines[2].mode(), FilterMode::Exclude);

        let accept = crate::filter::all_of(&engines);
        assert!(accept("[Power] GameState.DebugPrintPower() - CREATE_GAME"));
        assert!(!accept("[Power] GameState.DebugPrintOptions() - id=1"));
        assert!(!accept("[Zone] ZoneChangeList.ProcessChanges() - id=1"));
    }

    #[test]
    fn test_no_filters_when_disabled() {
        let f = FilterConfig {
            named_loggers_only: false,
            ..Default::default()
        };
        assert!(f.engines().unwrap().is_empty());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("DEBUG".parse::<OutputFormat>().unwrap(), OutputFormat::Debug);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    // ── Serialization ────────────────────────────────────────────

    #[test]
    fn test_reader_config_toml_round_trip() {
        let cfg = ReaderConfig::default();
        let toml_str = toml::to_string(&cfg).expect("Should serialize to TOML");
        let deserialized: ReaderConfig = toml::from_str(&toml_str).expect("Should deserialize from TOML");
        assert_eq!(deserialized.log_path, cfg.log_path);
        assert_eq!(deserialized.poll_interval_ms, cfg.poll_interval_ms);
        assert_eq!(deserialized.filter.mode, cfg.filter.mode);
    }

    #[test]
    fn test_reader_config_deserialize_partial_toml() {
        let toml_str = r#"
            log_path = "C:/Program Files (x86)/Hearthstone/Logs/Power.log"
            follow = true

            [filter]
            loggers = ["Power", "Zone"]
            mode = "exclude"
        "#;
        let cfg: ReaderConfig = toml::from_str(toml_str).expect("Should accept partial TOML");
        assert!(cfg.follow);
        assert_eq!(cfg.poll_interval_ms, 100); // default
        assert_eq!(cfg.filter.loggers, ["Power", "Zone"]);
        assert_eq!(cfg.filter.mode, FilterMode::Exclude);
        assert!(cfg.filter.named_loggers_only); // default
    }
}

//! CLI configuration from environment variables.

use std::path::PathBuf;

use podcut_media::editing::DEFAULT_CROSSFADE_MS;
use podcut_media::PhrasePriority;

/// Runtime configuration. Command-line flags override these values.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Default transcript language
    pub language: String,
    /// Splice crossfade length (milliseconds)
    pub crossfade_ms: u64,
    /// Maximum files edited concurrently by `batch`
    pub max_jobs: usize,
    /// Extra single-token fillers added to the built-in tables
    pub extra_fillers: Vec<String>,
    /// How overlapping phrases are resolved
    pub phrase_priority: PhrasePriority,
    /// Directory for temporary transcodes
    pub work_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            language: "ru".to_string(),
            crossfade_ms: DEFAULT_CROSSFADE_MS,
            max_jobs: 2,
            extra_fillers: Vec::new(),
            phrase_priority: PhrasePriority::default(),
            work_dir: None,
        }
    }
}

impl CliConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            language: lookup("PODCUT_LANGUAGE")
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.language),
            crossfade_ms: lookup("PODCUT_CROSSFADE_MS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.crossfade_ms),
            max_jobs: lookup("PODCUT_MAX_JOBS")
                .and_then(|s| s.trim().parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.max_jobs),
            extra_fillers: lookup("PODCUT_EXTRA_FILLERS")
                .map(|s| {
                    s.split(',')
                        .map(|f| f.trim().to_string())
                        .filter(|f| !f.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            phrase_priority: lookup("PODCUT_PHRASE_PRIORITY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.phrase_priority),
            work_dir: lookup("PODCUT_WORK_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.language, "ru");
        assert_eq!(config.crossfade_ms, 20);
        assert_eq!(config.max_jobs, 2);
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            ("PODCUT_LANGUAGE", " EN "),
            ("PODCUT_CROSSFADE_MS", "35"),
            ("PODCUT_MAX_JOBS", "8"),
            ("PODCUT_EXTRA_FILLERS", "literally, actually,,"),
            ("PODCUT_PHRASE_PRIORITY", "declaration"),
            ("PODCUT_WORK_DIR", "/var/tmp/podcut"),
        ]));
        assert_eq!(config.language, "en");
        assert_eq!(config.crossfade_ms, 35);
        assert_eq!(config.max_jobs, 8);
        assert_eq!(config.extra_fillers, vec!["literally", "actually"]);
        assert_eq!(config.phrase_priority, PhrasePriority::DeclarationOrder);
        assert_eq!(config.work_dir, Some(PathBuf::from("/var/tmp/podcut")));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = CliConfig::from_lookup(lookup(&[
            ("PODCUT_CROSSFADE_MS", "soft"),
            ("PODCUT_MAX_JOBS", "0"),
            ("PODCUT_PHRASE_PRIORITY", "random"),
            ("PODCUT_LANGUAGE", "  "),
        ]));
        assert_eq!(config, CliConfig::default());
    }
}

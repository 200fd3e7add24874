//! Configuration loading from threadbench.toml
//!
//! ThreadBench configuration can be specified in a `threadbench.toml` file in the
//! project root. The configuration is automatically discovered by walking up from
//! the current directory. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use threadbench_core::{DEFAULT_THREAD_LEVELS, DEFAULT_TRIALS};

/// Name of the configuration file looked up during discovery
pub const CONFIG_FILE_NAME: &str = "threadbench.toml";

/// ThreadBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for the thread sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Thread-count levels, swept in this order
    #[serde(default = "default_threads")]
    pub threads: Vec<usize>,
    /// Timed trials per level
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Print `Threads: N ops/sec: X` lines instead of structured output
    #[serde(default)]
    pub raw: bool,
    /// Show a progress bar on stderr
    #[serde(default = "default_progress")]
    pub progress: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            trials: default_trials(),
            raw: false,
            progress: default_progress(),
        }
    }
}

fn default_threads() -> Vec<usize> {
    DEFAULT_THREAD_LEVELS.to_vec()
}
fn default_trials() -> usize {
    DEFAULT_TRIALS
}
fn default_progress() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "json", "human", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory for report files given as bare file names
    #[serde(default = "default_output_dir")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: default_output_dir(),
        }
    }
}

fn default_format() -> String {
    "json".to_string()
}
fn default_output_dir() -> String {
    "target/threadbench".to_string()
}

impl OutputConfig {
    /// Resolve a report path: bare file names land in `directory`
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.components().count() == 1 && !path.is_absolute() {
            Path::new(&self.directory).join(path)
        } else {
            path.to_path_buf()
        }
    }
}

impl BenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` looking for `threadbench.toml`
    pub fn discover_from(start: &Path) -> Option<Self> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "ignoring unreadable configuration"
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# ThreadBench Configuration

[runner]
# Thread-count levels, swept in this order. Keep 1 first: it is the speedup baseline.
threads = [1, 2, 4, 8]
# Timed trials per level
trials = 30
# Print "Threads: N ops/sec: X" lines instead of structured output
raw = false
# Show a progress bar on stderr
progress = true

[output]
# Default output format: json, human, csv
format = "json"
# Directory for report files given as bare file names
directory = "target/threadbench"
"#
        .to_string()
    }

    /// Parse a comma-separated thread list (e.g., "1,2,4,8")
    pub fn parse_thread_list(s: &str) -> anyhow::Result<Vec<usize>> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow::anyhow!("Empty thread list"));
        }

        s.split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<usize>()
                    .map_err(|_| anyhow::anyhow!("Invalid thread count: {}", part))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.runner.threads, vec![1, 2, 4, 8]);
        assert_eq!(config.runner.trials, 30);
        assert!(!config.runner.raw);
        assert!(config.runner.progress);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn test_parse_thread_list() {
        assert_eq!(
            BenchConfig::parse_thread_list("1,2,4").unwrap(),
            vec![1, 2, 4]
        );
        assert_eq!(
            BenchConfig::parse_thread_list(" 1, 16 ").unwrap(),
            vec![1, 16]
        );
        assert!(BenchConfig::parse_thread_list("").is_err());
        assert!(BenchConfig::parse_thread_list("1,x").is_err());
        assert!(BenchConfig::parse_thread_list("1,-2").is_err());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            threads = [1, 3]
            raw = true
        "#;

        let config: BenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.threads, vec![1, 3]);
        assert!(config.runner.raw);
        // Defaults should still apply
        assert_eq!(config.runner.trials, 30);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = BenchConfig::default_toml();
        let config: BenchConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.runner.threads, vec![1, 2, 4, 8]);
        assert_eq!(config.runner.trials, 30);
    }

    #[test]
    fn test_discover_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[runner]\ntrials = 5\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let config = BenchConfig::discover_from(&nested).unwrap();
        assert_eq!(config.runner.trials, 5);
    }

    #[test]
    fn test_discover_skips_invalid_file() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join(CONFIG_FILE_NAME), "[runner\n").unwrap();

        assert!(BenchConfig::discover_from(root.path()).is_none());
    }

    #[test]
    fn test_resolve_path() {
        let output = OutputConfig::default();
        assert_eq!(
            output.resolve_path(Path::new("report.json")),
            PathBuf::from("target/threadbench/report.json")
        );
        assert_eq!(
            output.resolve_path(Path::new("out/report.json")),
            PathBuf::from("out/report.json")
        );
    }
}

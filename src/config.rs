use crate::error::StatsError;
use crate::stats::percentile::is_valid_percentile;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Buffer sizing, percentile targets and which statistics get published.
///
/// Example in statbuf.toml:
/// ```toml
/// [stats]
/// sample_size          = 1000
/// percentiles          = [95.0, 99.0, 99.5]
/// publish_variance     = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Ring capacity: how many recent values each window keeps
    pub sample_size: usize,
    /// Percentile targets, each in (0, 100]
    pub percentiles: Vec<f64>,
    pub publish_count:    bool,
    pub publish_total:    bool,
    pub publish_min:      bool,
    pub publish_max:      bool,
    pub publish_mean:     bool,
    pub publish_variance: bool,
    pub publish_stddev:   bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// "text" or "json"
    pub format: OutputFormat,
    /// Clear the buffer after every printed window
    pub reset_on_read: bool,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            sample_size:          1000,
            percentiles:          vec![95.0, 99.0, 99.5],
            publish_count:        true,
            publish_total:        true,
            publish_min:          true,
            publish_max:          true,
            publish_mean:         true,
            publish_variance:     false,
            publish_stddev:       false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { format: OutputFormat::Text, reset_on_read: true }
    }
}

impl StatsConfig {
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.sample_size == 0 {
            return Err(StatsError::invalid("sample_size must be greater than 0"));
        }
        if let Some(bad) = self.percentiles.iter().find(|p| !is_valid_percentile(**p)) {
            return Err(StatsError::invalid(format!(
                "all percentiles should be in the interval (0.0, 100.0], got {}",
                bad
            )));
        }
        Ok(())
    }
}

// ── Load / Save ───────────────────────────────────────────────────────

impl Config {
    /// Load the user config, writing defaults on first run.
    pub fn load() -> Self {
        match try_load() {
            Ok(c)  => c,
            Err(e) => {
                log::debug!("using default config: {:#}", e);
                // best-effort
                let _ = try_write_defaults();
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(text)?;
        cfg.stats.validate()?;
        Ok(cfg)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("statbuf").join("statbuf.toml"))
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, format!("# statbuf configuration\n# Generated on first run, edit freely\n\n{}", text))?;
        Ok(())
    }
}

fn try_load() -> Result<Config> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if !path.exists() {
        anyhow::bail!("{} does not exist", path.display());
    }
    Config::load_from(&path)
}

fn try_write_defaults() -> Result<()> {
    let path = Config::config_path().ok_or_else(|| anyhow::anyhow!("no config dir"))?;
    if path.exists() {
        return Ok(());
    }
    Config::default().write_to(&path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let cfg = Config::parse(
            "[stats]\nsample_size = 64\npublish_stddev = true\n\n[output]\nformat = \"json\"\n",
        ).unwrap();
        assert_eq!(cfg.stats.sample_size, 64);
        assert_eq!(cfg.stats.percentiles, vec![95.0, 99.0, 99.5]);
        assert!(cfg.stats.publish_stddev);
        assert!(!cfg.stats.publish_variance);
        assert_eq!(cfg.output.format, OutputFormat::Json);
        assert!(cfg.output.reset_on_read);
    }

    #[test]
    fn rejects_bad_percentile() {
        let err = Config::parse("[stats]\npercentiles = [50.0, 120.0]\n").unwrap_err();
        let root = err.downcast_ref::<StatsError>();
        assert!(matches!(root, Some(StatsError::InvalidArgument(_))), "{:#}", err);
    }

    #[test]
    fn rejects_zero_sample_size() {
        let cfg = StatsConfig { sample_size: 0, ..StatsConfig::default() };
        assert!(matches!(cfg.validate(), Err(StatsError::InvalidArgument(_))));
    }

    #[test]
    fn ignores_unknown_stats_keys() {
        let cfg = Config::parse("[stats]\nsample_size = 8\ncompute_frequency_ms = 0\n").unwrap();
        assert_eq!(cfg.stats.sample_size, 8);
        assert_eq!(cfg.stats, StatsConfig { sample_size: 8, ..StatsConfig::default() });
    }

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("statbuf.toml");
        let mut cfg = Config::default();
        cfg.stats.sample_size = 12;
        cfg.stats.percentiles = vec![50.0];
        cfg.write_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }
}

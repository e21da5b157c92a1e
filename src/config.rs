//! Report configuration.
//!
//! Every struct defaults to the values the report has always used, so an
//! empty JSON object (or no config file at all) reproduces the stock run.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Process-wide text style, handed to every renderer explicitly.
///
/// A `font_family` the system lacks resolves to its sans-serif face.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub font_family: String,
    pub font_size: f64,
    pub title_size: f64,
    pub annotation_size: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 16.0,
            title_size: 18.0,
            annotation_size: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    pub bar: PathBuf,
    pub sankey: PathBuf,
    pub network: PathBuf,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            bar: PathBuf::from("bar_assignment.csv"),
            sankey: PathBuf::from("sankey_assignment.csv"),
            network: PathBuf::from("networks_assignment.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub dir: PathBuf,
    pub bar: String,
    pub sankey: String,
    pub network: String,
    pub collated: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            bar: "Bar Chart.png".to_string(),
            sankey: "Sankey Diagram.png".to_string(),
            network: "Network Plot.png".to_string(),
            collated: "Collated Visualization.pdf".to_string(),
        }
    }
}

impl OutputFiles {
    pub fn bar_path(&self) -> PathBuf {
        self.dir.join(&self.bar)
    }

    pub fn sankey_path(&self) -> PathBuf {
        self.dir.join(&self.sankey)
    }

    pub fn network_path(&self) -> PathBuf {
        self.dir.join(&self.network)
    }

    pub fn collated_path(&self) -> PathBuf {
        self.dir.join(&self.collated)
    }
}

/// Pixel sizes of each rendered image (figure inches at 100 DPI).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageSizes {
    pub bar: (u32, u32),
    pub sankey: (u32, u32),
    pub network: (u32, u32),
    pub collated: (u32, u32),
}

impl Default for ImageSizes {
    fn default() -> Self {
        Self {
            bar: (800, 600),
            sankey: (1000, 600),
            network: (1000, 1000),
            collated: (1600, 1200),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub inputs: InputFiles,
    pub outputs: OutputFiles,
    pub sizes: ImageSizes,
    pub style: StyleConfig,
    pub log_level: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            inputs: InputFiles::default(),
            outputs: OutputFiles::default(),
            sizes: ImageSizes::default(),
            style: StyleConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ReportConfig {
    /// Read a JSON config file; missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: ReportConfig =
            serde_json::from_str(&text).context("Failed to parse config json")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        let config: ReportConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ReportConfig::default());
        assert_eq!(
            config.outputs.collated_path(),
            PathBuf::from("./Collated Visualization.pdf")
        );
    }

    #[test]
    fn test_partial_override() {
        let config: ReportConfig = serde_json::from_str(
            r#"{"outputs": {"dir": "out"}, "style": {"font_size": 20.0}, "log_level": "debug"}"#,
        )
        .unwrap();
        assert_eq!(config.outputs.bar_path(), PathBuf::from("out/Bar Chart.png"));
        assert_eq!(config.style.font_size, 20.0);
        assert_eq!(config.style.font_family, "Arial");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.inputs.bar, PathBuf::from("bar_assignment.csv"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(ReportConfig::load("/nonexistent/report.json").is_err());
    }
}

//! Filter job configuration
//!
//! ```yaml
//! electron_input_tag: gsfElectrons
//! pf_met_input_tag: pfMet
//! csv_file_name: Wenu_Run2011A.csv
//! min_electron_pt: 25.0
//! max_events: 500000
//! lumi_mask: Cert_160404-180252_7TeV_ReRecoNov08_Collisions11_JSON.json
//! input_files:
//!   - SingleElectron_0.jsonl
//! ```
//!
//! `min_electron_pt` has no default and must be supplied.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wenu_core::{Error, InputTag, LumiMask, Result};

use crate::pipeline::PipelineConfig;
use crate::selector::SelectorConfig;

/// Configuration of one filter job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Label of the electron collection
    #[serde(default = "default_electron_tag")]
    pub electron_input_tag: InputTag,

    /// Label of the particle-flow MET collection
    #[serde(default = "default_met_tag")]
    pub pf_met_input_tag: InputTag,

    /// Output CSV path
    #[serde(default = "default_csv_file_name")]
    pub csv_file_name: PathBuf,

    /// Primary electron threshold (GeV)
    #[serde(default)]
    pub min_electron_pt: Option<f64>,

    /// Stop after this many certified events
    #[serde(default)]
    pub max_events: Option<u64>,

    /// Certified lumi-section JSON
    #[serde(default)]
    pub lumi_mask: Option<PathBuf>,

    /// Event files, read in order
    #[serde(default)]
    pub input_files: Vec<PathBuf>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            electron_input_tag: default_electron_tag(),
            pf_met_input_tag: default_met_tag(),
            csv_file_name: default_csv_file_name(),
            min_electron_pt: None,
            max_events: None,
            lumi_mask: None,
            input_files: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Check required settings
    pub fn validate(&self) -> Result<()> {
        self.min_electron_pt()?;

        if self.input_files.is_empty() {
            return Err(Error::config("no input files given"));
        }

        if self.csv_file_name.as_os_str().is_empty() {
            return Err(Error::config("csv_file_name must not be empty"));
        }

        Ok(())
    }

    /// The primary electron threshold, which must be supplied
    pub fn min_electron_pt(&self) -> Result<f64> {
        match self.min_electron_pt {
            None => Err(Error::config("min_electron_pt must be supplied")),
            Some(pt) if !pt.is_finite() || pt < 0.0 => Err(Error::config(format!(
                "min_electron_pt must be a finite, non-negative value, got {}",
                pt
            ))),
            Some(pt) => Ok(pt),
        }
    }

    /// Build the pipeline configuration, loading the lumi mask if one is set
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let lumi_mask = self
            .lumi_mask
            .as_ref()
            .map(|path| {
                LumiMask::from_file(path)
                    .map_err(|e| Error::config(format!("cannot load lumi mask {:?}: {}", path, e)))
            })
            .transpose()?;

        Ok(PipelineConfig {
            electron_tag: self.electron_input_tag.clone(),
            met_tag: self.pf_met_input_tag.clone(),
            selector: SelectorConfig::new(self.min_electron_pt()?),
            max_events: self.max_events,
            lumi_mask,
        })
    }
}

fn default_electron_tag() -> InputTag {
    InputTag::new("gsfElectrons")
}

fn default_met_tag() -> InputTag {
    InputTag::new("pfMet")
}

fn default_csv_file_name() -> PathBuf {
    PathBuf::from("Wenu.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_yaml() {
        let yaml = r#"
electron_input_tag: gsfElectrons
pf_met_input_tag: pfMet
csv_file_name: Wenu_Run2011A.csv
min_electron_pt: 25.0
max_events: 500000
input_files:
  - a.jsonl
  - b.jsonl
"#;

        let config = FilterConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.min_electron_pt().unwrap(), 25.0);
        assert_eq!(config.max_events, Some(500000));
        assert_eq!(config.csv_file_name, PathBuf::from("Wenu_Run2011A.csv"));
        assert_eq!(config.input_files.len(), 2);
        config.validate().unwrap();
    }

    #[test]
    fn test_defaults() {
        let config = FilterConfig::from_yaml("min_electron_pt: 20.0").unwrap();
        assert_eq!(config.electron_input_tag, InputTag::new("gsfElectrons"));
        assert_eq!(config.pf_met_input_tag, InputTag::new("pfMet"));
        assert_eq!(config.csv_file_name, PathBuf::from("Wenu.csv"));
        assert!(config.lumi_mask.is_none());
        assert!(config.max_events.is_none());
    }

    #[test]
    fn test_min_electron_pt_required() {
        let config = FilterConfig::from_yaml("input_files: [a.jsonl]").unwrap();
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        assert!(config.pipeline_config().is_err());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = FilterConfig {
            min_electron_pt: Some(-1.0),
            input_files: vec![PathBuf::from("a.jsonl")],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_no_inputs_rejected() {
        let config = FilterConfig {
            min_electron_pt: Some(20.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_pipeline_config_loads_mask() {
        let dir = tempfile::tempdir().unwrap();
        let mask_path = dir.path().join("good.json");
        std::fs::write(&mask_path, r#"{"160431": [[1, 100]]}"#).unwrap();

        let config = FilterConfig {
            min_electron_pt: Some(25.0),
            lumi_mask: Some(mask_path),
            ..Default::default()
        };

        let pipeline = config.pipeline_config().unwrap();
        assert_eq!(pipeline.selector.min_electron_pt, 25.0);
        assert!(pipeline.lumi_mask.unwrap().contains(160431, 50));
    }

    #[test]
    fn test_missing_mask_file() {
        let config = FilterConfig {
            min_electron_pt: Some(25.0),
            lumi_mask: Some(PathBuf::from("/nonexistent/good.json")),
            ..Default::default()
        };

        assert!(matches!(config.pipeline_config(), Err(Error::Config(_))));
    }
}

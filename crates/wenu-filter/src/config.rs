//! Job configuration: YAML file plus command-line overrides

use anyhow::Context;
use tracing::debug;
use wenu_selection::FilterConfig;

use crate::Cli;

/// Load the configuration file (defaults if it does not exist), apply CLI
/// overrides and validate the result
pub fn load(cli: &Cli) -> anyhow::Result<FilterConfig> {
    let mut config = if cli.config.exists() {
        FilterConfig::from_file(&cli.config)
            .with_context(|| format!("failed to read configuration {:?}", cli.config))?
    } else {
        debug!("No configuration file at {:?}, using defaults", cli.config);
        FilterConfig::default()
    };

    apply_overrides(&mut config, cli);
    config.validate()?;

    Ok(config)
}

fn apply_overrides(config: &mut FilterConfig, cli: &Cli) {
    if !cli.inputs.is_empty() {
        config.input_files = cli.inputs.clone();
    }

    if let Some(output) = &cli.output {
        config.csv_file_name = output.clone();
    }

    if let Some(pt) = cli.min_electron_pt {
        config.min_electron_pt = Some(pt);
    }

    if let Some(max_events) = cli.max_events {
        config.max_events = Some(max_events);
    }

    if let Some(mask) = &cli.lumi_mask {
        config.lumi_mask = Some(mask.clone());
    }
}

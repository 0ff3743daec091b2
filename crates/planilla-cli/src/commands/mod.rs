pub mod config;
pub mod extract;
pub mod inspect;

use planilla_core::config::{load_config, ExtractionConfig};
use planilla_core::error::PlanillaError;
use std::path::Path;

/// Config from `--config`, or the defaults.
fn resolve_config(path: Option<&Path>) -> Result<ExtractionConfig, PlanillaError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(ExtractionConfig::default()),
    }
}

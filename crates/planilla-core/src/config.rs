use crate::error::PlanillaError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable tolerances for the layout-inference pipeline.
///
/// All positions are in PDF points with a top-left origin. Every field has a
/// default, so a config file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Horizontal gap under which adjacent word fragments are merged by the backend.
    pub word_x_tolerance: f64,
    /// Vertical drift under which adjacent word fragments count as the same line.
    pub word_y_tolerance: f64,
    /// Bucket height used when grouping words into visual lines.
    pub line_y_tolerance: f64,
    /// Number of text lines the page classifier looks at.
    pub header_lines: usize,
    /// Max vertical distance from the "Transporte" label for its value tokens.
    pub transport_line_tolerance: f64,
    /// Max number of tokens scanned after the "Transporte" label.
    pub transport_max_tokens: usize,
    /// How far left of the BULTOS header the quantity window starts.
    pub bultos_left_margin: f64,
    /// How far right of the BULTOS header the quantity window extends.
    pub bultos_window: f64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            word_x_tolerance: 1.7,
            word_y_tolerance: 1.7,
            line_y_tolerance: 2.0,
            header_lines: 15,
            transport_line_tolerance: 5.0,
            transport_max_tokens: 24,
            bultos_left_margin: 10.0,
            bultos_window: 70.0,
        }
    }
}

/// Load an extraction config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractionConfig, PlanillaError> {
    let content = std::fs::read_to_string(path).map_err(|e| PlanillaError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse an extraction config from a JSON string.
pub fn parse_config(json: &str, source: &Path) -> Result<ExtractionConfig, PlanillaError> {
    let config: ExtractionConfig =
        serde_json::from_str(json).map_err(|e| PlanillaError::ConfigLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse an extraction config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ExtractionConfig, PlanillaError> {
    let config: ExtractionConfig = serde_json::from_str(json).map_err(PlanillaError::Json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate that every tolerance is usable.
pub fn validate_config(config: &ExtractionConfig) -> Result<(), PlanillaError> {
    let positive = [
        ("word_x_tolerance", config.word_x_tolerance),
        ("word_y_tolerance", config.word_y_tolerance),
        ("line_y_tolerance", config.line_y_tolerance),
        ("transport_line_tolerance", config.transport_line_tolerance),
        ("bultos_window", config.bultos_window),
    ];
    for (name, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(PlanillaError::ConfigInvalid(format!(
                "{name} must be a positive number, got {value}"
            )));
        }
    }

    if !config.bultos_left_margin.is_finite() || config.bultos_left_margin < 0.0 {
        return Err(PlanillaError::ConfigInvalid(format!(
            "bultos_left_margin must not be negative, got {}",
            config.bultos_left_margin
        )));
    }

    if config.header_lines == 0 {
        return Err(PlanillaError::ConfigInvalid(
            "header_lines must be at least 1".into(),
        ));
    }

    if config.transport_max_tokens == 0 {
        return Err(PlanillaError::ConfigInvalid(
            "transport_max_tokens must be at least 1".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&ExtractionConfig::default()).is_ok());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_config_str(r#"{ "bultos_window": 90.0 }"#).unwrap();
        assert_eq!(config.bultos_window, 90.0);
        assert_eq!(config.line_y_tolerance, 2.0);
        assert_eq!(config.header_lines, 15);
    }

    #[test]
    fn test_zero_tolerance_rejected() {
        let err = parse_config_str(r#"{ "line_y_tolerance": 0.0 }"#).unwrap_err();
        assert!(matches!(err, PlanillaError::ConfigInvalid(_)));
    }

    #[test]
    fn test_negative_margin_rejected() {
        assert!(parse_config_str(r#"{ "bultos_left_margin": -1.0 }"#).is_err());
    }

    #[test]
    fn test_zero_header_lines_rejected() {
        assert!(parse_config_str(r#"{ "header_lines": 0 }"#).is_err());
    }

    #[test]
    fn test_malformed_json_reports_source() {
        let err = parse_config("{", Path::new("tuning.json")).unwrap_err();
        match err {
            PlanillaError::ConfigLoad { path, .. } => assert_eq!(path, Path::new("tuning.json")),
            other => panic!("unexpected error: {other}"),
        }
    }
}

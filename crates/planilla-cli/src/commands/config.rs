use planilla_core::config::ExtractionConfig;
use planilla_core::error::PlanillaError;
use std::path::Path;

pub fn show() -> Result<(), PlanillaError> {
    let json = serde_json::to_string_pretty(&ExtractionConfig::default())?;
    println!("{json}");
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), PlanillaError> {
    let config = planilla_core::config::load_config(file)?;

    println!("Config '{}' is valid.", file.display());
    println!(
        "  Word tolerances: x={} y={}",
        config.word_x_tolerance, config.word_y_tolerance
    );
    println!("  Line grouping tolerance: {}", config.line_y_tolerance);
    println!(
        "  Quantity window: BULTOS -{} / +{}",
        config.bultos_left_margin, config.bultos_window
    );

    let defaults = ExtractionConfig::default();
    if config == defaults {
        println!("\nNote: all values equal the defaults.");
    }

    Ok(())
}

use planilla_core::error::PlanillaError;
use planilla_core::extraction::pdftotext::PdftotextExtractor;
use planilla_core::model::{ColumnBounds, PageOutcome};
use std::path::PathBuf;

use super::resolve_config;

pub fn run(input_file: PathBuf, config_file: Option<PathBuf>) -> Result<(), PlanillaError> {
    let config = resolve_config(config_file.as_deref())?;
    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdftotextExtractor::new();
    let extraction = planilla_core::extract_pdf(&pdf_bytes, &extractor, &config)?;

    for report in &extraction.pages {
        println!("Page {:>3}: {}", report.page_number, report.outcome);
        match &report.outcome {
            PageOutcome::MissingColumns { bounds } | PageOutcome::Parsed { bounds, .. } => {
                println!("          {}", describe_bounds(bounds));
            }
            PageOutcome::NotPlanilla => {}
        }
    }

    println!();
    println!(
        "{} detail row(s), {} summary row(s)",
        extraction.detail.len(),
        extraction.summary.len()
    );
    Ok(())
}

fn describe_bounds(bounds: &ColumnBounds) -> String {
    let fmt = |x: Option<f64>| x.map(|v| format!("{v:.1}")).unwrap_or_else(|| "-".into());
    format!(
        "SKU x={}  DESCRIPCION x={}  BULTOS x={}  A CARGAR x={}",
        fmt(bounds.sku_x),
        fmt(bounds.desc_x),
        fmt(bounds.left_bultos_x),
        fmt(bounds.a_cargar_x)
    )
}

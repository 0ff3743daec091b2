use planilla_core::error::PlanillaError;
use planilla_core::export::write_workbook_file;
use planilla_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use super::resolve_config;
use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    xlsx_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<(), PlanillaError> {
    let config = resolve_config(config_file.as_deref())?;
    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdftotextExtractor::new();
    let extraction = planilla_core::extract_pdf(&pdf_bytes, &extractor, &config)?;

    match output_format {
        "json" => output::json::print(&extraction)?,
        _ => output::table::print(&extraction),
    }

    if let Some(path) = xlsx_file {
        write_workbook_file(&extraction, &path)?;
        eprintln!(
            "Wrote {} detail row(s) and {} summary row(s) to {}",
            extraction.detail.len(),
            extraction.summary.len(),
            path.display()
        );
    }

    Ok(())
}

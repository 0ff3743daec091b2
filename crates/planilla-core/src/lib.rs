pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod tables;

use config::{validate_config, ExtractionConfig};
use error::PlanillaError;
use extraction::{PageContent, PdfExtractor, WordOptions};
use model::{Extraction, PageReport};
use tracing::{info, warn};

/// Main API entry point: extract the Detalle and Resumen tables from a PDF.
///
/// Only failures to read the document itself are errors. Pages that are not
/// manifests, lack a table header, or hold malformed lines are skipped.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    config: &ExtractionConfig,
) -> Result<Extraction, PlanillaError> {
    validate_config(config)?;

    let pages = extractor.extract_pages(pdf_bytes, &WordOptions::from(config))?;
    info!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted PDF text"
    );

    Ok(extract_pages(&pages, config))
}

/// Run the layout pipeline over already-extracted pages.
pub fn extract_pages(pages: &[PageContent], config: &ExtractionConfig) -> Extraction {
    let mut rows = Vec::new();
    let mut reports = Vec::with_capacity(pages.len());

    for page in pages {
        let (outcome, page_rows) = parsing::parse_page(page, config);
        if matches!(outcome, model::PageOutcome::Parsed { rows: 0, .. }) {
            warn!(page = page.page_number, "planilla page produced no rows");
        }
        rows.extend(page_rows);
        reports.push(PageReport {
            page_number: page.page_number,
            outcome,
        });
    }

    let parsed_rows = rows.len();
    let detail = tables::build_detail(rows);
    let summary = tables::build_summary(&detail);
    info!(
        rows = parsed_rows,
        detail = detail.len(),
        summary = summary.len(),
        "built manifest tables"
    );

    Extraction {
        detail,
        summary,
        pages: reports,
    }
}

pub mod classify;
pub mod columns;
pub mod lines;
pub mod normalize;
pub mod rows;
pub mod transport;

use crate::config::ExtractionConfig;
use crate::extraction::{PageContent, Word};
use crate::model::{ColumnBounds, ManifestRow, PageOutcome};
use classify::is_planilla_page;
use columns::locate_columns;
use rows::parse_rows;
use tracing::debug;
use transport::extract_transporte;

/// Run one page through the classifier gate and the table parser.
///
/// Skipped pages return an empty row list; the outcome says why.
pub fn parse_page(page: &PageContent, config: &ExtractionConfig) -> (PageOutcome, Vec<ManifestRow>) {
    if !is_planilla_page(&page.text(), config.header_lines) {
        debug!(page = page.page_number, "not a planilla de carga, skipping");
        return (PageOutcome::NotPlanilla, Vec::new());
    }

    let bounds = locate_columns(&page.words);
    match parse_located(&page.words, &bounds, config) {
        Some((transporte, rows)) => {
            debug!(
                page = page.page_number,
                rows = rows.len(),
                transporte = transporte.as_deref().unwrap_or("-"),
                "parsed page"
            );
            let outcome = PageOutcome::Parsed {
                transporte,
                bounds,
                rows: rows.len(),
            };
            (outcome, rows)
        }
        None => {
            debug!(
                page = page.page_number,
                ?bounds,
                "table header not found, skipping"
            );
            (PageOutcome::MissingColumns { bounds }, Vec::new())
        }
    }
}

/// Parse the manifest table of a page already known to be a planilla.
///
/// Returns None when the SKU, DESCRIPCION or BULTOS header is missing.
pub fn parse_table(words: &[Word], config: &ExtractionConfig) -> Option<Vec<ManifestRow>> {
    let bounds = locate_columns(words);
    parse_located(words, &bounds, config).map(|(_, rows)| rows)
}

fn parse_located(
    words: &[Word],
    bounds: &ColumnBounds,
    config: &ExtractionConfig,
) -> Option<(Option<String>, Vec<ManifestRow>)> {
    let anchors = bounds.anchors()?;
    let transporte = extract_transporte(
        words,
        config.transport_line_tolerance,
        config.transport_max_tokens,
    );
    let rows = parse_rows(words, anchors, transporte.as_deref(), config);
    Some((transporte, rows))
}

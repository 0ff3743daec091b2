use planilla_core::export::{DETAIL_SHEET, SUMMARY_SHEET};
use planilla_core::model::{Extraction, PageOutcome, TableRow, COLUMNS};

pub fn print(extraction: &Extraction) {
    println!("=== {DETAIL_SHEET} ===\n");
    print_rows(&extraction.detail);
    println!();
    println!("=== {SUMMARY_SHEET} ===\n");
    print_rows(&extraction.summary);

    let skipped = extraction
        .pages
        .iter()
        .filter(|p| !matches!(p.outcome, PageOutcome::Parsed { .. }))
        .count();
    if skipped > 0 {
        println!();
        println!(
            "  {} of {} page(s) skipped (run `planilla inspect` for details)",
            skipped,
            extraction.pages.len()
        );
    }
}

fn print_rows(rows: &[TableRow]) {
    if rows.is_empty() {
        println!("  (no rows)");
        return;
    }

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                r.transporte.clone(),
                r.codigo_de_articulo.clone(),
                r.descripcion.clone(),
                r.bultos.to_string(),
            ]
        })
        .collect();

    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    println!(
        "  {:<w0$}  {:<w1$}  {:<w2$}  {:>w3$}",
        COLUMNS[0],
        COLUMNS[1],
        COLUMNS[2],
        COLUMNS[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    );
    for row in &cells {
        println!(
            "  {:<w0$}  {:<w1$}  {:<w2$}  {:>w3$}",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
            w3 = widths[3],
        );
    }
}

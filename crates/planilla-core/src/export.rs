use crate::error::PlanillaError;
use crate::model::{Extraction, TableRow, COLUMNS};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

pub const DETAIL_SHEET: &str = "Detalle";
pub const SUMMARY_SHEET: &str = "Resumen";

/// Serialize both tables into an xlsx workbook.
///
/// The header row is always written, so an empty extraction still yields
/// two sheets with the column names.
pub fn write_workbook(extraction: &Extraction) -> Result<Vec<u8>, PlanillaError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    write_sheet(sheet, DETAIL_SHEET, &extraction.detail, &header)?;

    let sheet = workbook.add_worksheet();
    write_sheet(sheet, SUMMARY_SHEET, &extraction.summary, &header)?;

    Ok(workbook.save_to_buffer()?)
}

pub fn write_workbook_file(extraction: &Extraction, path: &Path) -> Result<(), PlanillaError> {
    let bytes = write_workbook(extraction)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn write_sheet(
    sheet: &mut Worksheet,
    name: &str,
    rows: &[TableRow],
    header: &Format,
) -> Result<(), PlanillaError> {
    sheet.set_name(name)?;

    for (col, title) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, &row.transporte)?;
        sheet.write_string(r, 1, &row.codigo_de_articulo)?;
        sheet.write_string(r, 2, &row.descripcion)?;
        sheet.write_number(r, 3, row.bultos as f64)?;
    }

    sheet.autofit();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn open(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
        calamine::open_workbook_from_rs(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_workbook_has_both_sheets() {
        let row = TableRow {
            transporte: "EXPRESO SUR".into(),
            codigo_de_articulo: "12345".into(),
            descripcion: "Widget Azul".into(),
            bultos: 7,
        };
        let extraction = Extraction {
            detail: vec![row.clone(), row.clone()],
            summary: vec![TableRow { bultos: 14, ..row }],
            pages: vec![],
        };

        let mut workbook = open(write_workbook(&extraction).unwrap());
        assert_eq!(workbook.sheet_names(), vec!["Detalle", "Resumen"]);

        let detail = workbook.worksheet_range(DETAIL_SHEET).unwrap();
        assert_eq!(detail.height(), 3);
        assert_eq!(
            detail.get_value((0, 1)),
            Some(&Data::String("CodigoDeArticulo".into()))
        );
        assert_eq!(
            detail.get_value((1, 2)),
            Some(&Data::String("Widget Azul".into()))
        );
        assert_eq!(detail.get_value((1, 3)), Some(&Data::Float(7.0)));

        let summary = workbook.worksheet_range(SUMMARY_SHEET).unwrap();
        assert_eq!(summary.height(), 2);
        assert_eq!(summary.get_value((1, 3)), Some(&Data::Float(14.0)));
    }

    #[test]
    fn test_empty_extraction_keeps_headers() {
        let mut workbook = open(write_workbook(&Extraction::default()).unwrap());
        for name in [DETAIL_SHEET, SUMMARY_SHEET] {
            let range = workbook.worksheet_range(name).unwrap();
            assert_eq!(range.height(), 1);
            let headers: Vec<String> = (0..4)
                .map(|c| range.get_value((0, c)).map(|d| d.to_string()).unwrap_or_default())
                .collect();
            assert_eq!(headers, COLUMNS);
        }
    }
}

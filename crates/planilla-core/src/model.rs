use serde::{Deserialize, Serialize};
use std::fmt;

/// Column headers shared by the Detalle and Resumen tables, in output order.
pub const COLUMNS: [&str; 4] = ["Transporte", "CodigoDeArticulo", "Descripcion", "Bultos"];

/// One data line recovered from a manifest page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRow {
    pub transporte: Option<String>,
    pub codigo_de_articulo: String,
    pub descripcion: String,
    pub bultos: u32,
}

/// A row of either output table. Serialized with the spreadsheet column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(rename = "Transporte")]
    pub transporte: String,
    #[serde(rename = "CodigoDeArticulo")]
    pub codigo_de_articulo: String,
    #[serde(rename = "Descripcion")]
    pub descripcion: String,
    #[serde(rename = "Bultos")]
    pub bultos: u64,
}

impl TableRow {
    /// Sort and grouping key: (Transporte, CodigoDeArticulo, Descripcion).
    pub fn key(&self) -> (&str, &str, &str) {
        (&self.transporte, &self.codigo_de_articulo, &self.descripcion)
    }
}

/// Horizontal reference positions located from a page's header tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnBounds {
    pub sku_x: Option<f64>,
    pub desc_x: Option<f64>,
    pub left_bultos_x: Option<f64>,
    /// Rightmost "A CARGAR" header. Located but not used for row parsing.
    pub a_cargar_x: Option<f64>,
}

impl ColumnBounds {
    /// The three boundaries a page needs before any row can be parsed.
    pub fn anchors(&self) -> Option<TableAnchors> {
        Some(TableAnchors {
            sku_x: self.sku_x?,
            desc_x: self.desc_x?,
            left_bultos_x: self.left_bultos_x?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableAnchors {
    pub sku_x: f64,
    pub desc_x: f64,
    pub left_bultos_x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Header window does not identify a planilla de carga.
    NotPlanilla,
    /// Planilla page, but SKU / DESCRIPCION / BULTOS headers were not all found.
    MissingColumns { bounds: ColumnBounds },
    Parsed {
        transporte: Option<String>,
        bounds: ColumnBounds,
        rows: usize,
    },
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageOutcome::NotPlanilla => write!(f, "skipped (not a planilla de carga)"),
            PageOutcome::MissingColumns { .. } => write!(f, "skipped (table header not found)"),
            PageOutcome::Parsed {
                transporte, rows, ..
            } => match transporte {
                Some(t) => write!(f, "{rows} row(s), transporte {t}"),
                None => write!(f, "{rows} row(s), no transporte"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    pub page_number: usize,
    pub outcome: PageOutcome,
}

/// Result of running the pipeline over a whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Detalle: every complete row, sorted by key.
    pub detail: Vec<TableRow>,
    /// Resumen: Bultos summed per key.
    pub summary: Vec<TableRow>,
    pub pages: Vec<PageReport>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.detail.is_empty()
    }
}

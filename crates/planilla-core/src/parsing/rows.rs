use super::lines::{group_lines, VisualLine};
use super::normalize::{normalize, normalize_upper};
use crate::config::ExtractionConfig;
use crate::extraction::Word;
use crate::model::{ManifestRow, TableAnchors};
use regex::Regex;
use std::sync::LazyLock;

static SKU_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]{2,})").expect("valid sku regex"));

/// `12345-A`, `123 - 4`: sub-items and ranges, not articles.
static SKU_DASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[0-9]{2,}\s*-\s*").expect("valid sku dash regex"));

static QTY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{1,5})\b").expect("valid quantity regex"));

static QTY_TAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{1,5})\s*$").expect("valid trailing quantity regex"));

/// Subtotal and banner lines that share the table's columns.
const BANNERS: [&str; 3] = [
    "COMPOSICION DE CARGA",
    "PLANILLA ADMINISTRATIVA",
    "TOTAL ALMACEN",
];

/// Column split points for one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// Midpoint between the SKU and DESCRIPCION headers.
    pub sku_desc_bound: f64,
    pub qty_left: f64,
    pub qty_right: f64,
}

impl RowLayout {
    pub fn new(anchors: TableAnchors, config: &ExtractionConfig) -> Self {
        RowLayout {
            sku_desc_bound: (anchors.sku_x + anchors.desc_x) / 2.0,
            qty_left: anchors.left_bultos_x - config.bultos_left_margin,
            qty_right: anchors.left_bultos_x + config.bultos_window,
        }
    }
}

/// Parse every visual line of a page into manifest rows, dropping non-data lines.
pub fn parse_rows(
    words: &[Word],
    anchors: TableAnchors,
    transporte: Option<&str>,
    config: &ExtractionConfig,
) -> Vec<ManifestRow> {
    let layout = RowLayout::new(anchors, config);
    group_lines(words, config.line_y_tolerance)
        .iter()
        .filter_map(|line| parse_line(line, &layout, transporte))
        .collect()
}

/// Parse a single visual line.
///
/// Returns None for header repeats, banners, and lines whose code,
/// description or quantity does not validate.
pub fn parse_line(
    line: &VisualLine<'_>,
    layout: &RowLayout,
    transporte: Option<&str>,
) -> Option<ManifestRow> {
    let text = normalize_upper(&line.text());
    if text.contains("SKU") && text.contains("BULTOS") {
        return None;
    }
    if BANNERS.iter().any(|b| text.contains(b)) {
        return None;
    }

    let mut sku_parts: Vec<&str> = Vec::new();
    let mut desc_parts: Vec<&str> = Vec::new();
    let mut qty_parts: Vec<&str> = Vec::new();
    for word in &line.words {
        let x = word.x0;
        if x <= layout.sku_desc_bound {
            sku_parts.push(&word.text);
        }
        if x > layout.sku_desc_bound && x < layout.qty_left {
            desc_parts.push(&word.text);
        }
        if x >= layout.qty_left && x <= layout.qty_right {
            qty_parts.push(&word.text);
        }
    }

    let codigo = parse_codigo(&sku_parts.join(" "))?;

    let descripcion = desc_parts.join(" ");
    let descripcion = descripcion.trim();
    if descripcion.chars().count() < 2 {
        return None;
    }

    let bultos = parse_bultos(&qty_parts.join(" "), descripcion)?;

    Some(ManifestRow {
        transporte: transporte.map(str::to_string),
        codigo_de_articulo: codigo,
        descripcion: descripcion.to_string(),
        bultos,
    })
}

/// Leading run of two or more digits, unless it is dash-suffixed.
fn parse_codigo(raw: &str) -> Option<String> {
    let sku = normalize(raw);
    if SKU_DASH_RE.is_match(&sku) {
        return None;
    }
    let caps = SKU_RE.captures(&sku)?;
    Some(caps[1].to_string())
}

/// Quantity from the BULTOS window, else a number closing the description.
fn parse_bultos(qty_text: &str, descripcion: &str) -> Option<u32> {
    let qty_text = normalize(qty_text);
    let digits = match QTY_RE.captures(&qty_text) {
        Some(caps) => caps[1].to_string(),
        None => QTY_TAIL_RE.captures(descripcion)?[1].to_string(),
    };
    digits.parse().ok()
}

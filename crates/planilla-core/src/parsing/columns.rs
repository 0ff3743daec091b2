use super::normalize::normalize_upper;
use crate::extraction::Word;
use crate::model::ColumnBounds;

/// Locate the table columns of a page from the x-position of its header words.
///
/// BULTOS may be printed twice (loaded and to-load quantities), so the
/// leftmost one is the quantity column. "A CARGAR" keeps the rightmost hit.
pub fn locate_columns(words: &[Word]) -> ColumnBounds {
    let mut bounds = ColumnBounds::default();

    for word in words {
        let text = normalize_upper(word.text.trim());
        let x = word.x0;

        if bounds.sku_x.is_none() && text == "SKU" {
            bounds.sku_x = Some(x);
        }
        if bounds.desc_x.is_none() && text.starts_with("DESCRIPCION") {
            bounds.desc_x = Some(x);
        }
        if text == "BULTOS" {
            bounds.left_bultos_x = Some(bounds.left_bultos_x.map_or(x, |cur| cur.min(x)));
        }
        if matches!(text.as_str(), "A" | "CARGAR" | "A CARGAR") {
            bounds.a_cargar_x = Some(bounds.a_cargar_x.map_or(x, |cur| cur.max(x)));
        }
    }

    bounds
}

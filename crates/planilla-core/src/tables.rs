use crate::model::{ManifestRow, TableRow};
use std::collections::BTreeMap;

/// Build the Detalle table: drop rows missing a field, sort by key.
///
/// Only the transport can be missing on a parsed row, so rows from pages
/// without a "Transporte" label do not reach the tables.
pub fn build_detail(rows: Vec<ManifestRow>) -> Vec<TableRow> {
    let mut detail: Vec<TableRow> = rows
        .into_iter()
        .filter_map(|row| {
            Some(TableRow {
                transporte: row.transporte?,
                codigo_de_articulo: row.codigo_de_articulo,
                descripcion: row.descripcion,
                bultos: u64::from(row.bultos),
            })
        })
        .collect();
    detail.sort_by(|a, b| a.key().cmp(&b.key()));
    detail
}

/// Build the Resumen table: Bultos summed per (Transporte, Codigo, Descripcion).
pub fn build_summary(detail: &[TableRow]) -> Vec<TableRow> {
    let mut groups: BTreeMap<(&str, &str, &str), u64> = BTreeMap::new();
    for row in detail {
        *groups.entry(row.key()).or_insert(0) += row.bultos;
    }

    groups
        .into_iter()
        .map(|((transporte, codigo, descripcion), bultos)| TableRow {
            transporte: transporte.to_string(),
            codigo_de_articulo: codigo.to_string(),
            descripcion: descripcion.to_string(),
            bultos,
        })
        .collect()
}

use crate::extraction::Word;
use std::collections::BTreeMap;

/// Words sharing one printed row, ordered left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualLine<'a> {
    /// Quantized vertical position of the row.
    pub key: f64,
    pub words: Vec<&'a Word>,
}

impl VisualLine<'_> {
    pub fn text(&self) -> String {
        let texts: Vec<&str> = self.words.iter().map(|w| w.text.as_str()).collect();
        texts.join(" ")
    }
}

/// Bucket words into visual lines by `round(top / y_tol) * y_tol`.
///
/// Ties round half to even. Lines come out top to bottom.
pub fn group_lines(words: &[Word], y_tol: f64) -> Vec<VisualLine<'_>> {
    let mut buckets: BTreeMap<i64, Vec<&Word>> = BTreeMap::new();

    for word in words {
        let bucket = (word.top / y_tol).round_ties_even() as i64;
        buckets.entry(bucket).or_default().push(word);
    }

    buckets
        .into_iter()
        .map(|(bucket, mut words)| {
            words.sort_by(|a, b| a.x0.total_cmp(&b.x0));
            VisualLine {
                key: bucket as f64 * y_tol,
                words,
            }
        })
        .collect()
}

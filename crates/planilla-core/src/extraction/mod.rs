pub mod pdftotext;

use crate::config::ExtractionConfig;
use crate::error::PlanillaError;

/// A positioned word. Coordinates are PDF points with a top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x0: f64,
    pub x1: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Word {
    /// Build a word from its text and top-left corner, for tests and fixtures.
    ///
    /// The extent is a rough guess (5pt per character, 8pt tall). Backends
    /// construct `Word` with the edges reported by the PDF instead.
    pub fn new(text: impl Into<String>, x0: f64, top: f64) -> Self {
        let text = text.into();
        let x1 = x0 + 5.0 * text.chars().count() as f64;
        Word {
            text,
            x0,
            x1,
            top,
            bottom: top + 8.0,
        }
    }
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub page_number: usize,
    /// Plain text of the page, one entry per printed line.
    pub lines: Vec<String>,
    /// Word tokens in reading order: line by line, left to right.
    pub words: Vec<Word>,
}

impl PageContent {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Largest gap, as a share of glyph height, that still counts as one word.
///
/// A space is at least about a quarter of the font size, so gaps this small
/// are kerning or split glyph runs.
const FRAGMENT_GAP_RATIO: f64 = 0.15;

/// Tolerances handed to the backend when it clusters glyphs into words.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordOptions {
    pub x_tolerance: f64,
    pub y_tolerance: f64,
}

impl Default for WordOptions {
    fn default() -> Self {
        WordOptions::from(&ExtractionConfig::default())
    }
}

impl From<&ExtractionConfig> for WordOptions {
    fn from(config: &ExtractionConfig) -> Self {
        WordOptions {
            x_tolerance: config.word_x_tolerance,
            y_tolerance: config.word_y_tolerance,
        }
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text lines and word tokens from PDF bytes, one PageContent per page.
    ///
    /// Words must come back in line-major reading order (see [`reading_order`]).
    fn extract_pages(
        &self,
        pdf_bytes: &[u8],
        options: &WordOptions,
    ) -> Result<Vec<PageContent>, PlanillaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// Reorder words line by line, top to bottom and left to right.
///
/// Words whose tops stay within `y_tolerance` of the first word of a line
/// belong to that line. Backends that emit words by text block use this to
/// restore the reading order the parsers expect.
pub fn reading_order(mut words: Vec<Word>, y_tolerance: f64) -> Vec<Word> {
    words.sort_by(|a, b| a.top.total_cmp(&b.top).then(a.x0.total_cmp(&b.x0)));

    let mut ordered = Vec::with_capacity(words.len());
    let mut line: Vec<Word> = Vec::new();
    let mut line_top = f64::NEG_INFINITY;
    for word in words {
        if word.top - line_top > y_tolerance {
            flush_line(&mut line, &mut ordered);
            line_top = word.top;
        }
        line.push(word);
    }
    flush_line(&mut line, &mut ordered);

    ordered
}

fn flush_line(line: &mut Vec<Word>, ordered: &mut Vec<Word>) {
    line.sort_by(|a, b| a.x0.total_cmp(&b.x0));
    ordered.append(line);
}

/// Merge word fragments that sit on the same line and nearly touch.
///
/// Consecutive fragments are joined (without a space) when their tops differ by
/// at most `y_tolerance` and the gap between them is at most `x_tolerance` and
/// at most a small fraction of the glyph height. Words the backend already
/// split at a space stay apart even in small print.
pub fn merge_fragments(words: Vec<Word>, options: &WordOptions) -> Vec<Word> {
    let mut merged: Vec<Word> = Vec::with_capacity(words.len());

    for word in words {
        if let Some(prev) = merged.last_mut() {
            let same_line = (word.top - prev.top).abs() <= options.y_tolerance;
            let gap = word.x0 - prev.x1;
            let height = (prev.bottom - prev.top).max(word.bottom - word.top);
            let max_gap = options.x_tolerance.min(height * FRAGMENT_GAP_RATIO);
            if same_line && word.x0 >= prev.x0 && gap <= max_gap {
                prev.text.push_str(&word.text);
                prev.x1 = prev.x1.max(word.x1);
                prev.bottom = prev.bottom.max(word.bottom);
                continue;
            }
        }
        merged.push(word);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x0: f64, x1: f64, top: f64) -> Word {
        Word {
            text: text.into(),
            x0,
            x1,
            top,
            bottom: top + 8.0,
        }
    }

    #[test]
    fn test_merge_touching_fragments() {
        let words = vec![
            word("DESCRIP", 80.0, 110.0, 50.0),
            word("CION", 110.5, 130.0, 50.4),
            word("BULTOS", 300.0, 330.0, 50.0),
        ];
        let merged = merge_fragments(words, &WordOptions::default());
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "DESCRIPCION");
        assert_eq!(merged[0].x0, 80.0);
        assert_eq!(merged[0].x1, 130.0);
        assert_eq!(merged[1].text, "BULTOS");
    }

    #[test]
    fn test_fragments_on_other_line_kept_apart() {
        let words = vec![word("12", 10.0, 20.0, 50.0), word("34", 20.5, 30.0, 60.0)];
        let merged = merge_fragments(words, &WordOptions::default());
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_space_separated_small_print_kept_apart() {
        // 6pt text: the space between words is under the 1.7pt tolerance.
        let small = |text: &str, x0: f64, x1: f64| Word {
            text: text.into(),
            x0,
            x1,
            top: 100.0,
            bottom: 106.0,
        };
        let words = vec![
            small("12345", 10.0, 30.0),
            small("Widget", 80.0, 98.0),
            small("Azul", 99.6, 112.0),
            small("7", 300.0, 303.0),
        ];
        let merged = merge_fragments(words, &WordOptions::default());
        let texts: Vec<&str> = merged.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["12345", "Widget", "Azul", "7"]);
    }

    #[test]
    fn test_gap_capped_by_x_tolerance() {
        let words = vec![
            word("AB", 10.0, 40.0, 50.0),
            word("CD", 40.5, 60.0, 50.0),
        ];
        let options = WordOptions {
            x_tolerance: 0.2,
            y_tolerance: 1.7,
        };
        assert_eq!(merge_fragments(words, &options).len(), 2);
    }

    #[test]
    fn test_reading_order_from_block_order() {
        // Label column emitted before the value column.
        let words = vec![
            word("Transporte:", 10.0, 60.0, 30.0),
            word("Fecha:", 10.0, 40.0, 45.0),
            word("EXPRESO", 150.0, 185.0, 30.4),
            word("SUR", 190.0, 205.0, 29.8),
            word("01/02", 150.0, 175.0, 45.0),
        ];
        let ordered = reading_order(words, 1.7);
        let texts: Vec<&str> = ordered.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["Transporte:", "EXPRESO", "SUR", "Fecha:", "01/02"]);
    }

    #[test]
    fn test_reading_order_keeps_separate_lines() {
        let words = vec![
            word("b", 10.0, 15.0, 60.0),
            word("a", 50.0, 55.0, 50.0),
            word("c", 5.0, 9.0, 61.0),
        ];
        let ordered = reading_order(words, 1.7);
        let texts: Vec<&str> = ordered.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_word_options_follow_config() {
        let config = ExtractionConfig {
            word_x_tolerance: 3.0,
            ..ExtractionConfig::default()
        };
        let options = WordOptions::from(&config);
        assert_eq!(options.x_tolerance, 3.0);
        assert_eq!(options.y_tolerance, 1.7);
    }
}

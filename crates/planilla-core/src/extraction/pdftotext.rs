use crate::error::PlanillaError;
use crate::extraction::{
    merge_fragments, reading_order, PageContent, PdfExtractor, Word, WordOptions,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Page text comes from `pdftotext -layout`, word positions from
/// `pdftotext -bbox`.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(
        &self,
        pdf_bytes: &[u8],
        options: &WordOptions,
    ) -> Result<Vec<PageContent>, PlanillaError> {
        if !has_pdf_marker(pdf_bytes) {
            return Err(PlanillaError::NotAPdf);
        }

        // Write PDF bytes to a temp file
        let mut tmpfile = tempfile::NamedTempFile::new()
            .map_err(|e| PlanillaError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| PlanillaError::Extraction(e.to_string()))?;
        let tmp_path = tmpfile.path().to_path_buf();

        let layout = run_pdftotext("-layout", &tmp_path)?;
        let bbox = run_pdftotext("-bbox", &tmp_path)?;

        // pdftotext uses form feed \x0c as page separator
        let page_texts: Vec<&str> = layout.split('\x0c').collect();
        let word_pages = parse_bbox_xml(&bbox)?;
        debug!(
            pages = word_pages.len(),
            text_pages = page_texts.len(),
            "pdftotext finished"
        );

        let pages = word_pages
            .into_iter()
            .enumerate()
            .map(|(i, words)| {
                // Blank padding lines from -layout would eat into the header window.
                let lines = page_texts
                    .get(i)
                    .map(|text| {
                        text.lines()
                            .filter(|l| !l.trim().is_empty())
                            .map(|l| l.to_string())
                            .collect()
                    })
                    .unwrap_or_default();
                PageContent {
                    page_number: i + 1,
                    lines,
                    // -bbox emits words by text block, not by printed line.
                    words: merge_fragments(reading_order(words, options.y_tolerance), options),
                }
            })
            .collect();

        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

/// PDF files start with `%PDF-`, possibly after a little leading junk.
fn has_pdf_marker(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    head.windows(5).any(|w| w == b"%PDF-")
}

fn run_pdftotext(mode: &str, pdf_path: &Path) -> Result<String, PlanillaError> {
    let output = Command::new("pdftotext")
        .arg(mode)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PlanillaError::PdftotextNotFound
            } else {
                PlanillaError::Extraction(format!("pdftotext {mode} failed: {e}"))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(PlanillaError::PdftotextFailed { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parse `pdftotext -bbox` XHTML into one word list per page.
fn parse_bbox_xml(xml: &str) -> Result<Vec<Vec<Word>>, PlanillaError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut pages: Vec<Vec<Word>> = Vec::new();
    let mut current_word: Option<Word> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| PlanillaError::Extraction(format!("invalid -bbox output: {e}")))?;

        match event {
            Event::Start(tag) if tag.name().as_ref() == b"page" => pages.push(Vec::new()),
            Event::Empty(tag) if tag.name().as_ref() == b"page" => pages.push(Vec::new()),
            Event::Start(tag) if tag.name().as_ref() == b"word" => {
                current_word = parse_word_bbox(&tag);
            }
            Event::Text(text) => {
                if let Some(word) = current_word.as_mut() {
                    let decoded = text.unescape().map_err(|e| {
                        PlanillaError::Extraction(format!("invalid -bbox output: {e}"))
                    })?;
                    word.text.push_str(&decoded);
                }
            }
            Event::End(tag) if tag.name().as_ref() == b"word" => {
                if let (Some(mut word), Some(page)) = (current_word.take(), pages.last_mut()) {
                    word.text = word.text.trim().to_string();
                    if !word.text.is_empty() {
                        page.push(word);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn parse_word_bbox(tag: &BytesStart<'_>) -> Option<Word> {
    Some(Word {
        text: String::new(),
        x0: parse_attr_f64(tag, "xMin")?,
        x1: parse_attr_f64(tag, "xMax")?,
        top: parse_attr_f64(tag, "yMin")?,
        bottom: parse_attr_f64(tag, "yMax")?,
    })
}

fn parse_attr_f64(tag: &BytesStart<'_>, name: &str) -> Option<f64> {
    let attr = tag.try_get_attribute(name).ok()??;
    let value = attr.unescape_value().ok()?;
    value.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BBOX_XML: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
<title></title>
<meta name="Producer" content="GPL Ghostscript"/>
<meta http-equiv="Content-Type" content="text/html; charset=UTF-8"/>
</head>
<body>
<doc>
  <page width="595.000000" height="842.000000">
    <word xMin="10.000000" yMin="50.100000" xMax="28.000000" yMax="58.000000">SKU</word>
    <word xMin="80.000000" yMin="50.000000" xMax="140.000000" yMax="58.000000">Descripción</word>
    <word xMin="150.000000" yMin="70.000000" xMax="170.000000" yMax="78.000000">A&amp;B</word>
  </page>
  <page width="595.000000" height="842.000000">
  </page>
</doc>
</body>
</html>
"#;

    #[test]
    fn test_parse_bbox_xml_words() {
        let pages = parse_bbox_xml(BBOX_XML).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 3);
        assert_eq!(pages[0][0].text, "SKU");
        assert_eq!(pages[0][0].x0, 10.0);
        assert_eq!(pages[0][0].top, 50.1);
        assert_eq!(pages[0][1].text, "Descripción");
        assert_eq!(pages[0][1].x1, 140.0);
        assert_eq!(pages[0][2].text, "A&B");
        assert!(pages[1].is_empty());
    }

    #[test]
    fn test_word_without_coordinates_dropped() {
        let xml = r#"<doc><page><word xMin="1.0">X</word><word xMin="1" yMin="2" xMax="3" yMax="4">Y</word></page></doc>"#;
        let pages = parse_bbox_xml(xml).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 1);
        assert_eq!(pages[0][0].text, "Y");
    }

    #[test]
    fn test_pdf_marker() {
        assert!(has_pdf_marker(b"%PDF-1.7\n%..."));
        assert!(has_pdf_marker(b"\r\n%PDF-1.4"));
        assert!(!has_pdf_marker(b"PK\x03\x04 not a pdf"));
        assert!(!has_pdf_marker(b""));
    }

    #[test]
    fn test_non_pdf_rejected_before_running_pdftotext() {
        let err = PdftotextExtractor::new()
            .extract_pages(b"hello", &WordOptions::default())
            .unwrap_err();
        assert!(matches!(err, PlanillaError::NotAPdf));
    }
}

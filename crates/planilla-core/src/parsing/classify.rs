use super::normalize::{collapse_whitespace, normalize_upper};

const TARGET_TITLE: &str = "PLANILLA DE CARGA";

/// Look-alike documents whose tables must never be parsed.
const REJECTED_TITLES: [&str; 2] = ["COMPOSICION DE CARGA", "PLANILLA ADMINISTRATIVA"];

/// Decide whether a page is a planilla de carga by looking at its first
/// `header_lines` lines of text.
pub fn is_planilla_page(page_text: &str, header_lines: usize) -> bool {
    if page_text.trim().is_empty() {
        return false;
    }

    let head: Vec<&str> = page_text.lines().take(header_lines).collect();
    let head = collapse_whitespace(&normalize_upper(&head.join(" ")));

    head.contains(TARGET_TITLE) && !REJECTED_TITLES.iter().any(|t| head.contains(t))
}

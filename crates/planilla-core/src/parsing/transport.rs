use super::normalize::normalize;
use crate::extraction::Word;

/// Labels that start the next header field after the transport value.
const STOP_LABELS: [&str; 2] = ["CHOFER", "KM"];

/// Read the carrier label printed after "Transporte" on the page header.
///
/// Takes up to `max_tokens` words after the label that stay within
/// `line_tol` of its vertical position, stopping at the next field label.
pub fn extract_transporte(words: &[Word], line_tol: f64, max_tokens: usize) -> Option<String> {
    let anchor_idx = words
        .iter()
        .position(|w| normalize(w.text.trim()).to_lowercase().starts_with("transporte"))?;
    let anchor_top = words[anchor_idx].top;

    let mut parts: Vec<&str> = Vec::new();
    for word in words.iter().skip(anchor_idx + 1).take(max_tokens) {
        if (word.top - anchor_top).abs() > line_tol {
            break;
        }

        let text = word.text.trim();
        let label = normalize(text).to_uppercase();
        if STOP_LABELS.contains(&label.trim_end_matches(':')) {
            break;
        }
        if text.is_empty() || text.ends_with(':') {
            continue;
        }
        parts.push(text);
    }

    let value = parts.join(" ");
    let value = value.trim_end_matches(['|', ' ']);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::reading_order;

    fn header(tokens: &[(&str, f64, f64)]) -> Vec<Word> {
        tokens
            .iter()
            .map(|(t, x, top)| Word::new(*t, *x, *top))
            .collect()
    }

    #[test]
    fn test_value_stops_at_chofer() {
        let words = header(&[
            ("Transporte:", 10.0, 40.0),
            ("EXPRESO", 60.0, 40.0),
            ("SUR", 100.0, 40.2),
            ("|", 120.0, 40.0),
            ("Chofer:", 140.0, 40.0),
            ("PEREZ", 180.0, 40.0),
        ]);
        assert_eq!(
            extract_transporte(&words, 5.0, 24).as_deref(),
            Some("EXPRESO SUR")
        );
    }

    #[test]
    fn test_value_stops_when_leaving_the_line() {
        let words = header(&[
            ("TRANSPORTE", 10.0, 40.0),
            (":", 58.0, 40.0),
            ("CAMION", 60.0, 41.0),
            ("12", 95.0, 41.0),
            ("SKU", 10.0, 80.0),
        ]);
        assert_eq!(
            extract_transporte(&words, 5.0, 24).as_deref(),
            Some("CAMION 12")
        );
    }

    #[test]
    fn test_value_stops_at_km() {
        let words = header(&[
            ("Transporte", 10.0, 40.0),
            ("FLETES", 60.0, 40.0),
            ("ROJAS", 90.0, 40.0),
            ("KM", 130.0, 40.0),
            ("1200", 150.0, 40.0),
        ]);
        assert_eq!(
            extract_transporte(&words, 5.0, 24).as_deref(),
            Some("FLETES ROJAS")
        );
    }

    #[test]
    fn test_token_budget() {
        let mut tokens = vec![("Transporte:", 10.0, 40.0)];
        let names = ["A1", "B2", "C3", "D4"];
        for (i, n) in names.iter().enumerate() {
            tokens.push((*n, 60.0 + 20.0 * i as f64, 40.0));
        }
        let words = header(&tokens);
        assert_eq!(extract_transporte(&words, 5.0, 2).as_deref(), Some("A1 B2"));
    }

    #[test]
    fn test_accented_anchor() {
        let words = header(&[("Tránsporte:", 10.0, 40.0), ("LOGISUR", 60.0, 40.0)]);
        assert_eq!(
            extract_transporte(&words, 5.0, 24).as_deref(),
            Some("LOGISUR")
        );
    }

    #[test]
    fn test_block_ordered_words_after_reading_order() {
        let words = header(&[
            ("Transporte:", 10.0, 30.0),
            ("Fecha:", 10.0, 45.0),
            ("EXPRESO", 150.0, 30.0),
            ("SUR", 190.0, 30.0),
        ]);
        assert_eq!(extract_transporte(&words, 5.0, 24), None);

        let words = reading_order(words, 1.7);
        assert_eq!(
            extract_transporte(&words, 5.0, 24).as_deref(),
            Some("EXPRESO SUR")
        );
    }

    #[test]
    fn test_missing_anchor_or_value() {
        let words = header(&[("Chofer:", 10.0, 40.0), ("PEREZ", 60.0, 40.0)]);
        assert_eq!(extract_transporte(&words, 5.0, 24), None);

        let words = header(&[("Transporte:", 10.0, 40.0), ("|", 60.0, 40.0)]);
        assert_eq!(extract_transporte(&words, 5.0, 24), None);
    }
}

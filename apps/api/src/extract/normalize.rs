//! Document text normalizer — turns raw extracted text into clean,
//! structurally-annotated plain text for prompt embedding.
//!
//! Single forward pass over input lines: headings get isolated by a blank
//! line, list items pass through verbatim, soft-wrapped prose is re-joined,
//! and runs of blank lines collapse to one. Lossy by design; the goal is
//! readability for the downstream prompt, not fidelity to original layout.

const BULLET_GLYPHS: [char; 4] = ['-', '*', '•', '–'];
const SENTENCE_TERMINALS: [char; 4] = ['.', ':', '?', '!'];

pub fn normalize_extracted_text(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for line in text.lines() {
        let stripped = line.trim();

        if stripped.is_empty() {
            // collapse multiple blanks into one
            if out.last().is_some_and(|prev| !prev.is_empty()) {
                out.push(String::new());
            }
            continue;
        }

        // force a break before ALL-CAPS headings or lines ending with a colon
        if is_heading(stripped) {
            if out.last().is_some_and(|prev| !prev.is_empty()) {
                out.push(String::new());
            }
            out.push(stripped.to_string());
            continue;
        }

        if stripped.starts_with(BULLET_GLYPHS) {
            out.push(stripped.to_string());
            continue;
        }

        // continuation of the previous paragraph?
        match out.last_mut() {
            Some(prev) if !prev.is_empty() && !prev.ends_with(SENTENCE_TERMINALS) => {
                prev.push(' ');
                prev.push_str(stripped);
            }
            _ => out.push(stripped.to_string()),
        }
    }

    out.join("\n").trim().to_string()
}

/// A heading is an entirely-uppercase line (at least one letter, none
/// lowercase) or any line ending with a colon.
fn is_heading(line: &str) -> bool {
    let all_caps =
        line.chars().any(|c| c.is_uppercase()) && !line.chars().any(|c| c.is_lowercase());
    all_caps || line.ends_with(':')
}

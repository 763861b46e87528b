//! Input sanitizer — defangs raw text before it reaches prompt construction.
//!
//! Every piece of user-supplied text (resume text, job descriptions, form
//! fields) passes through `sanitize_input` before any downstream stage sees
//! it. The function is total: it never fails, for any input including the
//! empty string.

use std::sync::LazyLock;

use regex::Regex;

/// Default cap on input length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 50_000;

/// C0 (0x00–0x1F, 0x7F) and C1 (0x80–0x9F) control characters.
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1F\x7F-\x9F]").expect("valid control-char class"));

/// Literal sequences that can break prompt structure or code fences.
/// Longest sequences first so the scanner matches them before their prefixes.
const PROMPT_SEQUENCES: &[&str] = &["```", "\"\"\"", "'''", "`", "{", "}", "$", "\\"];

/// Sanitizes untrusted text for safe prompt embedding.
///
/// Steps, in order:
/// 1. Truncate to `max_length` characters (no word-boundary awareness).
/// 2. Remove C0/C1 control characters.
/// 3. HTML-escape `<`, `>`, `&` and quotes.
/// 4. Backslash-escape prompt-breaking sequences (fences, triple quotes,
///    backticks, braces, `$`, `\`).
///
/// HTML-escaping runs before sequence-escaping: the `&` it introduces is not
/// in the protected set, so the two passes never double-process each other.
pub fn sanitize_input(text: &str, max_length: usize) -> String {
    let truncated: String = text.chars().take(max_length).collect();
    let cleaned = CONTROL_CHARS.replace_all(&truncated, "");
    let escaped = html_escape(&cleaned);
    escape_prompt_sequences(&escaped)
}

fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Single forward scan: each occurrence of a protected sequence becomes the
/// sequence with a backslash before every character (`{` → `\{`, ``` ``` ```
/// → `` \`\`\` ``). Each occurrence is escaped exactly once; backslashes
/// inserted here are never re-escaped.
fn escape_prompt_sequences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'scan: while let Some(ch) = rest.chars().next() {
        for seq in PROMPT_SEQUENCES {
            if let Some(tail) = rest.strip_prefix(seq) {
                for seq_ch in seq.chars() {
                    out.push('\\');
                    out.push(seq_ch);
                }
                rest = tail;
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitize(text: &str) -> String {
        sanitize_input(text, DEFAULT_MAX_LENGTH)
    }

    #[test]
    fn test_truncates_to_max_length() {
        let long = "a".repeat(100);
        assert_eq!(sanitize_input(&long, 10).chars().count(), 10);
    }

    #[test]
    fn test_truncates_by_chars_not_bytes() {
        let long = "é".repeat(100);
        assert_eq!(sanitize_input(&long, 10).chars().count(), 10);
    }

    #[test]
    fn test_removes_control_characters() {
        let result = sanitize("hello\x00world\x1f\x7f\u{85}!");
        assert_eq!(result, "helloworld!");
    }

    #[test]
    fn test_html_escapes_angle_brackets() {
        assert_eq!(sanitize("<script>"), "&lt;script&gt;");
    }

    #[test]
    fn test_escapes_single_brace_once() {
        assert_eq!(sanitize("{"), "\\{");
        assert_eq!(sanitize("}"), "\\}");
    }

    #[test]
    fn test_escapes_code_fence_per_character() {
        // A 3-character sequence yields 3 backslash-prefixed characters.
        assert_eq!(sanitize("```"), "\\`\\`\\`");
    }

    #[test]
    fn test_escapes_dollar_and_backslash() {
        assert_eq!(sanitize("$PATH"), "\\$PATH");
        assert_eq!(sanitize("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_quotes_are_html_escaped_before_sequence_pass() {
        // `"""` becomes three `&quot;` entities, so the triple-quote sequence
        // never survives to the escaping pass.
        assert_eq!(sanitize("\"\"\""), "&quot;&quot;&quot;");
    }

    #[test]
    fn test_empty_string_is_identity() {
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_resanitize_leaves_no_unescaped_sequences() {
        let twice = sanitize(&sanitize("```{x}$`\\ \x01<b>"));
        assert!(!CONTROL_CHARS.is_match(&twice));
        // Every protected character is preceded by a backslash.
        let bytes = twice.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if matches!(b, b'`' | b'{' | b'}' | b'$') {
                assert_eq!(bytes[i - 1], b'\\', "unescaped {:?} at {} in {}", b as char, i, twice);
            }
        }
    }

    #[test]
    fn test_length_bounded_by_max_plus_expansion() {
        // Worst case expansion: every char escaped to 2 or entity-expanded to 6.
        let input = "{".repeat(20);
        let result = sanitize_input(&input, 10);
        assert!(result.chars().count() <= 10 * 6);
    }
}

//! Line tokenizer.
//!
//! Splits one delimited line into raw fields. A `"` toggles quoted mode and
//! is dropped; a doubled `""` inside a quoted span is kept verbatim so the
//! caller can unescape it with [`unescape_quotes`]. Malformed quoting never
//! fails: an unterminated quote makes the rest of the line literal.

/// Fields of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    /// Exactly `max_fields` entries, padded with empty strings.
    pub fields: Vec<String>,
    /// Number of fields present in the source line, including any past the cap.
    pub observed: usize,
}

impl Tokenized {
    /// Returns true when the source line had exactly `expected` fields.
    pub fn has_field_count(&self, expected: usize) -> bool {
        self.observed == expected
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

/// Split `line` on `delimiter`, keeping at most `max_fields` fields.
pub fn tokenize(line: &str, delimiter: char, max_fields: usize) -> Tokenized {
    let max_fields = max_fields.max(1);
    let mut fields: Vec<String> = Vec::with_capacity(max_fields);
    let mut current = String::new();
    let mut in_quotes = false;
    let mut observed = 1;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        let open = fields.len() < max_fields;
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                if open {
                    current.push_str("\"\"");
                }
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                observed += 1;
                if open {
                    fields.push(std::mem::take(&mut current));
                }
            }
            c => {
                if open {
                    current.push(c);
                }
            }
        }
    }

    if fields.len() < max_fields {
        fields.push(current);
    }
    fields.resize(max_fields, String::new());

    Tokenized { fields, observed }
}

/// Returns true if `line` starts with `token` (case-insensitive), ignoring a BOM
/// and leading whitespace.
pub fn is_header_line(line: &str, token: &str) -> bool {
    let trimmed = line.trim_start_matches('\u{feff}').trim_start();
    trimmed
        .get(..token.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(token))
}

/// Replace doubled quotes with a single quote.
pub fn unescape_quotes(value: &str) -> String {
    value.replace("\"\"", "\"")
}

/// Remove one pair of enclosing quotes, if present.
pub fn strip_enclosing_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_simple() {
        let result = tokenize("a,b,c", ',', 3);
        assert_eq!(result.fields, vec!["a", "b", "c"]);
        assert_eq!(result.observed, 3);
    }

    #[test]
    fn test_tokenize_quoted_delimiter() {
        let result = tokenize("\"hello, world\",b,c", ',', 3);
        assert_eq!(result.fields, vec!["hello, world", "b", "c"]);
        assert!(result.has_field_count(3));
    }

    #[test]
    fn test_tokenize_keeps_doubled_quotes() {
        let result = tokenize("\"he said \"\"hi\"\"\",b", ',', 2);
        assert_eq!(result.fields[0], "he said \"\"hi\"\"");
        assert_eq!(unescape_quotes(&result.fields[0]), "he said \"hi\"");
    }

    #[test]
    fn test_tokenize_pads_short_line() {
        let result = tokenize("a,b", ',', 4);
        assert_eq!(result.fields, vec!["a", "b", "", ""]);
        assert_eq!(result.observed, 2);
    }

    #[test]
    fn test_tokenize_caps_long_line() {
        let result = tokenize("1,2,3,4,5", ',', 3);
        assert_eq!(result.fields, vec!["1", "2", "3"]);
        assert_eq!(result.observed, 5);
    }

    #[test]
    fn test_tokenize_unterminated_quote() {
        let result = tokenize("a,\"b,c,d", ',', 3);
        assert_eq!(result.fields, vec!["a", "b,c,d", ""]);
        assert_eq!(result.observed, 2);
    }

    #[test]
    fn test_tokenize_other_delimiter() {
        let result = tokenize("a;b,c;d", ';', 3);
        assert_eq!(result.fields, vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_tokenize_empty_line() {
        let result = tokenize("", ',', 2);
        assert_eq!(result.fields, vec!["", ""]);
        assert_eq!(result.observed, 1);
    }

    #[test]
    fn test_is_header_line() {
        assert!(is_header_line("valence,year,acousticness", "valence"));
        assert!(is_header_line("\u{feff}Valence,year", "valence"));
        assert!(!is_header_line("0.5,1969", "valence"));
        assert!(!is_header_line("val", "valence"));
    }

    #[test]
    fn test_strip_enclosing_quotes() {
        assert_eq!(strip_enclosing_quotes("\"abc\""), "abc");
        assert_eq!(strip_enclosing_quotes("\"abc"), "\"abc");
        assert_eq!(strip_enclosing_quotes("\""), "\"");
        assert_eq!(strip_enclosing_quotes("abc"), "abc");
    }
}

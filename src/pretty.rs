//! Whitespace-aware JSON re-indenter.
//!
//! Re-formats a compact JSON string for readability with a single
//! left-to-right character scan. No JSON tree is built: the scanner only
//! tracks whether it is inside a string literal (so structural characters
//! embedded in strings are left alone) and the current nesting depth (to
//! compute indentation). Output uses one tab per nesting level and `\n`
//! line endings.
//!
//! The formatter is lossless with respect to structural content: stripping
//! the inserted whitespace yields the input again.

const INDENT: char = '\t';
const NEWLINE: char = '\n';

/// Re-indent a compact JSON document.
///
/// Rules, per input character:
/// - `}` / `]` outside a string: newline and dedent before the character.
/// - `,` / `{` / `[` outside a string: newline after the character, indenting
///   one level deeper for the openers.
/// - everything else is copied through verbatim.
///
/// Quote state toggles on unescaped `"`; escape detection tracks backslash
/// parity, so a string ending in a literal backslash (`"a\\"`) does not
/// leave the scanner stuck inside a string.
pub fn reindent(compact: &str) -> String {
    let mut out = String::with_capacity(compact.len() * 2);
    let mut depth: usize = 0;
    let mut in_string = false;
    let mut escaped = false;

    for c in compact.chars() {
        if c == '"' && !escaped {
            in_string = !in_string;
            out.push(c);
        } else if (c == '}' || c == ']') && !in_string {
            out.push(NEWLINE);
            depth = depth.saturating_sub(1);
            push_indent(&mut out, depth);
            out.push(c);
        } else {
            out.push(c);
        }

        if (c == ',' || c == '{' || c == '[') && !in_string {
            out.push(NEWLINE);
            if c == '{' || c == '[' {
                depth += 1;
            }
            push_indent(&mut out, depth);
        }

        escaped = in_string && c == '\\' && !escaped;
    }

    out
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drop the whitespace `reindent` inserts (it only ever adds `\n` and
    /// `\t` outside string literals, and the compact input contains neither).
    fn strip_inserted(formatted: &str) -> String {
        formatted.chars().filter(|c| *c != '\n' && *c != '\t').collect()
    }

    #[test]
    fn test_simple_object() {
        assert_eq!(reindent(r#"{"a":1}"#), "{\n\t\"a\":1\n}");
    }

    #[test]
    fn test_nested_object_and_array() {
        let compact = r#"{"a":{"b":[1,2]},"c":3}"#;
        let expected = "{\n\t\"a\":{\n\t\t\"b\":[\n\t\t\t1,\n\t\t\t2\n\t\t]\n\t},\n\t\"c\":3\n}";
        assert_eq!(reindent(compact), expected);
    }

    #[test]
    fn test_structural_chars_inside_string_left_alone() {
        let compact = r#"{"msg":"a,b{c}[d]"}"#;
        let formatted = reindent(compact);
        // the string literal must survive on a single line
        assert!(formatted.contains(r#""a,b{c}[d]""#));
        assert_eq!(strip_inserted(&formatted), compact);
    }

    #[test]
    fn test_escaped_quote_and_comma_round_trip() {
        let compact = r#"{"outer":[{"msg":"say \"hi, there\"","n":1}],"k":{}}"#;
        let formatted = reindent(compact);

        assert_eq!(strip_inserted(&formatted), compact);

        // formatting is valid JSON whitespace, so both sides parse equal
        let before: serde_json::Value = serde_json::from_str(compact).unwrap();
        let after: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_string_ending_in_escaped_backslash() {
        // "a\\" is a two-character escape for one backslash; the closing
        // quote after it must still terminate the string
        let compact = r#"{"p":"a\\","q":2}"#;
        let formatted = reindent(compact);
        assert_eq!(strip_inserted(&formatted), compact);
        assert!(formatted.contains(",\n"));
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(reindent("{}"), "{\n\t\n}");
        assert_eq!(reindent("[]"), "[\n\t\n]");
    }

    #[test]
    fn test_terminates_cleanly_on_trailing_structural_char() {
        // ends exactly on a closer; nothing is read past the input
        let formatted = reindent(r#"[[1]]"#);
        assert!(formatted.ends_with(']'));
        assert_eq!(strip_inserted(&formatted), "[[1]]");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(reindent(""), "");
    }

    #[test]
    fn test_realistic_dump_parses_back() {
        let snapshot = serde_json::json!({
            "build": {
                "description": "compile step",
                "start": 100.0,
                "end": 100.8,
                "time": "800.000",
                "checkpoints": [
                    {"description": "parsed", "end": 100.25, "timeFromStart": "0.250"},
                    {"description": null, "end": 100.5, "timeFromStart": "0.500",
                     "timeFromLastCheckpoint": "0.250"}
                ]
            }
        });
        let compact = serde_json::to_string(&snapshot).unwrap();
        let formatted = reindent(&compact);

        let reparsed: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(reparsed, snapshot);
        // every nesting level shows up on its own indented line
        assert!(formatted.contains("\n\t\"build\":{"));
        assert!(formatted.contains("\n\t\t\"checkpoints\":["));
    }
}

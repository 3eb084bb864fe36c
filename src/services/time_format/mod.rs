//! Start-time labels for timed events.
//!
//! Hosts configure the label with a Moment-style pattern ("HH:mm",
//! "hh:mm A", "hA"). The pattern is compiled once into a chrono strftime
//! string; unknown letters are copied through literally and `[...]`
//! brackets escape literal text.

use chrono::NaiveDateTime;

/// Formats the start time shown in front of a timed event's title.
#[cfg_attr(test, mockall::automock)]
pub trait TimeLabelFormatter {
    fn format_time(&self, start: NaiveDateTime) -> String;
}

/// Formatter driven by a Moment-style pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFormatter {
    pattern: String,
    strftime: String,
}

impl PatternFormatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let strftime = translate_pattern(&pattern);
        Self { pattern, strftime }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl TimeLabelFormatter for PatternFormatter {
    fn format_time(&self, start: NaiveDateTime) -> String {
        start.format(&self.strftime).to_string()
    }
}

// Longest tokens first so "HH" wins over "H".
const TOKENS: [(&str, &str); 10] = [
    ("HH", "%H"),
    ("hh", "%I"),
    ("mm", "%M"),
    ("ss", "%S"),
    ("H", "%-H"),
    ("h", "%-I"),
    ("m", "%-M"),
    ("s", "%-S"),
    ("A", "%p"),
    ("a", "%P"),
];

fn translate_pattern(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    'outer: while let Some(c) = rest.chars().next() {
        if c == '[' {
            let literal_end = rest.find(']');
            if let Some(end) = literal_end {
                push_literal(&mut out, &rest[1..end]);
                rest = &rest[end + 1..];
                continue;
            }
        }

        for (token, spec) in TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = tail;
                continue 'outer;
            }
        }

        push_literal(&mut out, &rest[..c.len_utf8()]);
        rest = &rest[c.len_utf8()..];
    }

    out
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        if c == '%' {
            out.push_str("%%");
        } else {
            out.push(c);
        }
    }
}

//! Characters that must be escaped so text reads back as text.
//!
//! Each [`Unsafe`] entry names a character, whether it is only dangerous at
//! the start of a line, and optionally what has to follow it. The default
//! table covers the block syntax of this crate's own parser; extensions add
//! their own entries (front matter registers the first character of every
//! opening fence).

use std::sync::OnceLock;

use regex::Regex;

/// One entry in the escaping table.
#[derive(Debug, Clone)]
pub struct Unsafe {
    pub character: char,
    /// Only unsafe at the start of a line.
    pub at_break: bool,
    after: Option<Regex>,
}

impl Unsafe {
    /// Unsafe at the start of a line.
    pub fn at_break(character: char) -> Self {
        Self {
            character,
            at_break: true,
            after: None,
        }
    }

    /// Unsafe wherever it appears.
    pub fn anywhere(character: char) -> Self {
        Self {
            character,
            at_break: false,
            after: None,
        }
    }

    /// Only unsafe when the text after it matches `pattern`.
    pub fn followed_by(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.after = Some(Regex::new(&format!("^(?:{pattern})"))?);
        Ok(self)
    }

    fn matches(&self, character: char, rest: &str, line_start: bool) -> bool {
        self.character == character
            && (line_start || !self.at_break)
            && self.after.as_ref().is_none_or(|after| after.is_match(rest))
    }
}

/// The escaping table for the built-in block syntax.
pub fn default_unsafe() -> &'static [Unsafe] {
    static DEFAULT: OnceLock<Vec<Unsafe>> = OnceLock::new();
    DEFAULT.get_or_init(|| {
        let followed = |entry: Unsafe, pattern: &str| {
            entry
                .followed_by(pattern)
                .expect("Invalid default unsafe pattern")
        };
        vec![
            Unsafe::at_break('#'),
            Unsafe::at_break('>'),
            // Leading whitespace is stripped by the paragraph parser
            Unsafe::at_break(' '),
            Unsafe::at_break('\t'),
            followed(Unsafe::at_break('-'), r"[ \t\r\n]|$|-"),
            followed(Unsafe::at_break('*'), r"[ \t\r\n]|$|\*"),
            followed(Unsafe::at_break('+'), r"[ \t\r\n]|$"),
            followed(Unsafe::at_break('`'), r"``"),
            followed(Unsafe::at_break('~'), r"~~"),
            followed(Unsafe::anywhere('\\'), r"[!-/:-@\[-`{-~]"),
            followed(Unsafe::anywhere('&'), r"#?[A-Za-z0-9]+;"),
        ]
    })
}

/// Escape `value` against `table`. When `at_break` is false the first
/// character is not treated as a line start.
pub fn safe(value: &str, table: &[Unsafe], at_break: bool) -> String {
    let mut out = String::with_capacity(value.len());
    let mut line_start = at_break;

    for (index, character) in value.char_indices() {
        let rest = &value[index + character.len_utf8()..];
        if table
            .iter()
            .any(|entry| entry.matches(character, rest, line_start))
        {
            escape_into(&mut out, character);
        } else {
            out.push(character);
        }
        line_start = matches!(character, '\n' | '\r');
    }

    out
}

/// ASCII punctuation gets a backslash, anything else a numeric character
/// reference.
fn escape_into(out: &mut String, character: char) {
    if character.is_ascii_punctuation() {
        out.push('\\');
        out.push(character);
    } else {
        out.push_str(&format!("&#x{:X};", u32::from(character)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("plain text", "plain text")]
    #[case("# not a heading", "\\# not a heading")]
    #[case("a # b", "a # b")]
    #[case("> quote", "\\> quote")]
    #[case("- item", "\\- item")]
    #[case("---", "\\---")]
    #[case("-x", "-x")]
    #[case("* item", "\\* item")]
    #[case("***", "\\***")]
    #[case("+ item", "\\+ item")]
    #[case("+++", "+++")]
    #[case("```", "\\```")]
    #[case("``", "``")]
    #[case("~~~", "\\~~~")]
    #[case("a\\*b", "a\\\\*b")]
    #[case("a\\b", "a\\b")]
    #[case("&amp;", "\\&amp;")]
    #[case("a & b", "a & b")]
    #[case(" lead", "&#x20;lead")]
    #[case("one\n# two", "one\n\\# two")]
    #[case("one\r# two", "one\r\\# two")]
    #[case("one\r\n> two", "one\r\n\\> two")]
    fn default_table(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(safe(value, default_unsafe(), true), expected);
    }

    #[test]
    fn not_at_break_skips_line_start_rules() {
        assert_eq!(safe("# x", default_unsafe(), false), "# x");
        assert_eq!(safe("x\n# y", default_unsafe(), false), "x\n\\# y");
    }

    #[test]
    fn non_punctuation_uses_character_reference() {
        let table = [Unsafe::at_break('a'), Unsafe::at_break('«')];
        assert_eq!(safe("abc", &table, true), "&#x61;bc");
        assert_eq!(safe("«x»", &table, true), "&#xAB;x»");
    }

    #[test]
    fn followed_by_is_anchored() {
        let entry = Unsafe::anywhere('x').followed_by("y").unwrap();
        assert_eq!(safe("xy zxy xzy", &[entry], true), "&#x78;y z&#x78;y xzy");
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(Unsafe::anywhere('x').followed_by("(").is_err());
    }
}

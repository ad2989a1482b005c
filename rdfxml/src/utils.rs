pub fn is_name(name: &str) -> bool {
    // NameStartChar (NameChar)*
    let mut c = name.chars();
    if !c.next().is_some_and(is_name_start_char) {
        return false;
    }
    c.all(is_name_char)
}

pub fn is_nc_name(name: &str) -> bool {
    // Name - (Char* ':' Char*)
    is_name(name) && !name.contains(':')
}

pub fn is_name_start_char(c: char) -> bool {
    // ":" | [A-Z] | "_" | [a-z] | [#xC0-#xD6] | [#xD8-#xF6] | [#xF8-#x2FF] | [#x370-#x37D] | [#x37F-#x1FFF] | [#x200C-#x200D] | [#x2070-#x218F] | [#x2C00-#x2FEF] | [#x3001-#xD7FF] | [#xF900-#xFDCF] | [#xFDF0-#xFFFD] | [#x10000-#xEFFFF]
    matches!(c,
        ':'
        | 'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

pub fn is_name_char(c: char) -> bool {
    // NameStartChar | "-" | "." | [0-9] | #xB7 | [#x0300-#x036F] | [#x203F-#x2040]
    is_name_start_char(c)
        || matches!(c,  '-' | '.' | '0'..='9' | '\u{B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

pub fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}

pub fn is_utf8(encoding: &[u8]) -> bool {
    matches!(
        encoding.to_ascii_lowercase().as_slice(),
        b"unicode-1-1-utf-8"
            | b"unicode11utf8"
            | b"unicode20utf8"
            | b"utf-8"
            | b"utf8"
            | b"x-unicode20utf8"
    )
}

/// Tracks a `line`/`column`/byte-`offset` cursor across successive chunks of raw input bytes,
/// so parse errors can carry a human-readable location when position tracking is enabled.
///
/// Lines are counted from 0 and split on `\n`; columns are counted from 0, in Unicode scalar
/// values, and reset at the start of each line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionTracker {
    line: u64,
    column: u64,
    offset: u64,
}

impl PositionTracker {
    pub fn position(&self) -> crate::error::TextPosition {
        crate::error::TextPosition {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }

    /// Advances the cursor past `bytes`, assumed to be the raw (not yet decoded) content that
    /// was just consumed from the input.
    pub fn advance(&mut self, bytes: &[u8]) {
        self.offset += bytes.len() as u64;
        for c in String::from_utf8_lossy(bytes).chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nc_name_rejects_colon() {
        assert!(is_nc_name("foo"));
        assert!(!is_nc_name("foo:bar"));
        assert!(!is_nc_name("1foo"));
        assert!(!is_nc_name(""));
    }

    #[test]
    fn position_tracker_counts_lines_and_columns() {
        let mut tracker = PositionTracker::default();
        tracker.advance(b"abc\ndef");
        let position = tracker.position();
        assert_eq!(position.line, 1);
        assert_eq!(position.column, 3);
        assert_eq!(position.offset, 7);
    }
}

//! Line-boundary detection.
//!
//! [`LineBuffer`] accumulates text until a line terminator is seen and hands every completed line to
//! an `emit` callback. Recognized terminators are `\n`, `\r\n` and a lone `\r`. A `\r\n` pair that
//! is split across two pushes still ends only one line.

use std::str;

/// Accumulates text and splits it into lines.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    line: String,

    /// The last terminator seen was a `\r`, a directly following `\n` belongs to it.
    after_carriage_return: bool,

    /// Bytes of an incomplete UTF-8 sequence at the end of the last [`push_bytes`](Self::push_bytes).
    incomplete_utf8: Vec<u8>,

    skip_empty_lines: bool,
}

impl LineBuffer {
    pub(crate) fn new(skip_empty_lines: bool) -> Self {
        Self {
            skip_empty_lines,
            ..Self::default()
        }
    }

    /// Returns the text of the current, not yet terminated, line.
    pub(crate) fn pending(&self) -> &str {
        &self.line
    }

    /// Appends `text`, calling `emit` once per completed line.
    pub(crate) fn push_str(&mut self, text: &str, mut emit: impl FnMut(&str)) {
        let mut rest = text;
        while let Some(index) = rest.find(['\r', '\n']) {
            let (segment, tail) = rest.split_at(index);
            let terminator = tail.as_bytes()[0];
            rest = &tail[1..];

            if segment.is_empty() && terminator == b'\n' && self.after_carriage_return {
                self.after_carriage_return = false;
                continue;
            }

            self.line.push_str(segment);
            self.end_line(&mut emit);
            self.after_carriage_return = terminator == b'\r';
        }

        if !rest.is_empty() {
            self.after_carriage_return = false;
            self.line.push_str(rest);
        }
    }

    /// Appends raw bytes, decoding them as UTF-8.
    ///
    /// Sequences split across calls are reassembled, invalid sequences are replaced with
    /// U+FFFD.
    pub(crate) fn push_bytes(&mut self, bytes: &[u8], mut emit: impl FnMut(&str)) {
        let joined;
        let mut input = if self.incomplete_utf8.is_empty() {
            bytes
        } else {
            self.incomplete_utf8.extend_from_slice(bytes);
            joined = std::mem::take(&mut self.incomplete_utf8);
            &joined[..]
        };

        loop {
            match str::from_utf8(input) {
                Ok(text) => {
                    self.push_str(text, &mut emit);
                    return;
                }
                Err(error) => {
                    let (valid, rest) = input.split_at(error.valid_up_to());
                    self.push_str(str::from_utf8(valid).unwrap_or_default(), &mut emit);

                    match error.error_len() {
                        Some(invalid) => {
                            self.push_str("\u{FFFD}", &mut emit);
                            input = &rest[invalid..];
                        }
                        None => {
                            self.incomplete_utf8.extend_from_slice(rest);
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Emits the pending line if it is not empty.
    ///
    /// An incomplete UTF-8 sequence is kept, it may still be completed by later bytes.
    pub(crate) fn flush(&mut self, mut emit: impl FnMut(&str)) {
        if !self.line.is_empty() {
            self.end_line(&mut emit);
        }
    }

    /// Like [`flush`](Self::flush), but an incomplete UTF-8 sequence is emitted as U+FFFD.
    pub(crate) fn finish(&mut self, emit: impl FnMut(&str)) {
        if !self.incomplete_utf8.is_empty() {
            self.incomplete_utf8.clear();
            self.line.push(char::REPLACEMENT_CHARACTER);
        }
        self.flush(emit);
    }

    fn end_line(&mut self, emit: &mut impl FnMut(&str)) {
        if !(self.skip_empty_lines && self.line.is_empty()) {
            emit(&self.line);
        }
        self.line.clear();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::LineBuffer;

    fn push_all(buffer: &mut LineBuffer, chunks: &[&str]) -> Vec<String> {
        let mut lines = Vec::new();
        for chunk in chunks {
            buffer.push_str(chunk, |line| lines.push(line.to_owned()));
        }
        lines
    }

    #[test_case(&["hello\n"], &["hello"], "" ; "single line")]
    #[test_case(&["a\nb\nc"], &["a", "b"], "c" ; "trailing partial line")]
    #[test_case(&["a\r\nb\r\n"], &["a", "b"], "" ; "crlf")]
    #[test_case(&["a\rb\r"], &["a", "b"], "" ; "lone cr")]
    #[test_case(&["a\r", "\nb\n"], &["a", "b"], "" ; "crlf split across pushes")]
    #[test_case(&["a", "b", "\n"], &["ab"], "" ; "line built from pieces")]
    #[test_case(&["\n\n"], &["", ""], "" ; "empty lines")]
    #[test_case(&["\r\n\r\n"], &["", ""], "" ; "empty crlf lines")]
    #[test_case(&["\r\r"], &["", ""], "" ; "empty cr lines")]
    #[test_case(&["a\r", "b\n"], &["a", "b"], "" ; "cr followed by text")]
    #[test_case(&["no terminator"], &[], "no terminator" ; "no terminator")]
    fn splits_lines(chunks: &[&str], expected: &[&str], pending: &str) {
        let mut buffer = LineBuffer::default();
        let lines = push_all(&mut buffer, chunks);
        assert_eq!(lines, expected);
        assert_eq!(buffer.pending(), pending);
    }

    #[test]
    fn skips_empty_lines_when_configured() {
        let mut buffer = LineBuffer::new(true);
        let lines = push_all(&mut buffer, &["\n", "a\r\n\r\n", "\rb\n"]);
        assert_eq!(lines, ["a", "b"]);
    }

    #[test]
    fn flush_emits_only_non_empty_partial_lines() {
        let mut buffer = LineBuffer::default();
        let mut lines = Vec::new();

        buffer.flush(|line| lines.push(line.to_owned()));
        assert!(lines.is_empty());

        buffer.push_str("partial", |line| lines.push(line.to_owned()));
        buffer.flush(|line| lines.push(line.to_owned()));
        buffer.flush(|line| lines.push(line.to_owned()));
        assert_eq!(lines, ["partial"]);
        assert_eq!(buffer.pending(), "");
    }

    #[test]
    fn reassembles_split_utf8() {
        let mut buffer = LineBuffer::default();
        let mut lines = Vec::new();
        let text = "grüße ✓\n".as_bytes();

        for byte in text {
            buffer.push_bytes(std::slice::from_ref(byte), |line| {
                lines.push(line.to_owned())
            });
        }

        assert_eq!(lines, ["grüße ✓"]);
    }

    #[test]
    fn replaces_invalid_utf8() {
        let mut buffer = LineBuffer::default();
        let mut lines = Vec::new();

        buffer.push_bytes(b"a\xffb\n", |line| lines.push(line.to_owned()));
        // A truncated three byte sequence stays pending until the writer is finished.
        buffer.push_bytes(b"c\xe2\x9c", |line| lines.push(line.to_owned()));
        buffer.flush(|line| lines.push(line.to_owned()));
        buffer.finish(|line| lines.push(line.to_owned()));

        assert_eq!(lines, ["a\u{FFFD}b", "c", "\u{FFFD}"]);
    }
}

//! Reassembles newline-terminated lines from arbitrarily split network chunks.

/// Accumulates raw chunks and yields complete lines.
///
/// Decoding is stateful: a UTF-8 sequence split across two chunks is held back
/// until the rest of it arrives, so chunking never corrupts characters.
#[derive(Debug, Default)]
pub struct LineBuffer {
    /// Decoded text after the last newline seen so far.
    remainder: String,
    /// Trailing bytes of an incomplete UTF-8 sequence.
    pending: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk and returns every line it completed, without terminators.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode(chunk);

        let mut lines = Vec::new();
        while let Some(line_end) = self.remainder.find('\n') {
            let mut line: String = self.remainder.drain(..=line_end).collect();
            line.pop();
            lines.push(line);
        }
        lines
    }

    /// Flushes the buffer at end of stream.
    ///
    /// Returns the unterminated tail as a final line unless it is blank.
    pub fn finish(&mut self) -> Option<String> {
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.remainder.push_str(&String::from_utf8_lossy(&pending));
        }

        let tail = std::mem::take(&mut self.remainder);
        if tail.trim().is_empty() {
            None
        } else {
            Some(tail)
        }
    }

    fn decode(&mut self, chunk: &[u8]) {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    self.remainder.push_str(valid);
                    return;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    self.remainder.push_str(&String::from_utf8_lossy(valid));

                    match e.error_len() {
                        Some(invalid_len) => {
                            self.remainder.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[invalid_len..];
                        }
                        // Incomplete sequence at the end; wait for the next chunk.
                        None => {
                            self.pending = after.to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn collect_all(chunks: &[&[u8]]) -> Vec<String> {
        let mut buffer = LineBuffer::new();
        let mut lines = Vec::new();
        for chunk in chunks {
            lines.extend(buffer.feed(chunk));
        }
        lines.extend(buffer.finish());
        lines
    }

    #[test]
    fn test_feed_single_complete_line() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.feed(b"hello\n"), vec!["hello".to_string()]);
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_feed_holds_partial_line() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.feed(b"{\"done\":").is_empty());
        assert_eq!(buffer.feed(b"true}\n"), vec![r#"{"done":true}"#.to_string()]);
    }

    #[test]
    fn test_feed_multiple_lines_in_one_chunk() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.feed(b"a\nb\n\nc");
        assert_eq!(lines, vec!["a", "b", ""]);
        assert_eq!(buffer.finish(), Some("c".to_string()));
    }

    #[test]
    fn test_finish_discards_blank_tail() {
        let mut buffer = LineBuffer::new();
        buffer.feed(b"line\n   ");
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_finish_clears_state() {
        let mut buffer = LineBuffer::new();
        buffer.feed(b"tail");
        assert_eq!(buffer.finish(), Some("tail".to_string()));
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_crlf_keeps_carriage_return() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.feed(b"data: x\r\n"), vec!["data: x\r".to_string()]);
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let text = "こんにちは\n";
        let bytes = text.as_bytes();
        // Split in the middle of the first character (3 bytes long).
        let lines = collect_all(&[&bytes[..1], &bytes[1..2], &bytes[2..]]);
        assert_eq!(lines, vec!["こんにちは".to_string()]);
    }

    #[test]
    fn test_invalid_bytes_become_replacement_character() {
        let lines = collect_all(&[&b"ab\xffcd\n"[..]]);
        assert_eq!(lines, vec!["ab\u{fffd}cd".to_string()]);
    }

    #[test]
    fn test_incomplete_sequence_at_end_is_flushed_lossy() {
        let bytes = "é".as_bytes();
        let lines = collect_all(&[&b"x"[..], &bytes[..1]]);
        assert_eq!(lines, vec!["x\u{fffd}".to_string()]);
    }

    #[test]
    fn test_chunking_is_transparent() {
        let stream = "{\"message\":{\"content\":\"Hé\"}}\n\ndata: [DONE]\n🌍 tail"
            .as_bytes()
            .to_vec();
        let expected = collect_all(&[stream.as_slice()]);
        assert_eq!(expected.len(), 4);

        for i in 0..=stream.len() {
            assert_eq!(
                collect_all(&[&stream[..i], &stream[i..]]),
                expected,
                "split at {i}"
            );
            for j in i..=stream.len() {
                assert_eq!(
                    collect_all(&[&stream[..i], &stream[i..j], &stream[j..]]),
                    expected,
                    "split at {i},{j}"
                );
            }
        }
    }

    #[test]
    fn test_byte_at_a_time() {
        let stream = "line one\nline two\n".as_bytes();
        let chunks: Vec<&[u8]> = stream.chunks(1).collect();
        assert_eq!(collect_all(&chunks), vec!["line one", "line two"]);
    }
}

/// Incremental UTF-8 decoder for chunked byte streams.
///
/// A transport chunk boundary may fall inside a multi-byte character. An
/// incomplete trailing sequence is held back and prepended to the next
/// chunk, so decoded text is byte-identical regardless of how the stream
/// was fragmented. Genuinely invalid bytes are replaced rather than
/// stalling the stream.
#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    /// Decode the next chunk, holding back an incomplete trailing sequence.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let keep = bytes.len() - incomplete_tail_len(&bytes);
        let text = String::from_utf8_lossy(&bytes[..keep]).into_owned();
        self.pending = bytes[keep..].to_vec();
        text
    }

    /// Drain held-back bytes at end of stream. A character left incomplete
    /// by the transport decodes to the replacement character.
    pub fn finish(&mut self) -> String {
        let pending = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&pending).into_owned()
    }
}

/// Length of an incomplete UTF-8 sequence at the end of `bytes`, or zero.
fn incomplete_tail_len(bytes: &[u8]) -> usize {
    let len = bytes.len();
    for offset in 1..=3.min(len) {
        let index = len - offset;
        let byte = bytes[index];
        if byte < 0x80 {
            return 0;
        }
        if byte >= 0xc0 {
            return if index + sequence_width(byte) > len {
                offset
            } else {
                0
            };
        }
        // Continuation byte: keep scanning for the lead byte.
    }

    // No lead byte within reach: the tail is invalid, not incomplete.
    0
}

fn sequence_width(lead: u8) -> usize {
    if lead >= 0xf0 {
        4
    } else if lead >= 0xe0 {
        3
    } else {
        2
    }
}

/// One decoded protocol frame: the most recent `event:` label plus the
/// concatenated bodies of every `data:` line seen before the frame boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    pub event: Option<String>,
    pub data: String,
}

/// Incremental frame decoder for blank-line-delimited SSE text streams.
///
/// The decoder owns the unterminated tail of the last chunk and the payload
/// of the frame currently being assembled, so it can be fed arbitrarily
/// fragmented chunks: a chunk boundary may fall mid-line, mid-field, or
/// mid-payload and the emitted frames are byte-identical to a single-chunk
/// feed. It performs line and frame segmentation only; payload content is
/// never parsed here.
#[derive(Debug, Default)]
pub struct SseFrameDecoder {
    line_buffer: String,
    data: String,
    event_label: Option<String>,
}

impl SseFrameDecoder {
    /// Feed the next chunk into the decoder and drain complete frames.
    ///
    /// Pass `is_final` on the last call for a stream: the residual line
    /// buffer is consumed as a final line and a still-pending frame is
    /// dispatched even without a trailing blank line (flush-on-close).
    pub fn feed(&mut self, chunk: &str, is_final: bool) -> Vec<SseFrame> {
        self.line_buffer.push_str(chunk);
        let mut frames = Vec::new();

        loop {
            let line = match self.line_buffer.find('\n') {
                Some(split) => {
                    let mut line: String = self.line_buffer.drain(..=split).collect();
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                    line
                }
                None if is_final && !self.line_buffer.is_empty() => {
                    std::mem::take(&mut self.line_buffer)
                }
                None => break,
            };

            if let Some(frame) = self.consume_line(&line) {
                frames.push(frame);
            }
        }

        if is_final {
            if let Some(frame) = self.take_pending() {
                frames.push(frame);
            }
        }

        frames
    }

    /// True when neither a partial line nor a partial frame is buffered.
    pub fn is_empty(&self) -> bool {
        self.line_buffer.is_empty() && self.data.is_empty() && self.event_label.is_none()
    }

    fn consume_line(&mut self, line: &str) -> Option<SseFrame> {
        if line.is_empty() {
            return self.take_pending();
        }

        if let Some(body) = line.strip_prefix("data:") {
            self.data.push_str(body.strip_prefix(' ').unwrap_or(body));
            self.data.push('\n');
        } else if let Some(label) = line.strip_prefix("event:") {
            self.event_label = Some(label.trim().to_string());
        } else if line.starts_with(':') {
            // Comment line.
        } else {
            // Unknown field lines (id:, retry:, ...) are ignored.
        }

        None
    }

    fn take_pending(&mut self) -> Option<SseFrame> {
        if self.data.is_empty() && self.event_label.is_none() {
            return None;
        }

        Some(SseFrame {
            event: self.event_label.take(),
            data: std::mem::take(&mut self.data),
        })
    }
}

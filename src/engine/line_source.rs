//! Bounded line sampling.
//!
//! Yields nonempty, trimmed lines from a buffered reader, capping both the
//! number of data lines and the byte length of any single line. The first
//! nonempty line is the header candidate and does not count against the
//! data-line budget. Raw bytes consumed (terminators included) are tracked
//! for the row-count estimate.

use crate::diagnostics::Diagnostics;
use std::io::{self, BufRead};

/// Longest line accepted before truncation.
pub const MAX_LINE_BYTES: usize = 999_999;

/// Produces the sampled lines for one scan.
#[derive(Debug)]
pub struct LineSource<R: BufRead> {
    reader: R,
    read_lines: usize,
    yielded: usize,
    bytes_sampled: u64,
    raw_line_no: u64,
    eof: bool,
    utf8_warned: bool,
}

impl<R: BufRead> LineSource<R> {
    /// Create a source yielding at most `read_lines` data lines after the
    /// header candidate; 0 means unbounded.
    pub fn new(reader: R, read_lines: usize) -> Self {
        Self {
            reader,
            read_lines,
            yielded: 0,
            bytes_sampled: 0,
            raw_line_no: 0,
            eof: false,
            utf8_warned: false,
        }
    }

    /// Next nonempty trimmed line, or `None` at EOF or once the sample
    /// budget is spent.
    pub fn next_line(&mut self, diags: &mut Diagnostics) -> io::Result<Option<String>> {
        // The first yielded line is the header candidate and rides free.
        if self.read_lines > 0 && self.yielded > self.read_lines {
            return Ok(None);
        }

        loop {
            if self.eof {
                return Ok(None);
            }
            let Some(raw) = self.read_raw_line(diags)? else {
                return Ok(None);
            };

            let line = match simdutf8::basic::from_utf8(&raw) {
                Ok(s) => s.to_string(),
                Err(_) => {
                    if !self.utf8_warned {
                        diags.warning(format!(
                            "line {}: invalid UTF-8 bytes replaced",
                            self.raw_line_no
                        ));
                        self.utf8_warned = true;
                    }
                    String::from_utf8_lossy(&raw).into_owned()
                }
            };

            let trimmed = line.trim_matches(|c: char| c.is_whitespace() || c.is_control());
            if trimmed.is_empty() {
                continue;
            }
            self.yielded += 1;
            return Ok(Some(trimmed.to_string()));
        }
    }

    /// Read one raw line up to the byte cap, consuming through its
    /// terminator. Returns `None` only at EOF with no bytes pending.
    fn read_raw_line(&mut self, diags: &mut Diagnostics) -> io::Result<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        let mut saw_bytes = false;
        let mut truncated = false;

        loop {
            let chunk = self.reader.fill_buf()?;
            if chunk.is_empty() {
                self.eof = true;
                break;
            }
            saw_bytes = true;

            if let Some(pos) = chunk.iter().position(|&b| b == b'\n') {
                append_capped(&mut buf, &chunk[..pos], &mut truncated);
                self.bytes_sampled += pos as u64 + 1;
                self.reader.consume(pos + 1);
                break;
            }
            let len = chunk.len();
            append_capped(&mut buf, chunk, &mut truncated);
            self.bytes_sampled += len as u64;
            self.reader.consume(len);
        }

        if !saw_bytes {
            return Ok(None);
        }
        self.raw_line_no += 1;
        if truncated {
            trim_partial_utf8(&mut buf);
            diags.warning(format!(
                "line {} exceeds {MAX_LINE_BYTES} bytes; truncated",
                self.raw_line_no
            ));
        }
        Ok(Some(buf))
    }

    /// Nonempty lines yielded so far, header candidate included.
    pub const fn lines_yielded(&self) -> usize {
        self.yielded
    }

    /// Raw bytes consumed from the reader, terminators included.
    pub const fn bytes_sampled(&self) -> u64 {
        self.bytes_sampled
    }

    /// True once the underlying reader reported end of input.
    pub const fn eof_reached(&self) -> bool {
        self.eof
    }
}

fn append_capped(buf: &mut Vec<u8>, chunk: &[u8], truncated: &mut bool) {
    let room = MAX_LINE_BYTES - buf.len();
    if chunk.len() <= room {
        buf.extend_from_slice(chunk);
    } else {
        buf.extend_from_slice(&chunk[..room]);
        *truncated = true;
    }
}

/// Drop a trailing partial UTF-8 sequence left by byte-level truncation.
fn trim_partial_utf8(buf: &mut Vec<u8>) {
    while matches!(buf.last(), Some(b) if *b & 0xC0 == 0x80) {
        buf.pop();
    }
    if matches!(buf.last(), Some(b) if *b >= 0xC0) {
        buf.pop();
    }
}

//! Inbound line assembly and response classification.
//!
//! The probe emits CR-terminated ASCII lines, either unsolicited readings
//! (continuous mode) or answers to queries.  Bytes arrive in arbitrary
//! chunks, so [`LineAssembler`] buffers a partial line across calls and
//! yields each complete line, terminator included.
//!
//! ```text
//!  bytes ──▶ LineAssembler ──▶ ProbeLine ──▶ classify() ──▶ ProbeResponse
//! ```
//!
//! Memory is bounded: a line that grows past [`LINE_CAPACITY`] without a
//! terminator is dropped, along with the rest of it up to the next CR.

use log::warn;

use super::command::TERMINATOR;

/// Longest line kept, terminator included.  Probe answers are < 40 bytes.
pub const LINE_CAPACITY: usize = 64;

/// Prefix of the answer to a slope query.
pub const SLOPE_PREFIX: &str = "?Slope,";

/// One complete line as received, including the trailing `\r`.
pub type ProbeLine = heapless::String<LINE_CAPACITY>;

/// Classification of one received line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeResponse {
    /// A numeric measurement (line starts with an ASCII digit).
    Reading(f32),
    /// Answer to a slope query; the caller keeps the raw line.
    SlopeAnswer,
    /// Answer to some other query (`?...`).
    UnknownQuery,
    /// Anything else: echoed acks, empty lines, garbage.
    Noise,
}

/// Classify a complete line.
pub fn classify(line: &str) -> ProbeResponse {
    let Some(first) = line.chars().next() else {
        return ProbeResponse::Noise;
    };

    if first.is_ascii_digit() {
        return match parse_leading_float(line) {
            Some(value) => ProbeResponse::Reading(value),
            None => ProbeResponse::Noise,
        };
    }

    if first == '?' {
        if line.len() > SLOPE_PREFIX.len() && line.starts_with(SLOPE_PREFIX) {
            return ProbeResponse::SlopeAnswer;
        }
        return ProbeResponse::UnknownQuery;
    }

    ProbeResponse::Noise
}

/// Parse the leading `digits[.digits][(e|E)[+|-]digits]` prefix, ignoring
/// whatever follows (terminator, stray characters).  An exponent marker
/// without digits after it is not part of the number.
pub fn parse_leading_float(text: &str) -> Option<f32> {
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut seen_point = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => {}
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let digits = bytes[exp..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits > 0 {
            end = exp + digits;
        }
    }
    text[..end].parse().ok()
}

/// Streaming CR-delimited line assembler.
pub struct LineAssembler {
    buf: heapless::Vec<u8, LINE_CAPACITY>,
    /// Set after an overflow; bytes are dropped until the next terminator.
    discarding: bool,
    overflows: u32,
}

impl LineAssembler {
    pub const fn new() -> Self {
        Self {
            buf: heapless::Vec::new(),
            discarding: false,
            overflows: 0,
        }
    }

    /// Feed one byte.  Returns a line when `byte` completes one.
    pub fn push(&mut self, byte: u8) -> Option<ProbeLine> {
        if self.discarding {
            if byte == TERMINATOR {
                self.discarding = false;
            }
            return None;
        }

        // Tolerate CRLF: a line feed can never start a line.
        if byte == b'\n' && self.buf.is_empty() {
            return None;
        }

        if self.buf.push(byte).is_err() {
            self.overflows = self.overflows.saturating_add(1);
            warn!(
                "PROBE: line exceeds {} bytes, discarding (overflow #{})",
                LINE_CAPACITY, self.overflows
            );
            self.buf.clear();
            self.discarding = byte != TERMINATOR;
            return None;
        }

        if byte != TERMINATOR {
            return None;
        }

        let line = match core::str::from_utf8(&self.buf) {
            Ok(text) => {
                let mut line = ProbeLine::new();
                // Cannot fail: both buffers share LINE_CAPACITY.
                let _ = line.push_str(text);
                Some(line)
            }
            Err(_) => {
                warn!("PROBE: dropping non-UTF-8 line ({} bytes)", self.buf.len());
                None
            }
        };
        self.buf.clear();
        line
    }

    /// Bytes of the partial line currently buffered.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Number of over-long lines dropped so far.
    pub fn overflows(&self) -> u32 {
        self.overflows
    }

    /// Drop any partial line (e.g. after the transport is reopened).
    pub fn reset(&mut self) {
        self.buf.clear();
        self.discarding = false;
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}

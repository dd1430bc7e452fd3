//! Line-oriented UTF-16LE decoding.
//!
//! The beer list export is UTF-16LE. [`Utf16LeLines`] pulls code units
//! from a [`BufRead`] lazily, so a caller that stops iterating early
//! stops reading the file as well.

use std::io::{self, BufRead, ErrorKind};

const LINE_FEED: u16 = 0x000A;
const CARRIAGE_RETURN: u16 = 0x000D;
const BYTE_ORDER_MARK: u16 = 0xFEFF;

/// Iterator over the lines of a UTF-16LE stream.
///
/// Lines are split on U+000A with a trailing U+000D removed. A leading
/// byte-order mark is dropped from the first line. Unpaired surrogates
/// decode to U+FFFD and a dangling odd byte at the end is ignored.
pub struct Utf16LeLines<R> {
    reader: R,
    first_line: bool,
    finished: bool,
}

impl<R: BufRead> Utf16LeLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            first_line: true,
            finished: false,
        }
    }

    /// Read one little-endian code unit. `Ok(None)` at end of input.
    fn read_unit(&mut self) -> io::Result<Option<u16>> {
        let mut pair = [0u8; 2];
        match self.reader.read_exact(&mut pair) {
            Ok(()) => Ok(Some(u16::from_le_bytes(pair))),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl<R: BufRead> Iterator for Utf16LeLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut units: Vec<u16> = Vec::new();
        loop {
            match self.read_unit() {
                Ok(Some(LINE_FEED)) => break,
                Ok(Some(unit)) => units.push(unit),
                Ok(None) => {
                    self.finished = true;
                    if units.is_empty() {
                        return None;
                    }
                    break;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }

        if units.last() == Some(&CARRIAGE_RETURN) {
            units.pop();
        }
        if self.first_line {
            self.first_line = false;
            if units.first() == Some(&BYTE_ORDER_MARK) {
                units.remove(0);
            }
        }

        Some(Ok(String::from_utf16_lossy(&units)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

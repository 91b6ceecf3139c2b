//! Little-endian cursor over a borrowed report buffer.

use pidffb_errors::{ProtocolError, ProtocolResult};

/// Reads fields in order, starting after the report id byte.
///
/// The length check happens once in [`ReportReader::new`]; later reads are
/// still bounds-checked and fail with the same error instead of panicking.
#[derive(Debug)]
pub struct ReportReader<'a> {
    data: &'a [u8],
    position: usize,
    expected: usize,
}

impl<'a> ReportReader<'a> {
    /// Wraps `data` after checking it holds at least `expected` bytes.
    pub fn new(data: &'a [u8], expected: usize) -> ProtocolResult<Self> {
        let report_id = *data.first().ok_or(ProtocolError::Empty)?;
        if data.len() < expected {
            return Err(ProtocolError::TooShort {
                report_id,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            position: 1,
            expected,
        })
    }

    pub fn report_id(&self) -> u8 {
        self.data.first().copied().unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    pub fn read_u8(&mut self) -> ProtocolResult<u8> {
        let value = self
            .data
            .get(self.position)
            .copied()
            .ok_or(ProtocolError::TooShort {
                report_id: self.report_id(),
                expected: self.expected.max(self.position + 1),
                actual: self.data.len(),
            })?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_u16_le(&mut self) -> ProtocolResult<u16> {
        let lo = self.read_u8()?;
        let hi = self.read_u8()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    pub fn read_i16_le(&mut self) -> ProtocolResult<i16> {
        let lo = self.read_u8()?;
        let hi = self.read_u8()?;
        Ok(i16::from_le_bytes([lo, hi]))
    }
}

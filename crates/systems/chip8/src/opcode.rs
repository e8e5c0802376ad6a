//! Instruction word decoding.

use std::fmt;

/// A fetched 16-bit instruction word with nibble-field accessors.
///
/// Field layout: `CXYN`, where C selects the instruction family and the
/// remaining nibbles are reinterpreted per family as register indices
/// (`x`, `y`), a 4-bit immediate (`n`), an 8-bit immediate (`nn`) or a
/// 12-bit address (`nnn`).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Instruction family, bits 15-12.
    pub fn class(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// First register index, bits 11-8.
    pub fn x(self) -> usize {
        ((self.0 >> 8) & 0x0F) as usize
    }

    /// Second register index, bits 7-4.
    pub fn y(self) -> usize {
        ((self.0 >> 4) & 0x0F) as usize
    }

    /// 4-bit immediate, bits 3-0.
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// 8-bit immediate, bits 7-0.
    pub fn nn(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// 12-bit address, bits 11-0.
    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opcode({:04X})", self.0)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_extraction() {
        let op = Opcode(0xD4B5);
        assert_eq!(op.class(), 0xD);
        assert_eq!(op.x(), 0x4);
        assert_eq!(op.y(), 0xB);
        assert_eq!(op.n(), 0x5);
        assert_eq!(op.nn(), 0xB5);
        assert_eq!(op.nnn(), 0x4B5);
    }

    #[test]
    fn test_display_format() {
        assert_eq!(format!("{}", Opcode(0x00E0)), "00E0");
    }
}

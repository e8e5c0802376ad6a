//! The 4 KiB address space.
//!
//! Layout follows the original interpreter convention:
//!
//! - `0x000..0x200`: reserved for the interpreter; the hex font lives at
//!   [`FONT_BASE`] (16 glyphs, 5 bytes each)
//! - `0x200..0xFFF`: program space, loaded verbatim from the ROM image
//!
//! All access is bounds-checked. An address past `0xFFF` is a reported
//! error condition, never a panic or a silent wrap.

use crate::Chip8Error;

/// Total addressable memory in bytes.
pub const MEM_SIZE: usize = 4096;
/// Where the built-in hex font is installed.
pub const FONT_BASE: u16 = 0x050;
/// Where program execution starts.
pub const PROGRAM_BASE: u16 = 0x200;
/// Bytes of a single font glyph.
pub const GLYPH_SIZE: u16 = 5;

/// Standard 4x5 glyphs for hex digits 0-F, one bit row per byte.
const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Byte-addressable memory with the font pre-installed.
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    pub fn new() -> Self {
        let mut bytes = [0; MEM_SIZE];
        let base = FONT_BASE as usize;
        bytes[base..base + FONT.len()].copy_from_slice(&FONT);
        Self { bytes }
    }

    /// Copy a ROM image into program space, truncating anything past the
    /// end of memory. Returns the number of bytes actually loaded.
    pub fn load_rom(&mut self, data: &[u8]) -> usize {
        let capacity = MEM_SIZE - PROGRAM_BASE as usize;
        let len = data.len().min(capacity);
        if len < data.len() {
            log::warn!(
                "ROM is {} bytes, truncating to {} to fit memory",
                data.len(),
                len
            );
        }
        let base = PROGRAM_BASE as usize;
        self.bytes[base..base + len].copy_from_slice(&data[..len]);
        len
    }

    pub fn read(&self, addr: u16) -> Result<u8, Chip8Error> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Chip8Error::AddressOutOfRange { addr })
    }

    pub fn write(&mut self, addr: u16, val: u8) -> Result<(), Chip8Error> {
        match self.bytes.get_mut(addr as usize) {
            Some(slot) => {
                *slot = val;
                Ok(())
            }
            None => Err(Chip8Error::AddressOutOfRange { addr }),
        }
    }

    /// Read a big-endian 16-bit instruction word.
    pub fn read_word(&self, addr: u16) -> Result<u16, Chip8Error> {
        let hi = self.read(addr)? as u16;
        let lo = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Address of the font glyph for a hex digit. Only the low nibble of
    /// `digit` is significant.
    pub fn glyph_addr(digit: u8) -> u16 {
        FONT_BASE + GLYPH_SIZE * (digit & 0x0F) as u16
    }
}

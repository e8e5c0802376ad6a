//! CHIP-8 system implementation.
//!
//! The machine is the classic COSMAC VIP layout: 4 KiB of memory with the
//! hex font at 0x050 and programs at 0x200, sixteen 8-bit registers, a
//! 16-entry call stack, two 60 Hz countdown timers and a 64x32 monochrome
//! display. [`Chip8System`] owns all of it behind the [`ocho_core::System`]
//! trait; frontends push key state in, pull framebuffer snapshots out, and
//! pace execution with the [`scheduler`] module.

mod cpu;
mod display;
mod memory;
mod opcode;
mod quirks;
pub mod scheduler;
mod stack;
mod timer;

use ocho_core::types::Frame;
use ocho_core::{Step, System};
use thiserror::Error;

use cpu::Cpu;
pub use cpu::NUM_KEYS;
pub use display::{HEIGHT, WIDTH};
pub use quirks::{Config, Quirks};

/// Framebuffer color for a lit pixel.
pub const PIXEL_ON: u32 = 0x00FF_FFFF;
/// Framebuffer color for a dark pixel.
pub const PIXEL_OFF: u32 = 0x0000_0000;

/// Faults a running program can produce. None of these are host bugs: they
/// indicate a malformed or incompatible ROM, and the frontend decides
/// whether to stop the run. Unknown opcodes are deliberately absent; those
/// are a no-op for compatibility with permissive ROMs.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("call stack overflow at {pc:#05X}")]
    StackOverflow { pc: u16 },
    #[error("return with an empty call stack at {pc:#05X}")]
    StackUnderflow { pc: u16 },
    #[error("program counter ran past the end of memory at {pc:#05X}")]
    EndOfMemory { pc: u16 },
    #[error("memory access out of range: {addr:#05X}")]
    AddressOutOfRange { addr: u16 },
}

/// A complete CHIP-8 machine.
pub struct Chip8System {
    cpu: Cpu,
    config: Config,
    rom: Vec<u8>,
}

impl Default for Chip8System {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Chip8System {
    pub fn new(config: Config) -> Self {
        Self {
            cpu: Cpu::new(config.quirks),
            config,
            rom: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the keypad snapshot read by the next instruction.
    pub fn set_keys(&mut self, keys: [bool; NUM_KEYS]) {
        self.cpu.set_keys(keys);
    }

    /// Apply one 60 Hz decrement to the delay and sound timers. Driven by
    /// the frontend's scheduler, never by instruction execution.
    pub fn tick_timers(&mut self) {
        self.cpu.timers.tick();
    }

    /// True while the program has the beeper switched on.
    pub fn sound_active(&self) -> bool {
        self.cpu.timers.sound_active()
    }
}

impl System for Chip8System {
    type Error = Chip8Error;

    fn reset(&mut self) {
        self.cpu = Cpu::new(self.config.quirks);
        if !self.rom.is_empty() {
            self.cpu.memory.load_rom(&self.rom);
        }
    }

    fn load_rom(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.rom = data.to_vec();
        self.reset();
        log::info!("loaded {} byte ROM", self.rom.len());
        Ok(())
    }

    fn step(&mut self) -> Result<Step, Self::Error> {
        let redraw = self.cpu.step()?;
        Ok(Step { redraw })
    }

    fn framebuffer(&self) -> Frame {
        self.cpu.display.to_frame(PIXEL_ON, PIXEL_OFF)
    }
}

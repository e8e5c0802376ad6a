//! The fetch/decode/execute core.
//!
//! One call to [`Cpu::step`] runs exactly one instruction: fetch the word
//! at PC (big-endian), advance PC by 2, then dispatch on the opcode family.
//! PC is advanced even for unrecognized opcodes, which are a logged no-op
//! rather than an error; permissive ROMs rely on that. If an instruction
//! fails (stack fault, out-of-range access), PC is restored to the faulting
//! instruction before the error is returned, so diagnostics point at the
//! right address and state stays consistent for inspection.
//!
//! The FX0A "wait for key" instruction never blocks. It is a small state
//! machine that re-executes itself by rewinding PC, so the caller's event
//! loop keeps polling input and quit signals at full rate while the machine
//! waits for a full press-then-release transition.

use rand::{rngs::ThreadRng, Rng};

use crate::display::Display;
use crate::memory::{Memory, MEM_SIZE, PROGRAM_BASE};
use crate::opcode::Opcode;
use crate::quirks::Quirks;
use crate::stack::CallStack;
use crate::timer::Timers;
use crate::Chip8Error;

/// Number of keys on the hex keypad.
pub const NUM_KEYS: usize = 16;

/// FX0A progress. The instruction completes only after a key has been seen
/// going down and then released, to avoid reporting a key the user was
/// already holding for an earlier skip instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyWait {
    Idle,
    AwaitPress,
    AwaitRelease(u8),
}

/// CHIP-8 machine state and execution engine.
pub struct Cpu {
    /// General registers V0-VF. VF doubles as the carry/borrow/collision
    /// flag and is clobbered by several instructions.
    pub v: [u8; 16],
    /// Index register.
    pub i: u16,
    /// Program counter.
    pub pc: u16,
    pub memory: Memory,
    pub stack: CallStack,
    pub timers: Timers,
    pub display: Display,
    keys: [bool; NUM_KEYS],
    key_wait: KeyWait,
    quirks: Quirks,
    rng: ThreadRng,
}

impl Cpu {
    pub fn new(quirks: Quirks) -> Self {
        Self {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_BASE,
            memory: Memory::new(),
            stack: CallStack::new(),
            timers: Timers::new(),
            display: Display::new(),
            keys: [false; NUM_KEYS],
            key_wait: KeyWait::Idle,
            quirks,
            rng: rand::thread_rng(),
        }
    }

    /// Replace the key-down snapshot. Called by the frontend between
    /// cycles; the snapshot stays stable for the whole of the next step.
    pub fn set_keys(&mut self, keys: [bool; NUM_KEYS]) {
        self.keys = keys;
    }

    /// Execute one instruction. Returns whether the display was touched.
    pub fn step(&mut self) -> Result<bool, Chip8Error> {
        let op_addr = self.pc;
        if op_addr as usize + 1 >= MEM_SIZE {
            return Err(Chip8Error::EndOfMemory { pc: op_addr });
        }

        let word = self.memory.read_word(op_addr)?;
        self.pc += 2;

        match self.execute(Opcode(word)) {
            Ok(redraw) => Ok(redraw),
            Err(e) => {
                self.pc = op_addr;
                Err(e)
            }
        }
    }

    fn execute(&mut self, op: Opcode) -> Result<bool, Chip8Error> {
        let mut redraw = false;
        let x = op.x();
        let y = op.y();

        match op.class() {
            0x0 => match op.nn() {
                0xE0 => {
                    self.display.clear();
                    redraw = true;
                }
                0xEE => {
                    self.pc = self.stack.pop().ok_or(Chip8Error::StackUnderflow {
                        pc: self.pc.wrapping_sub(2),
                    })?;
                }
                _ => self.unknown(op),
            },
            0x1 => self.pc = op.nnn(),
            0x2 => {
                let ret = self.pc;
                if self.stack.push(ret).is_err() {
                    return Err(Chip8Error::StackOverflow {
                        pc: ret.wrapping_sub(2),
                    });
                }
                self.pc = op.nnn();
            }
            0x3 => {
                if self.v[x] == op.nn() {
                    self.pc += 2;
                }
            }
            0x4 => {
                if self.v[x] != op.nn() {
                    self.pc += 2;
                }
            }
            0x5 => match op.n() {
                0x0 => {
                    if self.v[x] == self.v[y] {
                        self.pc += 2;
                    }
                }
                _ => self.unknown(op),
            },
            0x6 => self.v[x] = op.nn(),
            0x7 => self.v[x] = self.v[x].wrapping_add(op.nn()),
            0x8 => self.execute_alu(op),
            0x9 => match op.n() {
                0x0 => {
                    if self.v[x] != self.v[y] {
                        self.pc += 2;
                    }
                }
                _ => self.unknown(op),
            },
            0xA => self.i = op.nnn(),
            0xB => {
                let reg = if self.quirks.jump_offset_vx { x } else { 0 };
                self.pc = op.nnn().wrapping_add(self.v[reg] as u16);
            }
            0xC => self.v[x] = self.rng.gen::<u8>() & op.nn(),
            0xD => {
                let rows = op.n() as usize;
                let mut sprite = [0u8; 15];
                for (line, byte) in sprite.iter_mut().take(rows).enumerate() {
                    *byte = self.memory.read(self.i + line as u16)?;
                }
                let collision = self.display.draw_sprite(self.v[x], self.v[y], &sprite[..rows]);
                self.v[0xF] = collision as u8;
                redraw = true;
            }
            0xE => match op.nn() {
                0x9E => {
                    if self.keys[(self.v[x] & 0x0F) as usize] {
                        self.pc += 2;
                    }
                }
                0xA1 => {
                    if !self.keys[(self.v[x] & 0x0F) as usize] {
                        self.pc += 2;
                    }
                }
                _ => self.unknown(op),
            },
            0xF => self.execute_misc(op)?,
            _ => unreachable!("opcode class is a nibble"),
        }

        Ok(redraw)
    }

    fn execute_alu(&mut self, op: Opcode) {
        let x = op.x();
        let y = op.y();

        // Flag writes happen last so VF holds the flag even when x == 0xF.
        match op.n() {
            0x0 => self.v[x] = self.v[y],
            0x1 => self.v[x] |= self.v[y],
            0x2 => self.v[x] &= self.v[y],
            0x3 => self.v[x] ^= self.v[y],
            0x4 => {
                let (sum, carry) = self.v[x].overflowing_add(self.v[y]);
                self.v[x] = sum;
                self.v[0xF] = carry as u8;
            }
            0x5 => {
                let (diff, borrow) = self.v[x].overflowing_sub(self.v[y]);
                self.v[x] = diff;
                self.v[0xF] = !borrow as u8;
            }
            0x6 => {
                let src = if self.quirks.shift_source_vy {
                    self.v[y]
                } else {
                    self.v[x]
                };
                let shifted_out = src & 0x01;
                self.v[x] = src >> 1;
                self.v[0xF] = shifted_out;
            }
            0x7 => {
                let (diff, borrow) = self.v[y].overflowing_sub(self.v[x]);
                self.v[x] = diff;
                self.v[0xF] = !borrow as u8;
            }
            0xE => {
                let src = if self.quirks.shift_source_vy {
                    self.v[y]
                } else {
                    self.v[x]
                };
                let shifted_out = src >> 7;
                self.v[x] = src << 1;
                self.v[0xF] = shifted_out;
            }
            _ => self.unknown(op),
        }
    }

    fn execute_misc(&mut self, op: Opcode) -> Result<(), Chip8Error> {
        let x = op.x();

        match op.nn() {
            0x07 => self.v[x] = self.timers.delay(),
            0x0A => self.wait_for_key(x),
            0x15 => self.timers.set_delay(self.v[x]),
            0x18 => self.timers.set_sound(self.v[x]),
            0x1E => self.i = self.i.wrapping_add(self.v[x] as u16),
            0x29 => self.i = Memory::glyph_addr(self.v[x]),
            0x33 => {
                let val = self.v[x];
                self.memory.write(self.i, val / 100)?;
                self.memory.write(self.i + 1, val / 10 % 10)?;
                self.memory.write(self.i + 2, val % 10)?;
            }
            0x55 => {
                for reg in 0..=x {
                    self.memory.write(self.i + reg as u16, self.v[reg])?;
                }
                if self.quirks.index_increment {
                    self.i = self.i.wrapping_add(x as u16 + 1);
                }
            }
            0x65 => {
                for reg in 0..=x {
                    self.v[reg] = self.memory.read(self.i + reg as u16)?;
                }
                if self.quirks.index_increment {
                    self.i = self.i.wrapping_add(x as u16 + 1);
                }
            }
            _ => self.unknown(op),
        }

        Ok(())
    }

    /// FX0A. Holds PC on the instruction (rewinding the fetch advance) until
    /// a key has gone down and come back up; only then does the key land in
    /// Vx and PC move on.
    fn wait_for_key(&mut self, x: usize) {
        match self.key_wait {
            KeyWait::Idle => {
                self.key_wait = KeyWait::AwaitPress;
                self.pc -= 2;
            }
            KeyWait::AwaitPress => {
                if let Some(key) = self.first_key_down() {
                    self.key_wait = KeyWait::AwaitRelease(key);
                }
                self.pc -= 2;
            }
            KeyWait::AwaitRelease(key) => {
                if self.keys.iter().any(|&down| down) {
                    self.pc -= 2;
                } else {
                    self.v[x] = key;
                    self.key_wait = KeyWait::Idle;
                }
            }
        }
    }

    fn first_key_down(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|k| k as u8)
    }

    fn unknown(&self, op: Opcode) {
        // Deliberately a no-op; PC has already moved past the word.
        log::debug!(
            "ignoring unknown opcode {} at {:#05X}",
            op,
            self.pc.wrapping_sub(2)
        );
    }
}

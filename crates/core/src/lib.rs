//! Core emulator primitives and traits.

pub mod rom;

pub mod types {
    /// A rendered framebuffer: one packed `0x00RRGGBB` value per pixel,
    /// row-major, top-left origin.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Frame {
        pub width: u32,
        pub height: u32,
        pub pixels: Vec<u32>,
    }

    impl Frame {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                width,
                height,
                pixels: vec![0; (width * height) as usize],
            }
        }
    }
}

/// Outcome of executing a single instruction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// The display was touched this cycle and the frontend should re-present it.
    pub redraw: bool,
}

/// A high-level System trait tying components together.
///
/// The frontend owns the pacing and the window; the system owns all machine
/// state. Input is pushed into the system between cycles, and the framebuffer
/// comes back out as an owned snapshot so the frontend never aliases live
/// VM state.
pub trait System {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reset to initial power-on state, keeping any loaded ROM.
    fn reset(&mut self);

    /// Load program bytes into the system's memory.
    fn load_rom(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Execute one instruction cycle.
    fn step(&mut self) -> Result<Step, Self::Error>;

    /// Return an owned snapshot of the current display contents.
    fn framebuffer(&self) -> types::Frame;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_initialization() {
        let f = types::Frame::new(64, 32);
        assert_eq!(f.pixels.len(), 64 * 32);
        assert_eq!(f.width, 64);
        assert_eq!(f.height, 32);
    }

    struct MockSystem {
        rom: Vec<u8>,
        steps: u32,
    }

    impl System for MockSystem {
        type Error = std::convert::Infallible;

        fn reset(&mut self) {
            self.steps = 0;
        }

        fn load_rom(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.rom = data.to_vec();
            Ok(())
        }

        fn step(&mut self) -> Result<Step, Self::Error> {
            self.steps += 1;
            Ok(Step { redraw: false })
        }

        fn framebuffer(&self) -> types::Frame {
            types::Frame::new(2, 2)
        }
    }

    #[test]
    fn mock_system_step_and_reset() {
        let mut sys = MockSystem {
            rom: Vec::new(),
            steps: 0,
        };
        sys.load_rom(&[0x12, 0x00]).unwrap();
        assert_eq!(sys.rom.len(), 2);

        let step = sys.step().unwrap();
        assert!(!step.redraw);
        assert_eq!(sys.steps, 1);

        sys.reset();
        assert_eq!(sys.steps, 0);
    }

    #[test]
    fn mock_system_framebuffer_is_owned() {
        let sys = MockSystem {
            rom: Vec::new(),
            steps: 0,
        };
        let a = sys.framebuffer();
        let b = sys.framebuffer();
        assert_eq!(a, b);
    }
}

//! Delay and sound timers.
//!
//! Both timers are 8-bit counters that decrement toward zero at 60 Hz.
//! The cadence comes from the caller (the frontend's scheduler), not from
//! instruction execution: a machine running at 700 or 70000 instructions
//! per second still ticks its timers 60 times per second.

/// The two 60 Hz countdown timers.
#[derive(Debug, Default)]
pub struct Timers {
    delay: u8,
    sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// One 60 Hz tick: decrement both counters, saturating at zero.
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn set_delay(&mut self, val: u8) {
        self.delay = val;
    }

    pub fn set_sound(&mut self, val: u8) {
        self.sound = val;
    }

    /// True while the sound timer is nonzero (the machine's beeper would
    /// be on).
    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_reaches_zero_in_exact_ticks() {
        let mut timers = Timers::new();
        timers.set_delay(10);
        for remaining in (0..10).rev() {
            timers.tick();
            assert_eq!(timers.delay(), remaining);
        }
        assert_eq!(timers.delay(), 0);
    }

    #[test]
    fn test_never_underflows() {
        let mut timers = Timers::new();
        timers.set_delay(1);
        timers.tick();
        timers.tick();
        timers.tick();
        assert_eq!(timers.delay(), 0);
    }

    #[test]
    fn test_sound_active_while_nonzero() {
        let mut timers = Timers::new();
        assert!(!timers.sound_active());
        timers.set_sound(2);
        assert!(timers.sound_active());
        timers.tick();
        assert!(timers.sound_active());
        timers.tick();
        assert!(!timers.sound_active());
    }
}

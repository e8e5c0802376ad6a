//! Interpreter configuration and legacy-compatibility quirks.
//!
//! Historical CHIP-8 interpreters disagree on the semantics of a handful of
//! opcodes. Each point of disagreement is a boolean toggle here, with
//! defaults matching the original COSMAC VIP interpreter. The configuration
//! is immutable once a machine is constructed, so two instances (e.g. under
//! test) can never interfere through shared flags.

/// Behavior toggles for opcodes whose semantics diverged between
/// interpreter generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY6/8XYE: copy Vy into Vx before shifting (VIP behavior).
    /// When false, Vx is shifted in place (CHIP-48/SCHIP behavior).
    pub shift_source_vy: bool,
    /// BNNN: jump to NNN + Vx, where x is the high nibble of NNN
    /// (CHIP-48/SCHIP behavior). When false, the offset always comes
    /// from V0 (VIP behavior).
    pub jump_offset_vx: bool,
    /// FX55/FX65: leave I pointing past the last register touched
    /// (VIP behavior). When false, I is unchanged.
    pub index_increment: bool,
}

impl Default for Quirks {
    /// COSMAC VIP-era semantics.
    fn default() -> Self {
        Self {
            shift_source_vy: true,
            jump_offset_vx: false,
            index_increment: true,
        }
    }
}

/// Machine configuration, fixed at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Interpreter cycle rate. 700 is a comfortable speed for most ROMs.
    pub instructions_per_second: u32,
    pub quirks: Quirks,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instructions_per_second: 700,
            quirks: Quirks::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_vip_semantics() {
        let q = Quirks::default();
        assert!(q.shift_source_vy);
        assert!(!q.jump_offset_vx);
        assert!(q.index_increment);
    }

    #[test]
    fn test_default_cycle_rate() {
        assert_eq!(Config::default().instructions_per_second, 700);
    }
}

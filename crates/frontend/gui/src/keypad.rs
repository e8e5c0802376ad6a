//! Host keyboard to CHIP-8 keypad mapping.
//!
//! The machine's 4x4 hex keypad is mapped onto the matching block of a
//! QWERTY keyboard:
//!
//! ```text
//!   keypad            keyboard
//!   1 2 3 C           1 2 3 4
//!   4 5 6 D           Q W E R
//!   7 8 9 E           A S D F
//!   A 0 B F           Z X C V
//! ```

use minifb::{Key, Window};
use ocho_chip8::NUM_KEYS;

pub const KEY_MAP: [(Key, u8); NUM_KEYS] = [
    (Key::Key1, 0x1),
    (Key::Key2, 0x2),
    (Key::Key3, 0x3),
    (Key::Key4, 0xC),
    (Key::Q, 0x4),
    (Key::W, 0x5),
    (Key::E, 0x6),
    (Key::R, 0xD),
    (Key::A, 0x7),
    (Key::S, 0x8),
    (Key::D, 0x9),
    (Key::F, 0xE),
    (Key::Z, 0xA),
    (Key::X, 0x0),
    (Key::C, 0xB),
    (Key::V, 0xF),
];

/// Snapshot the keypad state from the window. Taken once per instruction
/// cycle so a key transition can never be observed mid-instruction.
pub fn poll(window: &Window) -> [bool; NUM_KEYS] {
    let mut keys = [false; NUM_KEYS];
    for &(key, value) in KEY_MAP.iter() {
        if window.is_key_down(key) {
            keys[value as usize] = true;
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keypad_value_mapped_once() {
        let mut seen = [false; NUM_KEYS];
        for &(_, value) in KEY_MAP.iter() {
            assert!(!seen[value as usize], "key {:X} mapped twice", value);
            seen[value as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_no_duplicate_host_keys() {
        for (i, &(key_a, _)) in KEY_MAP.iter().enumerate() {
            for &(key_b, _) in &KEY_MAP[i + 1..] {
                assert_ne!(key_a, key_b);
            }
        }
    }
}

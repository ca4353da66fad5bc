//! Key codes forwarded to the host's input system
//!
//! Numbering follows the host: printable keys use their upper-case ASCII
//! value, control keys live in the `0x0100_0000` range.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct KeyCode(pub i32);

impl KeyCode {
    pub const SPACE: Self = Self(0x20);

    pub const NUM_0: Self = Self(0x30);
    pub const NUM_1: Self = Self(0x31);
    pub const NUM_2: Self = Self(0x32);
    pub const NUM_3: Self = Self(0x33);
    pub const NUM_4: Self = Self(0x34);
    pub const NUM_5: Self = Self(0x35);
    pub const NUM_6: Self = Self(0x36);
    pub const NUM_7: Self = Self(0x37);
    pub const NUM_8: Self = Self(0x38);
    pub const NUM_9: Self = Self(0x39);

    pub const A: Self = Self(0x41);
    pub const B: Self = Self(0x42);
    pub const C: Self = Self(0x43);
    pub const D: Self = Self(0x44);
    pub const E: Self = Self(0x45);
    pub const F: Self = Self(0x46);
    pub const G: Self = Self(0x47);
    pub const H: Self = Self(0x48);
    pub const I: Self = Self(0x49);
    pub const J: Self = Self(0x4a);
    pub const K: Self = Self(0x4b);
    pub const L: Self = Self(0x4c);
    pub const M: Self = Self(0x4d);
    pub const N: Self = Self(0x4e);
    pub const O: Self = Self(0x4f);
    pub const P: Self = Self(0x50);
    pub const Q: Self = Self(0x51);
    pub const R: Self = Self(0x52);
    pub const S: Self = Self(0x53);
    pub const T: Self = Self(0x54);
    pub const U: Self = Self(0x55);
    pub const V: Self = Self(0x56);
    pub const W: Self = Self(0x57);
    pub const X: Self = Self(0x58);
    pub const Y: Self = Self(0x59);
    pub const Z: Self = Self(0x5a);

    pub const ESCAPE: Self = Self(0x0100_0000);
    pub const TAB: Self = Self(0x0100_0001);
    pub const BACKSPACE: Self = Self(0x0100_0003);
    pub const RETURN: Self = Self(0x0100_0004);
    pub const LEFT: Self = Self(0x0100_0012);
    pub const UP: Self = Self(0x0100_0013);
    pub const RIGHT: Self = Self(0x0100_0014);
    pub const DOWN: Self = Self(0x0100_0015);
    pub const SHIFT: Self = Self(0x0100_0020);
    pub const CONTROL: Self = Self(0x0100_0021);
    pub const ALT: Self = Self(0x0100_0023);

    pub const fn code(self) -> i32 {
        self.0
    }
}

impl From<i32> for KeyCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_keys_are_ascii() {
        assert_eq!(KeyCode::W.code(), 'W' as i32);
        assert_eq!(KeyCode::NUM_7.code(), '7' as i32);
        assert_eq!(KeyCode::SPACE.code(), ' ' as i32);
    }
}

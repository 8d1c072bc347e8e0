use std::vec::Vec;

use crate::escape::ControlCharacter;

pub mod csi {
    pub const UP: &str = "\x1b[A";
    pub const DOWN: &str = "\x1b[B";
    pub const RIGHT: &str = "\x1b[C";
    pub const LEFT: &str = "\x1b[D";
    pub const SHIFT_LEFT: &str = "\x1b[1;2D";
    pub const SHIFT_RIGHT: &str = "\x1b[1;2C";
    pub const HOME: &str = "\x1b[1~";
    pub const DELETE: &str = "\x1b[3~";
    pub const END: &str = "\x1b[4~";
}

pub trait AsByteVec {
    fn as_byte_vec(self) -> Vec<u8>;
}

impl AsByteVec for &str {
    fn as_byte_vec(self) -> Vec<u8> {
        self.bytes().collect()
    }
}

impl AsByteVec for &[u8] {
    fn as_byte_vec(self) -> Vec<u8> {
        self.to_vec()
    }
}

impl AsByteVec for ControlCharacter {
    fn as_byte_vec(self) -> Vec<u8> {
        vec![self.into()]
    }
}

impl AsByteVec for Vec<ControlCharacter> {
    fn as_byte_vec(self) -> Vec<u8> {
        self.into_iter().map(|c| c.into()).collect()
    }
}

impl<const N: usize> AsByteVec for [ControlCharacter; N] {
    fn as_byte_vec(self) -> Vec<u8> {
        self.into_iter().map(|c| c.into()).collect()
    }
}

impl AsByteVec for Vec<&str> {
    fn as_byte_vec(self) -> Vec<u8> {
        self.into_iter().flat_map(|s| s.bytes()).collect()
    }
}

impl<const N: usize> AsByteVec for [&str; N] {
    fn as_byte_vec(self) -> Vec<u8> {
        self.into_iter().flat_map(|s| s.bytes()).collect()
    }
}

#[test]
fn byte_vecs() {
    use ControlCharacter::*;

    assert_eq!("ab".as_byte_vec(), b"ab");
    assert_eq!(CtrlC.as_byte_vec(), [0x3]);
    assert_eq!([Tab, CarriageReturn].as_byte_vec(), [0x9, 0xd]);
    assert_eq!(vec![csi::UP, "x"].as_byte_vec(), b"\x1b[Ax");
    assert_eq!([csi::HOME, csi::END].as_byte_vec(), b"\x1b[1~\x1b[4~");
}

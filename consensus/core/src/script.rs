use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encoding::{write_var_bytes, Encodable};
use std::io::{self, Write};

/// Script opcodes used when building scripts
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    OP_0 = 0x00,
    OP_PUSHDATA1 = 0x4c,
    OP_PUSHDATA2 = 0x4d,
    OP_PUSHDATA4 = 0x4e,
    OP_1NEGATE = 0x4f,
    OP_1 = 0x51,
    OP_16 = 0x60,
    OP_RETURN = 0x6a,
    OP_DUP = 0x76,
    OP_EQUAL = 0x87,
    OP_EQUALVERIFY = 0x88,
    OP_HASH160 = 0xa9,
    OP_CHECKSIG = 0xac,
}

/// Serialized script bytes with a builder API.
///
/// Builder methods take `self` by value so scripts can be written as a chain:
/// `Script::new().push_slice(&pubkey).push_opcode(Opcode::OP_CHECKSIG)`.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Script(Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_opcode(mut self, opcode: Opcode) -> Self {
        self.0.push(opcode as u8);
        self
    }

    /// Pushes an integer, using the small-integer opcodes for -1 and 0..=16 and
    /// a minimally encoded script number otherwise.
    pub fn push_int(mut self, n: i64) -> Self {
        match n {
            -1 => self.0.push(Opcode::OP_1NEGATE as u8),
            0 => self.0.push(Opcode::OP_0 as u8),
            1..=16 => self.0.push(Opcode::OP_1 as u8 + (n as u8 - 1)),
            _ => return self.push_slice(&script_num_bytes(n)),
        }
        self
    }

    /// Pushes the script-number encoding of `n` as data, never as an opcode.
    pub fn push_num(self, n: i64) -> Self {
        self.push_slice(&script_num_bytes(n))
    }

    /// Pushes raw data with the smallest push opcode that fits it.
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < Opcode::OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(Opcode::OP_PUSHDATA1 as u8);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(Opcode::OP_PUSHDATA2 as u8);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(Opcode::OP_PUSHDATA4 as u8);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }
}

/// Minimal little-endian sign-magnitude encoding used for script numbers.
pub fn script_num_bytes(n: i64) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }

    let negative = n < 0;
    let mut abs = n.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while abs > 0 {
        out.push((abs & 0xff) as u8);
        abs >>= 8;
    }

    // The top bit carries the sign, add a byte if the magnitude already uses it
    let last = out.len() - 1;
    if out[last] & 0x80 != 0 {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        out[last] |= 0x80;
    }
    out
}

impl Encodable for Script {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<usize> {
        write_var_bytes(writer, &self.0)
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script({})", hex::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_numbers() {
        assert_eq!(script_num_bytes(0), Vec::<u8>::new());
        assert_eq!(script_num_bytes(4), vec![0x04]);
        assert_eq!(script_num_bytes(-1), vec![0x81]);
        assert_eq!(script_num_bytes(0x80), vec![0x80, 0x00]);
        assert_eq!(script_num_bytes(-0x80), vec![0x80, 0x80]);
        assert_eq!(script_num_bytes(486_604_799), vec![0xff, 0xff, 0x00, 0x1d]);
    }

    #[test]
    fn push_int_uses_small_int_opcodes() {
        assert_eq!(Script::new().push_int(0).as_bytes(), &[0x00]);
        assert_eq!(Script::new().push_int(-1).as_bytes(), &[0x4f]);
        assert_eq!(Script::new().push_int(1).as_bytes(), &[0x51]);
        assert_eq!(Script::new().push_int(16).as_bytes(), &[0x60]);
        assert_eq!(Script::new().push_int(17).as_bytes(), &[0x01, 0x11]);
    }

    #[test]
    fn push_num_is_always_data() {
        assert_eq!(Script::new().push_num(4).as_bytes(), &[0x01, 0x04]);
    }

    #[test]
    fn push_slice_picks_push_opcode() {
        assert_eq!(Script::new().push_slice(&[0xaa; 75]).len(), 76);
        let script = Script::new().push_slice(&[0xaa; 76]);
        assert_eq!(&script.as_bytes()[..2], &[0x4c, 76]);
        let script = Script::new().push_slice(&[0xaa; 256]);
        assert_eq!(&script.as_bytes()[..3], &[0x4d, 0x00, 0x01]);
    }

    #[test]
    fn pay_to_pubkey_layout() {
        let pubkey = [0x04u8; 65];
        let script = Script::new().push_slice(&pubkey).push_opcode(Opcode::OP_CHECKSIG);
        assert_eq!(script.len(), 67);
        assert_eq!(script.as_bytes()[0], 65);
        assert_eq!(script.as_bytes()[66], 0xac);
    }
}

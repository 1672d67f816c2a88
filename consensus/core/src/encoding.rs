//! Consensus (wire) encoding of the block primitives.
//!
//! Integers are little-endian, variable length fields carry a CompactSize
//! length prefix. Encoding into a [`HashWriter`] yields the object's id.

use crate::Hash;
use ix_hashes::HashWriter;
use std::io::{self, Write};

pub trait Encodable {
    /// Writes the consensus encoding and returns the number of bytes written.
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<usize>;

    /// Consensus encoding as an owned buffer
    fn encoded(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.consensus_encode(&mut buf);
        buf
    }

    /// Double-SHA256 of the consensus encoding
    fn encoded_hash(&self) -> Hash {
        let mut writer = HashWriter::new();
        let _ = self.consensus_encode(&mut writer);
        writer.finalize()
    }
}

/// Writes a CompactSize length prefix.
pub fn write_compact_size<W: Write + ?Sized>(writer: &mut W, n: u64) -> io::Result<usize> {
    match n {
        0..=0xfc => {
            writer.write_all(&[n as u8])?;
            Ok(1)
        }
        0xfd..=0xffff => {
            writer.write_all(&[0xfd])?;
            writer.write_all(&(n as u16).to_le_bytes())?;
            Ok(3)
        }
        0x1_0000..=0xffff_ffff => {
            writer.write_all(&[0xfe])?;
            writer.write_all(&(n as u32).to_le_bytes())?;
            Ok(5)
        }
        _ => {
            writer.write_all(&[0xff])?;
            writer.write_all(&n.to_le_bytes())?;
            Ok(9)
        }
    }
}

/// Writes a length-prefixed byte string.
pub fn write_var_bytes<W: Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> io::Result<usize> {
    let len = write_compact_size(writer, bytes.len() as u64)?;
    writer.write_all(bytes)?;
    Ok(len + bytes.len())
}

/// Writes a length-prefixed list of encodable items.
pub fn write_list<W: Write + ?Sized, T: Encodable>(writer: &mut W, items: &[T]) -> io::Result<usize> {
    let mut len = write_compact_size(writer, items.len() as u64)?;
    for item in items {
        len += item.consensus_encode(writer)?;
    }
    Ok(len)
}

macro_rules! impl_int_encodable {
    ($($t:ty),*) => {
        $(
            impl Encodable for $t {
                fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<usize> {
                    let bytes = self.to_le_bytes();
                    writer.write_all(&bytes)?;
                    Ok(bytes.len())
                }
            }
        )*
    };
}

impl_int_encodable!(u8, u16, u32, u64, i32, i64);

impl Encodable for Hash {
    fn consensus_encode<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<usize> {
        writer.write_all(self.as_bytes())?;
        Ok(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact_size(n: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        let len = write_compact_size(&mut buf, n).unwrap();
        assert_eq!(len, buf.len());
        buf
    }

    #[test]
    fn compact_size_boundaries() {
        assert_eq!(compact_size(0), vec![0x00]);
        assert_eq!(compact_size(0xfc), vec![0xfc]);
        assert_eq!(compact_size(0xfd), vec![0xfd, 0xfd, 0x00]);
        assert_eq!(compact_size(0xffff), vec![0xfd, 0xff, 0xff]);
        assert_eq!(compact_size(0x1_0000), vec![0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(compact_size(0x1_0000_0000), vec![0xff, 0, 0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn integers_are_little_endian() {
        assert_eq!(0x0102_0304u32.encoded(), vec![0x04, 0x03, 0x02, 0x01]);
        assert_eq!((-1i32).encoded(), vec![0xff; 4]);
        assert_eq!(5_000_000_000i64.encoded(), 5_000_000_000i64.to_le_bytes().to_vec());
    }

    #[test]
    fn var_bytes_prefix() {
        let mut buf = Vec::new();
        assert_eq!(write_var_bytes(&mut buf, b"abc").unwrap(), 4);
        assert_eq!(buf, vec![3, b'a', b'b', b'c']);
    }
}

//! Compact ("nBits") encoding of 256-bit targets.
//!
//! The top byte is the length of the number in bytes, the lower three bytes are
//! the most significant bytes of the number. Bit `0x00800000` is a sign bit,
//! which is why a mantissa whose top bit would be set gets shifted into an extra
//! byte on encoding. The encoding is lossy: only the three most significant
//! bytes survive.

use primitive_types::U256;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Result of decoding a compact value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompactTarget {
    pub value: U256,
    /// The sign bit was set on a non-zero mantissa
    pub negative: bool,
    /// The encoded number does not fit in 256 bits
    pub overflow: bool,
}

impl CompactTarget {
    /// A target usable for proof-of-work checks: non-negative, non-zero, no
    /// overflow and not above `limit`.
    pub fn is_in_range(&self, limit: &U256) -> bool {
        !self.negative && !self.overflow && !self.value.is_zero() && self.value <= *limit
    }
}

/// Decodes a compact value, reporting the sign and overflow conditions.
pub fn decode_compact(bits: u32) -> CompactTarget {
    let size = (bits >> 24) as usize;
    let mut word = bits & MANTISSA_MASK;

    let value = if size <= 3 {
        word >>= 8 * (3 - size);
        U256::from(word)
    } else {
        let shift = 8 * (size - 3);
        if shift >= 256 {
            U256::zero()
        } else {
            U256::from(word) << shift
        }
    };

    let negative = word != 0 && (bits & SIGN_BIT) != 0;
    let overflow = word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));

    CompactTarget { value, negative, overflow }
}

/// Encodes `value` in compact form, setting the sign bit when `negative` is
/// requested and the mantissa is non-zero.
pub fn encode_compact(value: &U256, negative: bool) -> u32 {
    let mut size = (value.bits() + 7) / 8;
    let mut compact = if size <= 3 {
        (value.low_u64() << (8 * (3 - size))) as u32
    } else {
        (*value >> (8 * (size - 3))).low_u64() as u32
    };

    // The mantissa is signed, move a set top bit into the next byte
    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }

    debug_assert!(size < 0x100);
    compact |= (size as u32) << 24;
    if negative && (compact & MANTISSA_MASK) != 0 {
        compact |= SIGN_BIT;
    }
    compact
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u256_hex(s: &str) -> U256 {
        U256::from_str_radix(s, 16).unwrap()
    }

    #[test]
    fn zero_mantissas_decode_to_zero() {
        for bits in [
            0x0000_0000u32,
            0x0012_3456,
            0x0100_3456,
            0x0200_0056,
            0x0300_0000,
            0x0400_0000,
            0x0092_3456,
            0x0180_3456,
            0x0280_0056,
            0x0380_0000,
            0x0480_0000,
        ] {
            let decoded = decode_compact(bits);
            assert!(decoded.value.is_zero(), "{:08x}", bits);
            assert!(!decoded.negative, "{:08x}", bits);
            assert!(!decoded.overflow, "{:08x}", bits);
            assert_eq!(encode_compact(&decoded.value, false), 0);
        }
    }

    #[test]
    fn small_sizes_truncate_mantissa() {
        let decoded = decode_compact(0x0112_3456);
        assert_eq!(decoded.value, U256::from(0x12));
        assert_eq!(encode_compact(&decoded.value, false), 0x0112_0000);

        let decoded = decode_compact(0x0212_3456);
        assert_eq!(decoded.value, U256::from(0x1234));
        assert_eq!(encode_compact(&decoded.value, false), 0x0212_3400);

        let decoded = decode_compact(0x0312_3456);
        assert_eq!(decoded.value, U256::from(0x12_3456));
        assert_eq!(encode_compact(&decoded.value, false), 0x0312_3456);
    }

    #[test]
    fn negative_values() {
        let decoded = decode_compact(0x01fe_dcba);
        assert_eq!(decoded.value, U256::from(0x7e));
        assert!(decoded.negative);
        assert_eq!(encode_compact(&decoded.value, true), 0x01fe_0000);

        let decoded = decode_compact(0x0492_3456);
        assert_eq!(decoded.value, U256::from(0x1234_5600u64));
        assert!(decoded.negative);
        assert!(!decoded.overflow);
        assert_eq!(encode_compact(&decoded.value, true), 0x0492_3456);
    }

    #[test]
    fn larger_sizes() {
        let decoded = decode_compact(0x0412_3456);
        assert_eq!(decoded.value, U256::from(0x1234_5600u64));
        assert_eq!(encode_compact(&decoded.value, false), 0x0412_3456);

        let decoded = decode_compact(0x0500_9234);
        assert_eq!(decoded.value, U256::from(0x9234_0000u64));
        assert_eq!(encode_compact(&decoded.value, false), 0x0500_9234);

        let decoded = decode_compact(0x2012_3456);
        assert_eq!(decoded.value, u256_hex("1234560000000000000000000000000000000000000000000000000000000000"));
        assert!(!decoded.overflow);
        assert_eq!(encode_compact(&decoded.value, false), 0x2012_3456);
    }

    #[test]
    fn overflow_detection() {
        assert!(decode_compact(0xff12_3456).overflow);
        // 3 mantissa bytes only fit up to size 32
        assert!(decode_compact(0x2112_3456).overflow);
        // one significant byte fits up to size 34
        assert!(!decode_compact(0x2200_0001).overflow);
        assert!(decode_compact(0x2300_0001).overflow);
        assert!(decode_compact(0x2200_0100).overflow);
        assert!(!decode_compact(0x2100_0100).overflow);
    }

    #[test]
    fn sign_bit_moves_into_extra_byte() {
        assert_eq!(encode_compact(&U256::from(0x80), false), 0x0200_8000);
    }

    #[test]
    fn pow_limits_encode_to_known_bits() {
        let main = u256_hex("00000000ffffffffffffffffffffffffffffffffffffffffffffffffffffffff");
        assert_eq!(encode_compact(&main, false), 0x1d00_ffff);
        let regtest = u256_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff");
        assert_eq!(encode_compact(&regtest, false), 0x207f_ffff);
    }

    #[test]
    fn encode_is_left_inverse_of_decode() {
        for bits in [0x1d00_ffffu32, 0x1b04_04cb, 0x207f_ffff, 0x0312_3456, 0x0412_3456, 0x1c05_a3f4, 0x1d01_2345] {
            let decoded = decode_compact(bits);
            let again = decode_compact(encode_compact(&decoded.value, decoded.negative));
            assert_eq!(again, decoded, "{:08x}", bits);
        }
    }

    #[test]
    fn normalization_holds_for_every_exponent() {
        let mantissas = [
            0x00_0000u32, 0x00_0001, 0x00_00ff, 0x00_0100, 0x00_ffff, 0x01_2345, 0x7f_ffff,
            // sign bit set
            0x80_0000, 0x80_0001, 0x92_3456, 0xff_ffff,
        ];
        let mut checked = 0;
        for size in 0u32..=34 {
            for mantissa in mantissas {
                let bits = size << 24 | mantissa;
                let decoded = decode_compact(bits);
                if decoded.overflow {
                    continue;
                }
                let encoded = encode_compact(&decoded.value, decoded.negative);
                assert_eq!(decode_compact(encoded), decoded, "{:08x}", bits);
                // the normalized form is a fixed point
                assert_eq!(encode_compact(&decode_compact(encoded).value, decoded.negative), encoded, "{:08x}", bits);
                checked += 1;
            }
        }
        assert!(checked > 300);
    }

    #[test]
    fn range_check() {
        let limit = decode_compact(0x1d00_ffff).value;
        assert!(decode_compact(0x1d00_ffff).is_in_range(&limit));
        assert!(!decode_compact(0x1d01_0000).is_in_range(&limit));
        assert!(!decode_compact(0x0000_0000).is_in_range(&limit));
        assert!(!decode_compact(0x0492_3456).is_in_range(&limit));
    }
}

//! SCALE compact-length integer encoding.
//!
//! The low two bits of the first byte select the length class:
//!
//! | class | range            | layout                                   |
//! |-------|------------------|------------------------------------------|
//! | `00`  | `0..2^6`         | one byte, `v << 2`                       |
//! | `01`  | `2^6..2^14`      | two bytes LE, `(v << 2) + 1`             |
//! | `10`  | `2^14..2^30`     | four bytes LE, `(v << 2) + 2`            |
//! | `11`  | `2^30..`         | `(n << 2) + 3`, then `4 + n` bytes LE    |

use crate::error::{Error, Result};

const SINGLE_BYTE_LIMIT: u64 = 1 << 6;
const TWO_BYTE_LIMIT: u64 = 1 << 14;
const FOUR_BYTE_LIMIT: u64 = 1 << 30;

/// Largest number of bytes beyond four that big-integer mode can carry.
const MAX_EXTRA_BYTES: usize = 4;

/// Encode `value` in compact form.
///
/// # Errors
///
/// Returns [`Error::CompactOverflow`] if the value needs more than
/// `4 + MAX_EXTRA_BYTES` bytes, which cannot happen for a `u64`.
pub fn encode(value: u64) -> Result<Vec<u8>> {
    if value < SINGLE_BYTE_LIMIT {
        return Ok(vec![(value as u8) << 2]);
    }
    if value < TWO_BYTE_LIMIT {
        return Ok((((value as u16) << 2) | 0b01).to_le_bytes().to_vec());
    }
    if value < FOUR_BYTE_LIMIT {
        return Ok((((value as u32) << 2) | 0b10).to_le_bytes().to_vec());
    }

    let significant = 8 - (value.leading_zeros() / 8) as usize;
    let extra = significant.max(4) - 4;
    if extra > MAX_EXTRA_BYTES {
        return Err(Error::CompactOverflow(value));
    }

    let mut out = Vec::with_capacity(5 + extra);
    out.push(((extra as u8) << 2) | 0b11);
    out.extend_from_slice(&value.to_le_bytes()[..4 + extra]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_single_byte() {
        assert_eq!(encode(0).unwrap(), hex!("00"));
        assert_eq!(encode(1).unwrap(), hex!("04"));
        assert_eq!(encode(63).unwrap(), hex!("fc"));
    }

    #[test]
    fn test_two_bytes() {
        assert_eq!(encode(64).unwrap(), hex!("0101"));
        assert_eq!(encode(16383).unwrap(), hex!("fdff"));
    }

    #[test]
    fn test_four_bytes() {
        assert_eq!(encode(16384).unwrap(), hex!("02000100"));
        assert_eq!(encode(1_073_741_823).unwrap(), hex!("feffffff"));
    }

    #[test]
    fn test_big_integer_mode() {
        assert_eq!(encode(1_073_741_824).unwrap(), hex!("0300000040"));
        assert_eq!(encode((1 << 32) - 1).unwrap(), hex!("03ffffffff"));
        assert_eq!(encode(1 << 32).unwrap(), hex!("070000000001"));
        assert_eq!(encode(1 << 40).unwrap(), hex!("0b000000000001"));
        assert_eq!(encode(1 << 48).unwrap(), hex!("0f00000000000001"));
        assert_eq!(encode((1 << 56) - 1).unwrap(), hex!("0fffffffffffffff"));
        assert_eq!(encode(1 << 56).unwrap(), hex!("130000000000000001"));
        assert_eq!(encode(u64::MAX).unwrap(), hex!("13ffffffffffffffff"));
    }

    #[test]
    fn test_length_class_bits() {
        for (value, class) in [(5u64, 0u8), (300, 1), (70_000, 2), (1 << 31, 3)] {
            assert_eq!(encode(value).unwrap()[0] & 0b11, class, "value {value}");
        }
    }
}

use crate::coder::CoderVariant;
use crate::constants::BIT_VARIANT_LOWER_BOUND;
use crate::errors::{UpkrError, UpkrResult};

/// The compact rANS variant: a 16-bit state, renormalized one bit at a time
/// (LSB-first within each input byte), with a lower bound of 32768. Smaller
/// per-symbol overhead at the cost of coarser renormalization; incompatible
/// with [`super::ByteVariant`] streams.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitVariant;

/// Tracks a byte cursor plus whatever bits of the current input byte have
/// not yet been consumed.
#[derive(Clone, Copy, Debug, Default)]
pub struct BitDecodeCursor {
  byte_pos: usize,
  current_byte: u8,
  bits_left: u32,
}

/// An unpacked bit stack: bits are pushed in reverse stream order during
/// encoding, then reversed and packed LSB-first into bytes by `finish`.
#[derive(Debug, Default)]
pub struct BitEncodeStaging {
  bits: Vec<bool>,
}

impl CoderVariant for BitVariant {
  const LOWER_BOUND: u32 = BIT_VARIANT_LOWER_BOUND;
  const UNIT_BITS: u32 = 1;

  type DecodeCursor = BitDecodeCursor;
  type EncodeStaging = BitEncodeStaging;

  #[inline]
  fn pull(cursor: &mut BitDecodeCursor, input: &[u8]) -> UpkrResult<u32> {
    if cursor.bits_left == 0 {
      let byte = *input
        .get(cursor.byte_pos)
        .ok_or_else(UpkrError::input_underrun)?;
      cursor.byte_pos += 1;
      cursor.current_byte = byte;
      cursor.bits_left = 8;
    }
    let bit = cursor.current_byte & 1;
    cursor.current_byte >>= 1;
    cursor.bits_left -= 1;
    Ok(bit as u32)
  }

  #[inline]
  fn push(staging: &mut BitEncodeStaging, unit: u32) {
    staging.bits.push(unit & 1 != 0);
  }

  fn finish(mut staging: BitEncodeStaging) -> Vec<u8> {
    staging.bits.reverse();
    let mut out = Vec::with_capacity(staging.bits.len().div_ceil(8));
    let mut current = 0u8;
    let mut filled = 0u32;
    for bit in staging.bits {
      current |= (bit as u8) << filled;
      filled += 1;
      if filled == 8 {
        out.push(current);
        current = 0;
        filled = 0;
      }
    }
    if filled > 0 {
      out.push(current);
    }
    out
  }
}

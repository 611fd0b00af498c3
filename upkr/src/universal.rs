//! The universal (Elias-gamma-like) integer coder used for match offsets and
//! lengths: a value `n >= 1` is coded as its bit-length minus one "continue"
//! bits, each carrying one of `n`'s bits below the leading one, followed by
//! a "stop" bit. Every bit position gets its own pair of contexts
//! (continue/value), so the coder's own statistics adapt separately at each
//! position instead of sharing one context across all lengths.

use crate::coder::{CoderVariant, Decoder, Encoder};
use crate::constants::MAX_OFFSET_BITS;
use crate::errors::{UpkrError, UpkrResult};

/// Decodes a universal-coded integer (always `>= 1`) starting at `base_ctx`.
pub fn decode_uint<V: CoderVariant>(decoder: &mut Decoder<V>, base_ctx: usize) -> UpkrResult<u32> {
  let mut value: u32 = 0;
  let mut bit_pos: u32 = 0;
  let mut ctx = base_ctx;

  while decoder.decode_bit(ctx)? {
    if decoder.decode_bit(ctx + 1)? {
      value |= 1 << bit_pos;
    }
    bit_pos += 1;
    if bit_pos >= MAX_OFFSET_BITS {
      return Err(UpkrError::corrupt_stream(
        "universal code exceeded the maximum representable bit width",
      ));
    }
    ctx += 2;
  }

  Ok(value | (1 << bit_pos))
}

/// Encodes `n` (must be `>= 1`) as a universal code starting at `base_ctx`.
pub fn encode_uint<V: CoderVariant>(encoder: &mut Encoder<V>, base_ctx: usize, n: u32) {
  debug_assert!(n >= 1, "universal coder cannot represent zero");

  let top_bit = 31 - n.leading_zeros();
  let mut ctx = base_ctx;

  for bit_pos in 0..top_bit {
    encoder.encode_bit(ctx, true);
    encoder.encode_bit(ctx + 1, (n >> bit_pos) & 1 != 0);
    ctx += 2;
  }
  encoder.encode_bit(ctx, false);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coder::ByteVariant;

  fn assert_roundtrips(values: &[u32]) {
    let mut encoder = Encoder::<ByteVariant>::new();
    for &n in values {
      encode_uint(&mut encoder, 0, n);
    }
    let encoded = encoder.finish();

    let mut decoder = Decoder::<ByteVariant>::new(&encoded).unwrap();
    for &n in values {
      assert_eq!(decode_uint(&mut decoder, 0).unwrap(), n);
    }
  }

  #[test]
  fn small_values_roundtrip() {
    assert_roundtrips(&[1, 2, 3, 4, 5, 6, 7, 8]);
  }

  #[test]
  fn powers_of_two_and_neighbors_roundtrip() {
    let mut values = Vec::new();
    for shift in 0..24 {
      let p = 1u32 << shift;
      values.push(p);
      if p > 1 {
        values.push(p - 1);
      }
      values.push(p + 1);
    }
    assert_roundtrips(&values);
  }

  #[test]
  fn large_values_roundtrip() {
    assert_roundtrips(&[u32::MAX, u32::MAX - 1, 1 << 30, (1 << 30) + 12345]);
  }

  #[test]
  fn matches_reference_bit_sequence_for_five() {
    // 5 = 0b101: continue,1 ; continue,0 ; stop
    let mut encoder = Encoder::<ByteVariant>::new();
    encode_uint(&mut encoder, 0, 5);
    let encoded = encoder.finish();

    let mut decoder = Decoder::<ByteVariant>::new(&encoded).unwrap();
    assert!(decoder.decode_bit(0).unwrap()); // continue
    assert!(decoder.decode_bit(1).unwrap()); // bit 0 = 1
    assert!(decoder.decode_bit(2).unwrap()); // continue
    assert!(!decoder.decode_bit(3).unwrap()); // bit 1 = 0
    assert!(!decoder.decode_bit(4).unwrap()); // stop
  }
}

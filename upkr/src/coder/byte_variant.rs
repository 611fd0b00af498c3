use crate::coder::CoderVariant;
use crate::constants::BYTE_VARIANT_LOWER_BOUND;
use crate::errors::{UpkrError, UpkrResult};

/// The default rANS variant: a 20+ bit state, renormalized one whole byte
/// (MSB-appended on decode refill) at a time, with a lower bound of 4096.
#[derive(Clone, Copy, Debug, Default)]
pub struct ByteVariant;

impl CoderVariant for ByteVariant {
  const LOWER_BOUND: u32 = BYTE_VARIANT_LOWER_BOUND;
  const UNIT_BITS: u32 = 8;

  type DecodeCursor = usize;
  type EncodeStaging = Vec<u8>;

  #[inline]
  fn pull(cursor: &mut usize, input: &[u8]) -> UpkrResult<u32> {
    let byte = *input.get(*cursor).ok_or_else(UpkrError::input_underrun)?;
    *cursor += 1;
    Ok(byte as u32)
  }

  #[inline]
  fn push(staging: &mut Vec<u8>, unit: u32) {
    staging.push(unit as u8);
  }

  fn finish(mut staging: Vec<u8>) -> Vec<u8> {
    staging.reverse();
    staging
  }
}

//! The public buffer-in/buffer-out API. Named "standalone" after the
//! original C library's calling convention: no header, no framing beyond the
//! bitstream itself, one call in and one call out.

use crate::coder::{ByteVariant, CoderVariant, Decoder, Encoder};
use crate::errors::UpkrResult;
use crate::level::CompressionLevel;
use crate::matcher::find_tokens;
use crate::token::{decode_stream, encode_stream};

/// Compresses `input` at the given level, allocating exactly as much output
/// as is needed. Always produces a [`ByteVariant`] stream; use
/// [`compress_with`] to pick [`crate::BitVariant`] instead.
pub fn compress(input: &[u8], level: CompressionLevel) -> Vec<u8> {
  compress_with::<ByteVariant>(input, level)
}

/// Compresses `input` at the given level, driving the rANS coder as variant
/// `V` (see [`crate::ByteVariant`]/[`crate::BitVariant`]). The two variants'
/// streams are not wire-compatible: whatever produced a stream must match
/// what decodes it, here and in [`uncompress_with`].
pub fn compress_with<V: CoderVariant>(input: &[u8], level: CompressionLevel) -> Vec<u8> {
  let tokens = find_tokens(input, level);
  let mut encoder = Encoder::<V>::new();
  encode_stream(&mut encoder, &tokens);
  encoder.finish()
}

/// Compresses `input` into `out`, returning the number of bytes the result
/// occupies. If that count exceeds `out.len()`, nothing was written and the
/// caller should retry with a larger buffer; this is a sizing signal, not an
/// error (no data is lost).
pub fn compress_into(out: &mut [u8], input: &[u8], level: CompressionLevel) -> usize {
  let compressed = compress(input, level);
  if compressed.len() <= out.len() {
    out[..compressed.len()].copy_from_slice(&compressed);
  }
  compressed.len()
}

/// Decompresses a [`ByteVariant`] stream, allocating exactly as much output
/// as is needed. Use [`uncompress_with`] to decode a [`crate::BitVariant`]
/// stream instead.
pub fn uncompress(input: &[u8]) -> UpkrResult<Vec<u8>> {
  uncompress_with::<ByteVariant>(input)
}

/// Decompresses `input` as variant `V`, allocating exactly as much output as
/// is needed. `V` must match whatever variant produced `input`.
pub fn uncompress_with<V: CoderVariant>(input: &[u8]) -> UpkrResult<Vec<u8>> {
  let mut decoder = Decoder::<V>::new(input)?;
  let mut output = Vec::new();
  decode_stream(&mut decoder, &mut output)?;
  Ok(output)
}

/// Decompresses `input` into `out`, returning the number of bytes the result
/// occupies. Same "retry with a bigger buffer" sizing contract as
/// [`compress_into`]; unlike compression, decoding itself still runs to
/// completion into an internal buffer regardless of `out`'s size, since a
/// back-reference may need to read bytes the caller's buffer has no room
/// for.
pub fn uncompress_into(out: &mut [u8], input: &[u8]) -> UpkrResult<usize> {
  let decompressed = uncompress(input)?;
  if decompressed.len() <= out.len() {
    out[..decompressed.len()].copy_from_slice(&decompressed);
  }
  Ok(decompressed.len())
}

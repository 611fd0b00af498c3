//! The LZ instruction stream: literals and back-references, plus the
//! bit-level framing around them (is-match, offset reuse, end marker).
//!
//! This is the layer that turns a [`Token`] sequence (produced by
//! [`crate::matcher`]) into [`crate::coder`] bit calls and back. It owns no
//! bytes itself during decode except the output buffer it reconstructs into.

use crate::coder::{CoderVariant, Decoder, Encoder};
use crate::constants::{CTX_HAS_OFFSET, CTX_IS_MATCH, CTX_LENGTH_BASE, CTX_OFFSET_BASE};
use crate::errors::{UpkrError, UpkrResult};
use crate::universal::{decode_uint, encode_uint};

/// One LZ instruction: emit a literal byte, or copy `length` bytes from
/// `offset` bytes back in the output produced so far. `offset` is always
/// `>= 1`; a match with `offset == 0` only ever appears internally as the
/// wire encoding of end-of-stream and is never exposed as a `Token`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
  Literal(u8),
  Match { offset: u32, length: u32 },
}

/// Decodes a full token stream, reconstructing bytes directly into `output`
/// (matches need to read back bytes they themselves just wrote, so there is
/// no intermediate `Vec<Token>` on the decode path).
pub fn decode_stream<V: CoderVariant>(
  decoder: &mut Decoder<V>,
  output: &mut Vec<u8>,
) -> UpkrResult<()> {
  let mut prev_was_match = false;
  let mut offset: u32 = 0;

  loop {
    if decoder.decode_bit(CTX_IS_MATCH)? {
      if prev_was_match || decoder.decode_bit(CTX_HAS_OFFSET)? {
        let coded = decode_uint(decoder, CTX_OFFSET_BASE)?;
        if coded == 1 {
          break;
        }
        offset = coded - 1;
      }

      let length = decode_uint(decoder, CTX_LENGTH_BASE)?;
      let offset_usize = offset as usize;
      if offset_usize == 0 || offset_usize > output.len() {
        return Err(UpkrError::invalid_offset(offset as u64, output.len() as u64));
      }

      let start = output.len() - offset_usize;
      for i in 0..length as usize {
        let byte = output[start + i];
        output.push(byte);
      }
      log::trace!(
        "decoded match: offset={} length={} (output now {} bytes)",
        offset_usize,
        length,
        output.len(),
      );
      prev_was_match = true;
    } else {
      let mut node: usize = 1;
      while node < 256 {
        let bit = decoder.decode_bit(node)?;
        node = (node << 1) | bit as usize;
      }
      output.push(node as u8);
      log::trace!("decoded literal: {:#04x}", node as u8);
      prev_was_match = false;
    }
  }

  log::debug!("decoded {} bytes total", output.len());
  Ok(())
}

/// Encodes `tokens` followed by the end-of-stream marker.
pub fn encode_stream<V: CoderVariant>(encoder: &mut Encoder<V>, tokens: &[Token]) {
  let mut prev_was_match = false;
  let mut prev_offset: u32 = 0;

  for &token in tokens {
    match token {
      Token::Literal(byte) => {
        encoder.encode_bit(CTX_IS_MATCH, false);
        let mut node: usize = 1;
        for bit_pos in (0..8).rev() {
          let bit = (byte >> bit_pos) & 1 != 0;
          encoder.encode_bit(node, bit);
          node = (node << 1) | bit as usize;
        }
        prev_was_match = false;
      }
      Token::Match { offset, length } => {
        debug_assert!(offset >= 1, "match offset must be positive");
        encoder.encode_bit(CTX_IS_MATCH, true);

        let reuse = !prev_was_match && offset == prev_offset;
        if !prev_was_match {
          encoder.encode_bit(CTX_HAS_OFFSET, !reuse);
        }
        if prev_was_match || !reuse {
          encode_uint(encoder, CTX_OFFSET_BASE, offset + 1);
        }
        encode_uint(encoder, CTX_LENGTH_BASE, length);

        prev_offset = offset;
        prev_was_match = true;
      }
    }
  }

  encoder.encode_bit(CTX_IS_MATCH, true);
  if !prev_was_match {
    encoder.encode_bit(CTX_HAS_OFFSET, true);
  }
  encode_uint(encoder, CTX_OFFSET_BASE, 1);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coder::ByteVariant;

  fn roundtrip(tokens: &[Token]) -> Vec<u8> {
    let mut encoder = Encoder::<ByteVariant>::new();
    encode_stream(&mut encoder, tokens);
    let encoded = encoder.finish();

    let mut decoder = Decoder::<ByteVariant>::new(&encoded).unwrap();
    let mut output = Vec::new();
    decode_stream(&mut decoder, &mut output).unwrap();
    output
  }

  #[test]
  fn literals_only() {
    let tokens: Vec<Token> = b"hello, world"
      .iter()
      .map(|&b| Token::Literal(b))
      .collect();
    assert_eq!(roundtrip(&tokens), b"hello, world");
  }

  #[test]
  fn empty_stream() {
    assert_eq!(roundtrip(&[]), Vec::<u8>::new());
  }

  #[test]
  fn overlapping_match_produces_run() {
    // "A" then a self-overlapping match copying 7 more bytes from offset 1:
    // classic RLE expansion to "AAAAAAAA".
    let tokens = [
      Token::Literal(b'A'),
      Token::Match {
        offset: 1,
        length: 7,
      },
    ];
    assert_eq!(roundtrip(&tokens), b"AAAAAAAA");
  }

  #[test]
  fn literal_then_match_then_literal() {
    let tokens = [
      Token::Literal(b'a'),
      Token::Literal(b'b'),
      Token::Literal(b'c'),
      Token::Match {
        offset: 3,
        length: 6,
      },
      Token::Literal(b'd'),
    ];
    assert_eq!(roundtrip(&tokens), b"abcabcabcd");
  }

  #[test]
  fn reused_offset_after_literal_roundtrips() {
    let tokens = [
      Token::Literal(b'x'),
      Token::Literal(b'y'),
      Token::Match {
        offset: 2,
        length: 2,
      },
      Token::Literal(b'z'),
      Token::Match {
        offset: 2,
        length: 2,
      },
    ];
    assert_eq!(roundtrip(&tokens), b"xyxyzyz");
  }

  #[test]
  fn consecutive_matches_each_carry_their_own_offset() {
    let tokens = [
      Token::Literal(1),
      Token::Literal(2),
      Token::Literal(3),
      Token::Literal(4),
      Token::Match {
        offset: 4,
        length: 2,
      },
      Token::Match {
        offset: 4,
        length: 2,
      },
    ];
    let out = roundtrip(&tokens);
    assert_eq!(out, vec![1, 2, 3, 4, 1, 2, 3, 4]);
  }

  #[test]
  fn invalid_offset_is_rejected() {
    let mut encoder = Encoder::<ByteVariant>::new();
    encode_stream(
      &mut encoder,
      &[Token::Match {
        offset: 5,
        length: 1,
      }],
    );
    let encoded = encoder.finish();

    let mut decoder = Decoder::<ByteVariant>::new(&encoded).unwrap();
    let mut output = Vec::new();
    let err = decode_stream(&mut decoder, &mut output).unwrap_err();
    assert_eq!(err.kind, crate::errors::ErrorKind::InvalidOffset);
  }
}

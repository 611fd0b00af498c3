//! Hash-chain LZ match finder. Encoder-only: turns an input buffer into the
//! [`Token`] sequence that [`crate::token::encode_stream`] serializes.

use crate::context::ContextTable;
use crate::level::CompressionLevel;
use crate::token::Token;

const MIN_MATCH_LEN: usize = 3;
const HASH_BITS: u32 = 16;
const HASH_SIZE: usize = 1 << HASH_BITS;

#[inline]
fn hash3(input: &[u8]) -> usize {
  let v = (input[0] as u32) | (input[1] as u32) << 8 | (input[2] as u32) << 16;
  (v.wrapping_mul(2_654_435_761) >> (32 - HASH_BITS)) as usize
}

/// Search-effort knobs derived from a [`CompressionLevel`], mirroring the
/// teacher's config-struct-with-builder shape, but internal: callers only
/// ever choose a level, not these directly.
struct MatcherConfig {
  max_chain_hits: usize,
  lazy_matching: bool,
}

impl MatcherConfig {
  fn from_level(level: CompressionLevel) -> Self {
    let max_chain_hits = match level.value() {
      0 => 1,
      1 => 4,
      2 => 8,
      3 => 16,
      4 => 32,
      5 => 64,
      6 => 128,
      7 => 256,
      8 => 512,
      _ => 4096,
    };
    MatcherConfig {
      max_chain_hits,
      lazy_matching: level.value() >= 2,
    }
  }
}

#[inline]
fn bit_cost(p: u8, bit: bool) -> f64 {
  let numerator = if bit { p as f64 } else { (256 - p as u32) as f64 };
  -(numerator / 256.0).log2()
}

fn literal_cost(probs: &ContextTable, byte: u8) -> f64 {
  let mut node: usize = 1;
  let mut cost = 0.0;
  for bit_pos in (0..8).rev() {
    let bit = (byte >> bit_pos) & 1 != 0;
    cost += bit_cost(probs.get(node), bit);
    node = (node << 1) | bit as usize;
  }
  cost
}

fn apply_literal(probs: &mut ContextTable, byte: u8) {
  let mut node: usize = 1;
  for bit_pos in (0..8).rev() {
    let bit = (byte >> bit_pos) & 1 != 0;
    probs.update(node, bit);
    node = (node << 1) | bit as usize;
  }
}

fn uint_cost(probs: &ContextTable, base_ctx: usize, n: u32) -> f64 {
  let top_bit = 31 - n.leading_zeros();
  let mut ctx = base_ctx;
  let mut cost = 0.0;
  for bit_pos in 0..top_bit {
    cost += bit_cost(probs.get(ctx), true);
    cost += bit_cost(probs.get(ctx + 1), (n >> bit_pos) & 1 != 0);
    ctx += 2;
  }
  cost + bit_cost(probs.get(ctx), false)
}

fn apply_uint(probs: &mut ContextTable, base_ctx: usize, n: u32) {
  let top_bit = 31 - n.leading_zeros();
  let mut ctx = base_ctx;
  for bit_pos in 0..top_bit {
    probs.update(ctx, true);
    probs.update(ctx + 1, (n >> bit_pos) & 1 != 0);
    ctx += 2;
  }
  probs.update(ctx, false);
}

/// Cost of encoding a match of `offset`/`length`, given whether the token
/// immediately before it was itself a match (which forces a fresh offset
/// code with no "has offset" bit, per the wire format).
fn match_cost(
  probs: &ContextTable,
  offset: u32,
  length: u32,
  prev_was_match: bool,
  prev_offset: u32,
) -> f64 {
  use crate::constants::{CTX_HAS_OFFSET, CTX_IS_MATCH, CTX_LENGTH_BASE, CTX_OFFSET_BASE};

  let reuse = !prev_was_match && offset == prev_offset;
  let mut cost = bit_cost(probs.get(CTX_IS_MATCH), true);
  if !prev_was_match {
    cost += bit_cost(probs.get(CTX_HAS_OFFSET), !reuse);
  }
  if prev_was_match || !reuse {
    cost += uint_cost(probs, CTX_OFFSET_BASE, offset + 1);
  }
  cost += uint_cost(probs, CTX_LENGTH_BASE, length);
  cost
}

fn apply_match(
  probs: &mut ContextTable,
  offset: u32,
  length: u32,
  prev_was_match: bool,
  prev_offset: u32,
) {
  use crate::constants::{CTX_HAS_OFFSET, CTX_IS_MATCH, CTX_LENGTH_BASE, CTX_OFFSET_BASE};

  let reuse = !prev_was_match && offset == prev_offset;
  probs.update(CTX_IS_MATCH, true);
  if !prev_was_match {
    probs.update(CTX_HAS_OFFSET, !reuse);
  }
  if prev_was_match || !reuse {
    apply_uint(probs, CTX_OFFSET_BASE, offset + 1);
  }
  apply_uint(probs, CTX_LENGTH_BASE, length);
}

struct Candidate {
  offset: u32,
  length: u32,
}

/// Hash-chain match finder: one head-of-chain pointer per hash bucket, and a
/// `prev` link per input position, so walking `prev` from the head visits
/// earlier positions sharing the same 3-byte prefix, nearest first.
struct HashChain {
  head: Vec<i64>,
  prev: Vec<i64>,
}

impl HashChain {
  fn new(len: usize) -> Self {
    HashChain {
      head: vec![-1; HASH_SIZE],
      prev: vec![-1; len],
    }
  }

  fn insert(&mut self, input: &[u8], pos: usize) {
    if pos + MIN_MATCH_LEN > input.len() {
      return;
    }
    let h = hash3(&input[pos..pos + MIN_MATCH_LEN]);
    self.prev[pos] = self.head[h];
    self.head[h] = pos as i64;
  }

  /// Finds the longest match (breaking ties toward the nearest, i.e. cheapest,
  /// offset) at `pos`, walking at most `max_chain_hits` candidates.
  fn find_longest(&self, input: &[u8], pos: usize, max_chain_hits: usize) -> Option<Candidate> {
    if pos + MIN_MATCH_LEN > input.len() {
      return None;
    }
    let h = hash3(&input[pos..pos + MIN_MATCH_LEN]);
    let max_len = input.len() - pos;
    let max_offset = (u32::MAX - 1) as usize;

    let mut candidate_pos = self.head[h];
    let mut best: Option<Candidate> = None;
    let mut hits = 0;

    while candidate_pos >= 0 && hits < max_chain_hits {
      let cpos = candidate_pos as usize;
      let offset = pos - cpos;
      if offset == 0 || offset > max_offset {
        break;
      }

      let mut len = 0;
      while len < max_len && input[cpos + len] == input[pos + len] {
        len += 1;
      }

      if len >= MIN_MATCH_LEN && best.as_ref().map_or(true, |b| len as u32 > b.length) {
        best = Some(Candidate {
          offset: offset as u32,
          length: len as u32,
        });
      }

      candidate_pos = self.prev[cpos];
      hits += 1;
    }

    best
  }
}

/// Parses `input` into a sequence of literals and back-references.
pub fn find_tokens(input: &[u8], level: CompressionLevel) -> Vec<Token> {
  let config = MatcherConfig::from_level(level);
  let mut chain = HashChain::new(input.len());
  let mut probs = ContextTable::default();
  let mut tokens = Vec::new();

  let mut prev_was_match = false;
  let mut prev_offset: u32 = 0;
  let mut pos = 0usize;

  while pos < input.len() {
    let mut candidate = chain.find_longest(input, pos, config.max_chain_hits);

    // Prefer reusing the previous offset whenever it matches at least as
    // well as the freshly-found candidate: its code is cheaper or free.
    if !prev_was_match && prev_offset != 0 && prev_offset as usize <= pos {
      let reuse_start = pos - prev_offset as usize;
      let max_len = input.len() - pos;
      let mut len = 0;
      while len < max_len && input[reuse_start + len] == input[pos + len] {
        len += 1;
      }
      if len >= MIN_MATCH_LEN {
        let better_or_equal = candidate
          .as_ref()
          .map_or(true, |c| len as u32 >= c.length);
        if better_or_equal {
          candidate = Some(Candidate {
            offset: prev_offset,
            length: len as u32,
          });
        }
      }
    }

    // Offsets and lengths are plain u32s and MAX_OFFSET_BITS/MAX_LEN_BITS are
    // both 32, so every value the matcher can produce here is already within
    // the universal coder's representable range.
    let chosen = candidate;

    let take_match = match &chosen {
      None => false,
      Some(c) => {
        let mcost = match_cost(&probs, c.offset, c.length, prev_was_match, prev_offset);
        let lcost: f64 = (0..c.length as usize)
          .map(|k| bit_cost(probs.get(crate::constants::CTX_IS_MATCH), false) + literal_cost(&probs, input[pos + k]))
          .sum();
        mcost < lcost
      }
    };

    if take_match {
      let c = chosen.unwrap();

      if config.lazy_matching && pos + 1 < input.len() {
        chain.insert(input, pos);
        if let Some(next) = chain.find_longest(input, pos + 1, config.max_chain_hits) {
          if next.length > c.length {
            // defer: emit a literal here, let the next position's match win.
            probs.update(crate::constants::CTX_IS_MATCH, false);
            apply_literal(&mut probs, input[pos]);
            tokens.push(Token::Literal(input[pos]));
            prev_was_match = false;
            pos += 1;
            continue;
          }
        }
      } else {
        chain.insert(input, pos);
      }

      log::trace!("pos {}: match offset={} length={}", pos, c.offset, c.length);
      apply_match(&mut probs, c.offset, c.length, prev_was_match, prev_offset);
      tokens.push(Token::Match {
        offset: c.offset,
        length: c.length,
      });
      for i in 1..c.length as usize {
        chain.insert(input, pos + i);
      }
      prev_offset = c.offset;
      prev_was_match = true;
      pos += c.length as usize;
    } else {
      chain.insert(input, pos);
      probs.update(crate::constants::CTX_IS_MATCH, false);
      apply_literal(&mut probs, input[pos]);
      tokens.push(Token::Literal(input[pos]));
      prev_was_match = false;
      pos += 1;
    }
  }

  log::debug!(
    "matched {} input bytes into {} tokens",
    input.len(),
    tokens.len(),
  );
  tokens
}

// Doing bit/byte math with u32 is more performant than u64 on the targets
// this crate cares about (embedded, wasm, demoscene intros).
pub type Prob = u8;

/// Number of bits reserved for the offset and length universal coders,
/// named `W` in the format notes. Fixed at build time; bounds the largest
/// representable offset/length at `2^MAX_OFFSET_BITS - 1`.
pub const MAX_OFFSET_BITS: u32 = 32;
pub const MAX_LEN_BITS: u32 = 32;

// context id layout (part of the wire format, see upkr/src/context.rs)
pub const CTX_IS_MATCH: usize = 0;
pub const CTX_LITERAL_BASE: usize = 1;
pub const CTX_HAS_OFFSET: usize = 256;
pub const CTX_OFFSET_BASE: usize = 257;
pub const CTX_LENGTH_BASE: usize = CTX_OFFSET_BASE + 2 * MAX_OFFSET_BITS as usize;
pub const NUM_CONTEXTS: usize = CTX_LENGTH_BASE + 2 * MAX_LEN_BITS as usize;

/// Initial value of every probability estimator: exactly equiprobable.
pub const INITIAL_PROB: Prob = 128;

// compression levels
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 4;
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

// rANS variant parameters (see upkr::coder)
pub const BYTE_VARIANT_LOWER_BOUND: u32 = 1 << 12; // 4096
pub const BIT_VARIANT_LOWER_BOUND: u32 = 1 << 15; // 32768

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn context_layout_matches_reference_implementation() {
    // 1 is-match + 255 literal-bit + 1 has-offset + 64 offset + 64 length = 385
    assert_eq!(CTX_OFFSET_BASE, 257);
    assert_eq!(CTX_LENGTH_BASE, 321);
    assert_eq!(NUM_CONTEXTS, 385);
  }
}

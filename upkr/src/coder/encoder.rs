use std::marker::PhantomData;

use crate::coder::CoderVariant;
use crate::context::ContextTable;

/// Encodes bits into a compressed byte stream.
///
/// rANS is a stack: the encoder only knows the final state to reconstruct
/// once every bit is known, and that state must be consumed by the decoder
/// in the *opposite* order it was produced. So `Encoder` defers the actual
/// arithmetic to [`Encoder::finish`], and `encode_bit` only has to do the
/// part that genuinely must happen in forward order: advancing the
/// probability table exactly the way the decoder will, and remembering
/// which probability was in force for each bit.
pub struct Encoder<V: CoderVariant> {
  probs: ContextTable,
  // (probability in force when this bit was encoded, the bit itself)
  recorded: Vec<(u8, bool)>,
  _variant: PhantomData<V>,
}

impl<V: CoderVariant> Default for Encoder<V> {
  fn default() -> Self {
    Self::new()
  }
}

impl<V: CoderVariant> Encoder<V> {
  pub fn new() -> Self {
    Encoder {
      probs: ContextTable::default(),
      recorded: Vec::new(),
      _variant: PhantomData,
    }
  }

  #[cfg(test)]
  pub(crate) fn probs(&self) -> &ContextTable {
    &self.probs
  }

  /// Encodes one bit in context `ctx`. Never fails: an encoder can always
  /// record another bit, unlike a decoder which can run out of input.
  pub fn encode_bit(&mut self, ctx: usize, bit: bool) {
    let p = self.probs.get(ctx);
    self.recorded.push((p, bit));
    self.probs.update(ctx, bit);
  }

  /// Finishes the stream, replaying every recorded bit in reverse to do the
  /// actual rANS state transform, then flushing the final state.
  pub fn finish(self) -> Vec<u8> {
    let unit_mask = (1u32 << V::UNIT_BITS) - 1;
    let mut state = V::LOWER_BOUND;
    let mut staging = V::EncodeStaging::default();

    for &(p, bit) in self.recorded.iter().rev() {
      let p = p as u32;
      let (freq, start) = if bit { (p, 0) } else { (256 - p, p) };

      let renorm_cutoff = ((V::LOWER_BOUND >> 8) << V::UNIT_BITS) * freq;
      while state >= renorm_cutoff {
        V::push(&mut staging, state & unit_mask);
        state >>= V::UNIT_BITS;
      }

      state = ((state / freq) << 8) + (state % freq) + start;
    }

    // Flush the leftover state so the decoder's bootstrap renormalization
    // (starting from 0) reconstructs it. We zero-extend well past the widest
    // state either variant can hold; the decoder's dynamic "read until
    // >= LOWER_BOUND" loop consumes the leading zero units harmlessly and
    // stops at the same point it would for any other valid final state.
    let flush_units = 32 / V::UNIT_BITS;
    for _ in 0..flush_units {
      V::push(&mut staging, state & unit_mask);
      state >>= V::UNIT_BITS;
    }

    V::finish(staging)
  }
}

use crate::coder::CoderVariant;
use crate::context::ContextTable;
use crate::errors::UpkrResult;

/// Decodes bits out of a compressed byte slice, one context at a time.
///
/// Holds the rANS state, the input cursor, and the probability table that
/// must evolve in lockstep with whatever [`super::Encoder`] produced the
/// stream.
pub struct Decoder<'a, V: CoderVariant> {
  input: &'a [u8],
  cursor: V::DecodeCursor,
  state: u32,
  probs: ContextTable,
}

impl<'a, V: CoderVariant> Decoder<'a, V> {
  /// Constructs a decoder over `input`, performing the initial
  /// renormalization that fills `state` from the front of the stream.
  pub fn new(input: &'a [u8]) -> UpkrResult<Self> {
    let mut decoder = Decoder {
      input,
      cursor: V::DecodeCursor::default(),
      state: 0,
      probs: ContextTable::default(),
    };
    decoder.renormalize()?;
    Ok(decoder)
  }

  #[cfg(test)]
  pub(crate) fn probs(&self) -> &ContextTable {
    &self.probs
  }

  #[inline]
  fn renormalize(&mut self) -> UpkrResult<()> {
    while self.state < V::LOWER_BOUND {
      let unit = V::pull(&mut self.cursor, self.input)?;
      self.state = (self.state << V::UNIT_BITS) | unit;
    }
    Ok(())
  }

  /// Decodes one bit in context `ctx`, updating that context's estimator.
  pub fn decode_bit(&mut self, ctx: usize) -> UpkrResult<bool> {
    self.renormalize()?;

    let p = self.probs.get(ctx) as u32;
    let low = self.state & 0xFF;
    let high = self.state >> 8;
    let bit = low < p;

    self.state = if bit {
      p * high + low
    } else {
      (256 - p) * high + low - p
    };
    self.probs.update(ctx, bit);

    Ok(bit)
  }
}

use crate::constants::{DEFAULT_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL};
use crate::errors::{UpkrError, UpkrResult};

/// How hard the matcher should look for back-references, from `0` (fast,
/// greedy) to `9` (slow, thorough). Affects compression ratio and speed
/// only; never affects the bitstream format, so any level can decompress
/// any other level's output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
  pub const MIN: CompressionLevel = CompressionLevel(0);
  pub const MAX: CompressionLevel = CompressionLevel(MAX_COMPRESSION_LEVEL);

  /// Constructs a level, rejecting anything above [`CompressionLevel::MAX`].
  pub fn new(level: u8) -> UpkrResult<Self> {
    if level > MAX_COMPRESSION_LEVEL {
      return Err(UpkrError::invalid_argument(format!(
        "compression level {} exceeds the maximum of {}",
        level, MAX_COMPRESSION_LEVEL,
      )));
    }
    Ok(CompressionLevel(level))
  }

  #[inline]
  pub fn value(self) -> u8 {
    self.0
  }
}

impl Default for CompressionLevel {
  fn default() -> Self {
    CompressionLevel(DEFAULT_COMPRESSION_LEVEL)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rejects_out_of_range_levels() {
    assert!(CompressionLevel::new(MAX_COMPRESSION_LEVEL).is_ok());
    assert!(CompressionLevel::new(MAX_COMPRESSION_LEVEL + 1).is_err());
  }

  #[test]
  fn default_matches_constant() {
    assert_eq!(
      CompressionLevel::default().value(),
      DEFAULT_COMPRESSION_LEVEL
    );
  }
}

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fmt;

/// The different kinds of errors this library can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
  /// `InputUnderrun` occurs during decompression when the coder needs to
  /// renormalize but the compressed input has already been fully consumed.
  InputUnderrun,
  /// `InvalidOffset` occurs during decompression when a decoded match would
  /// copy from before the start of the output written so far.
  InvalidOffset,
  /// `CorruptStream` occurs when a decoded value is structurally impossible,
  /// such as a universal code that never terminates within the maximum
  /// representable bit width.
  CorruptStream,
  /// `InvalidArgument` occurs when a caller-provided parameter (such as a
  /// compression level) is out of range.
  InvalidArgument,
}

/// The error type used in results for all `upkr` functionality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpkrError {
  pub kind: ErrorKind,
  pub message: String,
}

impl UpkrError {
  pub(crate) fn new<S: AsRef<str>>(kind: ErrorKind, message: S) -> Self {
    UpkrError {
      kind,
      message: message.as_ref().to_string(),
    }
  }

  pub(crate) fn input_underrun() -> Self {
    Self::new(
      ErrorKind::InputUnderrun,
      "compressed input ended before the coder could renormalize; input is corrupt or truncated",
    )
  }

  pub(crate) fn invalid_offset(offset: u64, written: u64) -> Self {
    Self::new(
      ErrorKind::InvalidOffset,
      format!(
        "decoded match offset {} exceeds {} bytes written so far; input is corrupt",
        offset, written,
      ),
    )
  }

  pub(crate) fn corrupt_stream<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::CorruptStream, message)
  }

  pub(crate) fn invalid_argument<S: AsRef<str>>(message: S) -> Self {
    Self::new(ErrorKind::InvalidArgument, message)
  }
}

impl Display for UpkrError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "upkr {:?} error: {}", self.kind, &self.message)
  }
}

impl Error for UpkrError {}

pub type UpkrResult<T> = Result<T, UpkrError>;

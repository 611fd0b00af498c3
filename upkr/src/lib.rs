//! `upkr` is a tiny LZ + adaptive binary rANS compressor, intended for
//! size-constrained environments (intros, bootloaders, fetch-over-serial
//! firmware blobs) where a few hundred bytes of coder matters more than
//! compression ratio or speed.
//!
//! The format has no header, magic number, or checksum: a compressed stream
//! is exactly the arithmetic-coded token sequence, self-delimiting via its
//! own end-of-stream marker. [`compress`]/[`uncompress`] are the default
//! entry points, always using [`ByteVariant`]; [`compress_with`]/
//! [`uncompress_with`] take a [`CoderVariant`] type parameter for callers who
//! want [`BitVariant`]'s smaller state instead. The two variants' streams are
//! not compatible with each other -- whichever one compressed a stream must
//! also be the one that decompresses it.

pub mod coder;
mod constants;
mod context;
pub mod errors;
mod level;
mod matcher;
mod standalone;
mod token;
mod universal;

pub use coder::{BitVariant, ByteVariant, CoderVariant};
pub use errors::{ErrorKind, UpkrError, UpkrResult};
pub use level::CompressionLevel;
pub use standalone::{
  compress, compress_into, compress_with, uncompress, uncompress_into, uncompress_with,
};
pub use token::Token;

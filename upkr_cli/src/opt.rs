use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(about = "compress and decompress files with upkr")]
pub struct OptWrapper {
  #[command(subcommand)]
  pub opt: Opt,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Opt {
  Compress(CompressOpt),
  Uncompress(UncompressOpt),
}

/// The `-0`..`-9` flags, one per compression level, matching the original
/// C library's CLI. At most one should be given; `level()` defaults to 4.
#[derive(Clone, Debug, Parser)]
pub struct CompressOpt {
  #[arg(short = '0', action = clap::ArgAction::SetTrue)]
  l0: bool,
  #[arg(short = '1', action = clap::ArgAction::SetTrue)]
  l1: bool,
  #[arg(short = '2', action = clap::ArgAction::SetTrue)]
  l2: bool,
  #[arg(short = '3', action = clap::ArgAction::SetTrue)]
  l3: bool,
  #[arg(short = '4', action = clap::ArgAction::SetTrue)]
  l4: bool,
  #[arg(short = '5', action = clap::ArgAction::SetTrue)]
  l5: bool,
  #[arg(short = '6', action = clap::ArgAction::SetTrue)]
  l6: bool,
  #[arg(short = '7', action = clap::ArgAction::SetTrue)]
  l7: bool,
  #[arg(short = '8', action = clap::ArgAction::SetTrue)]
  l8: bool,
  #[arg(short = '9', action = clap::ArgAction::SetTrue)]
  l9: bool,

  pub input: PathBuf,
  /// Defaults to `<input>.upk`.
  pub output: Option<PathBuf>,
}

impl CompressOpt {
  pub fn level(&self) -> u8 {
    let flags = [
      self.l0, self.l1, self.l2, self.l3, self.l4, self.l5, self.l6, self.l7, self.l8, self.l9,
    ];
    flags
      .iter()
      .position(|&set| set)
      .map(|level| level as u8)
      .unwrap_or(upkr::CompressionLevel::default().value())
  }
}

#[derive(Clone, Debug, Parser)]
pub struct UncompressOpt {
  pub input: PathBuf,
  /// Defaults to `<input>.unp`.
  pub output: Option<PathBuf>,
}

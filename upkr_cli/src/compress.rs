use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::opt::CompressOpt;

pub fn compress(opt: CompressOpt) -> Result<()> {
  let level = upkr::CompressionLevel::new(opt.level())
    .with_context(|| format!("invalid compression level {}", opt.level()))?;

  let input = fs::read(&opt.input)
    .with_context(|| format!("failed to read input file {:?}", opt.input))?;
  let output_path = opt
    .output
    .clone()
    .unwrap_or_else(|| default_output_path(&opt.input, "upk"));

  let compressed = upkr::compress(&input, level);
  log::info!(
    "compressed {} bytes to {} bytes ({:.1}%) at level {}",
    input.len(),
    compressed.len(),
    100.0 * compressed.len() as f64 / input.len().max(1) as f64,
    opt.level(),
  );

  fs::write(&output_path, &compressed)
    .with_context(|| format!("failed to write output file {:?}", output_path))?;

  Ok(())
}

fn default_output_path(input: &PathBuf, extension: &str) -> PathBuf {
  let mut output = input.clone().into_os_string();
  output.push(".");
  output.push(extension);
  PathBuf::from(output)
}

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::opt::UncompressOpt;

pub fn uncompress(opt: UncompressOpt) -> Result<()> {
  let input = fs::read(&opt.input)
    .with_context(|| format!("failed to read input file {:?}", opt.input))?;
  let output_path = opt
    .output
    .clone()
    .unwrap_or_else(|| default_output_path(&opt.input, "unp"));

  let decompressed =
    upkr::uncompress(&input).with_context(|| format!("failed to decompress {:?}", opt.input))?;
  log::info!(
    "decompressed {} bytes to {} bytes",
    input.len(),
    decompressed.len(),
  );

  fs::write(&output_path, &decompressed)
    .with_context(|| format!("failed to write output file {:?}", output_path))?;

  Ok(())
}

fn default_output_path(input: &PathBuf, extension: &str) -> PathBuf {
  let mut output = input.clone().into_os_string();
  output.push(".");
  output.push(extension);
  PathBuf::from(output)
}

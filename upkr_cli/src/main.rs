use anyhow::Result;
use clap::Parser;

use crate::opt::{Opt, OptWrapper};

mod compress;
mod opt;
mod uncompress;

fn main() -> Result<()> {
  env_logger::init();

  let opt = OptWrapper::parse().opt;
  match opt {
    Opt::Compress(compress_opt) => compress::compress(compress_opt),
    Opt::Uncompress(uncompress_opt) => uncompress::uncompress(uncompress_opt),
  }
}

/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! PKA spectrum from a SRIM collision log

use anyhow::Result;
use clap::Parser;
use irradiation_rs::cli::{self, RecoilSpectrumArgs};
use std::path::Path;

fn main() -> Result<()> {
    cli::init_logging();
    let args = RecoilSpectrumArgs::parse();
    let config = cli::load_config()?;
    cli::run_recoil_spectrum(&args, &config, Path::new("."))?;
    Ok(())
}

/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Write `study_ZBL.txt` with speeds and splice radii for dimer runs

use anyhow::Result;
use clap::Parser;
use irradiation_rs::cli::{self, ZblScanArgs};
use std::path::Path;

fn main() -> Result<()> {
    cli::init_logging();
    let args = ZblScanArgs::parse();
    cli::run_zbl_scan(&args, Path::new("."))?;
    Ok(())
}

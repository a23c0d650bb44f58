/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Cluster production rates for an experimental dose rate

use anyhow::Result;
use clap::Parser;
use irradiation_rs::cli::{self, DefectsProductionArgs};

fn main() -> Result<()> {
    cli::init_logging();
    let args = DefectsProductionArgs::parse();
    let config = cli::load_config()?;
    let scaled = cli::run_defects_production(&args, &config)?;
    println!("{}", scaled);
    Ok(())
}

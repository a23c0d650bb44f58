/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Write `velocities.txt` for a batch of cascade runs

use anyhow::Result;
use clap::Parser;
use irradiation_rs::cli::{self, GenerateDirectionsArgs};
use std::path::Path;

fn main() -> Result<()> {
    cli::init_logging();
    let args = GenerateDirectionsArgs::parse();
    let config = cli::load_config()?;
    cli::run_generate_directions(&args, &config, Path::new("."))?;
    Ok(())
}

/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Overlay up to three cluster production tables

use anyhow::Result;
use clap::Parser;
use irradiation_rs::cli::{self, PlotProductionArgs};
use std::path::Path;

fn main() -> Result<()> {
    cli::init_logging();
    let args = PlotProductionArgs::parse();
    cli::run_plot_production(&args, Path::new("."))?;
    Ok(())
}

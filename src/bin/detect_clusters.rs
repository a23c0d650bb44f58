/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Cluster-size frequency tables from the trial dumps of one PKA energy

use anyhow::Result;
use clap::Parser;
use irradiation_rs::cli::{self, DetectClustersArgs};
use std::path::Path;

fn main() -> Result<()> {
    cli::init_logging();
    let args = DetectClustersArgs::parse();
    let config = cli::load_config()?;
    let summary = cli::run_detect_clusters(&args, &config, Path::new("."))?;
    println!(
        "effective simulations: {} of {}",
        summary.effective_trials, summary.trials
    );
    Ok(())
}

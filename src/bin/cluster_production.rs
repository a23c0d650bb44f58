/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Cluster production distributions weighted by a PKA spectrum

use anyhow::Result;
use clap::Parser;
use irradiation_rs::cli::{self, ClusterProductionArgs};
use std::path::Path;

fn main() -> Result<()> {
    cli::init_logging();
    let args = ClusterProductionArgs::parse();
    let config = cli::load_config()?;
    let summary = cli::run_cluster_production(&args, &config, Path::new("."))?;
    println!(
        "interstitial sizes: {}, vacancy sizes: {}",
        summary.interstitials.entries.len(),
        summary.vacancies.entries.len()
    );
    Ok(())
}

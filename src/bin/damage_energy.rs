/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Damage energies of the mean energies of a PKA spectrum

use anyhow::Result;
use clap::Parser;
use irradiation_rs::cli::{self, DamageEnergyArgs};

fn main() -> Result<()> {
    cli::init_logging();
    let args = DamageEnergyArgs::parse();
    let energies = cli::run_damage_energy(&args)?;
    let pka: Vec<String> = energies.iter().map(|(e, _)| format!("{:.4}", e)).collect();
    let md: Vec<String> = energies.iter().map(|(_, d)| format!("{:.4}", d)).collect();
    println!("Epka in keV: [{}]", pka.join(", "));
    println!("Epka vs MD energy in keV: [{}]", md.join(", "));
    Ok(())
}

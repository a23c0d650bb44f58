/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Reader for SRIM collision logs (`COLLISON.txt`)
//!
//! The log lists, for every incident ion, a block of recoil records between
//! a `-----` rule and a `=====` rule. The recoil energy in eV is the eighth
//! whitespace-separated field of each record.

use super::errors::{Result, SpectrumError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Field index of the recoil energy within a record
pub const RECOIL_ENERGY_FIELD: usize = 7;

/// Recoil energies of all ions in a collision log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionLog {
    /// One entry per ion that produced at least one recoil, energies in eV
    pub ions: Vec<Vec<f64>>,
}

impl CollisionLog {
    /// Ions that produced at least one recoil
    pub fn total_ions(&self) -> usize {
        self.ions.len()
    }

    pub fn total_pkas(&self) -> usize {
        self.ions.iter().map(Vec::len).sum()
    }

    /// All recoil energies in eV, in file order
    pub fn energies(&self) -> impl Iterator<Item = f64> + '_ {
        self.ions.iter().flatten().copied()
    }
}

fn parse_record(line: &str, number: usize) -> Result<f64> {
    let field = line
        .split_whitespace()
        .nth(RECOIL_ENERGY_FIELD)
        .ok_or_else(|| SpectrumError::ParseError {
            line: number,
            message: format!("record has fewer than {} fields", RECOIL_ENERGY_FIELD + 1),
        })?;
    field.parse::<f64>().map_err(|e| SpectrumError::ParseError {
        line: number,
        message: format!("recoil energy '{}': {}", field, e),
    })
}

/// Parse a collision log from a buffered reader
pub fn parse_collision_log<R: BufRead>(reader: R) -> Result<CollisionLog> {
    let mut log = CollisionLog::default();
    let mut block: Option<Vec<f64>> = None;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        match block.as_mut() {
            None => {
                if line.starts_with("-----") {
                    block = Some(Vec::new());
                }
            }
            Some(energies) => {
                if line.starts_with("=====") {
                    if let Some(done) = block.take() {
                        if !done.is_empty() {
                            log.ions.push(done);
                        }
                    }
                } else {
                    energies.push(parse_record(&line, index + 1)?);
                }
            }
        }
    }
    // a block cut off by the end of the file still counts
    if let Some(done) = block {
        if !done.is_empty() {
            log.ions.push(done);
        }
    }
    Ok(log)
}

/// Read a collision log file
pub fn read_collision_log<P: AsRef<Path>>(path: P) -> Result<CollisionLog> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SpectrumError::MissingFile(path.to_path_buf()));
    }
    parse_collision_log(BufReader::new(File::open(path)?))
}

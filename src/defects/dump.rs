/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Reader for defect-site dumps
//!
//! Wigner-Seitz occupancies and cluster IDs are computed by an external
//! atomistic toolkit and exported as a LAMMPS text dump with one row per
//! reference site. The columns are located by name in the `ITEM: ATOMS`
//! header, so the export may carry extra columns in any order.

use super::errors::{DefectError, Result};
use crate::utils::Vector3D;
use ndarray::Array2;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Classification of a reference site by its occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefectKind {
    /// Empty site
    Vacancy,
    /// Site holding more than one atom
    Interstitial,
}

impl DefectKind {
    /// Classify a site; regular (singly occupied) sites return `None`
    pub fn classify(occupancy: i64) -> Option<Self> {
        match occupancy {
            o if o < 1 => Some(DefectKind::Vacancy),
            1 => None,
            _ => Some(DefectKind::Interstitial),
        }
    }

    /// Prefix of the output files for this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            DefectKind::Vacancy => "v",
            DefectKind::Interstitial => "i",
        }
    }
}

/// One reference site of a Wigner-Seitz analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefectSite {
    /// Position in Angstroms, box centred on the origin
    pub position: Vector3D,
    pub occupancy: i64,
    /// Cluster ID from the column of the site's kind; 0 when the site
    /// belongs to no cluster or is a regular site
    pub cluster: usize,
}

impl DefectSite {
    pub fn kind(&self) -> Option<DefectKind> {
        DefectKind::classify(self.occupancy)
    }
}

/// First snapshot of a defect-site dump
#[derive(Debug, Clone, Default)]
pub struct DefectDump {
    pub timestep: u64,
    /// Box bounds `[lo, hi]` for x, y and z
    pub box_bounds: [[f64; 2]; 3],
    pub sites: Vec<DefectSite>,
}

impl DefectDump {
    /// Sites of one defect kind
    pub fn sites_of(&self, kind: DefectKind) -> impl Iterator<Item = &DefectSite> {
        self.sites.iter().filter(move |s| s.kind() == Some(kind))
    }

    /// Positions of one defect kind as an `N × 3` array
    pub fn positions(&self, kind: DefectKind) -> Array2<f64> {
        let flat: Vec<f64> = self
            .sites_of(kind)
            .flat_map(|s| s.position.to_array())
            .collect();
        let rows = flat.len() / 3;
        Array2::from_shape_vec((rows, 3), flat).unwrap_or_else(|_| Array2::zeros((0, 3)))
    }

    /// Cluster IDs of one defect kind
    pub fn cluster_ids(&self, kind: DefectKind) -> Vec<usize> {
        self.sites_of(kind).map(|s| s.cluster).collect()
    }

    pub fn count(&self, kind: DefectKind) -> usize {
        self.sites_of(kind).count()
    }

    /// Nonzero cluster IDs carried by both vacancies and interstitials
    ///
    /// Only meaningful when both kinds read their IDs from one column.
    pub fn shared_cluster_ids(&self) -> Vec<usize> {
        let vacancies: BTreeSet<usize> = self
            .cluster_ids(DefectKind::Vacancy)
            .into_iter()
            .filter(|&id| id != 0)
            .collect();
        let interstitials: BTreeSet<usize> = self
            .cluster_ids(DefectKind::Interstitial)
            .into_iter()
            .collect();
        vacancies.intersection(&interstitials).copied().collect()
    }
}

/// Names of the cluster ID columns of each defect kind
///
/// Vacancies and interstitials are usually clustered in separate passes with
/// different cutoffs, each pass writing its own column. A name also matches
/// its `c_` prefixed form, so `Cluster` finds a `c_cluster` column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterColumns {
    pub vacancy: String,
    pub interstitial: String,
}

impl Default for ClusterColumns {
    fn default() -> Self {
        Self::shared("Cluster")
    }
}

impl ClusterColumns {
    /// One column for both kinds
    pub fn shared(name: &str) -> Self {
        Self {
            vacancy: name.to_string(),
            interstitial: name.to_string(),
        }
    }

    pub fn is_shared(&self) -> bool {
        self.vacancy.eq_ignore_ascii_case(&self.interstitial)
    }

    fn name(&self, kind: DefectKind) -> &str {
        match kind {
            DefectKind::Vacancy => &self.vacancy,
            DefectKind::Interstitial => &self.interstitial,
        }
    }
}

/// Indices of the columns we need in the `ITEM: ATOMS` header
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    x: usize,
    y: usize,
    z: usize,
    occupancy: usize,
    vacancy_cluster: usize,
    interstitial_cluster: usize,
}

impl ColumnMap {
    fn from_header(names: &[&str], clusters: &ClusterColumns) -> Result<Self> {
        let find = |candidates: &[&str]| {
            names
                .iter()
                .position(|n| candidates.iter().any(|c| n.eq_ignore_ascii_case(c)))
        };
        let require = |candidates: &[&str]| {
            find(candidates).ok_or_else(|| DefectError::MissingColumn(candidates[0].to_string()))
        };
        let cluster = |kind: DefectKind| {
            let name = clusters.name(kind);
            let prefixed = format!("c_{}", name);
            require(&[name, prefixed.as_str()])
        };
        Ok(Self {
            x: require(&["x", "Position.X"])?,
            y: require(&["y", "Position.Y"])?,
            z: require(&["z", "Position.Z"])?,
            occupancy: require(&["Occupancy", "c_occupancy"])?,
            vacancy_cluster: cluster(DefectKind::Vacancy)?,
            interstitial_cluster: cluster(DefectKind::Interstitial)?,
        })
    }

    fn cluster(&self, kind: DefectKind) -> usize {
        match kind {
            DefectKind::Vacancy => self.vacancy_cluster,
            DefectKind::Interstitial => self.interstitial_cluster,
        }
    }

    fn width(&self) -> usize {
        [
            self.x,
            self.y,
            self.z,
            self.occupancy,
            self.vacancy_cluster,
            self.interstitial_cluster,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

fn parse_field<T: std::str::FromStr>(field: &str, line: usize) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    field.parse::<T>().map_err(|e| DefectError::ParseError {
        line,
        message: format!("'{}': {}", field, e),
    })
}

/// Integer columns are sometimes exported as floats ("2.0")
fn parse_integer(field: &str, line: usize) -> Result<i64> {
    match field.parse::<i64>() {
        Ok(v) => Ok(v),
        Err(_) => {
            let v: f64 = parse_field(field, line)?;
            if v.fract() != 0.0 {
                return Err(DefectError::ParseError {
                    line,
                    message: format!("'{}' is not an integer", field),
                });
            }
            Ok(v as i64)
        }
    }
}

fn line_at<'a>(lines: &[&'a str], i: usize, what: &str) -> Result<&'a str> {
    lines
        .get(i)
        .map(|l| l.trim())
        .ok_or_else(|| DefectError::InvalidDump(format!("unexpected end of file in {}", what)))
}

/// Parse the first snapshot of a LAMMPS text dump with one `Cluster` column
pub fn parse_dump(content: &str) -> Result<DefectDump> {
    parse_dump_with(content, &ClusterColumns::default())
}

/// Parse the first snapshot, reading cluster IDs from the given columns
pub fn parse_dump_with(content: &str, clusters: &ClusterColumns) -> Result<DefectDump> {
    let lines: Vec<&str> = content.lines().collect();
    let mut dump = DefectDump::default();
    let mut atom_count: Option<usize> = None;
    let mut seen_timestep = false;
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim();
        if let Some(item) = line.strip_prefix("ITEM:") {
            let item = item.trim();
            if item.starts_with("TIMESTEP") {
                if seen_timestep {
                    break;
                }
                seen_timestep = true;
                dump.timestep = parse_field(line_at(&lines, i + 1, "TIMESTEP")?, i + 2)?;
                i += 2;
                continue;
            } else if item.starts_with("NUMBER OF ATOMS") {
                let count = line_at(&lines, i + 1, "NUMBER OF ATOMS")?;
                atom_count = Some(parse_field(count, i + 2)?);
                i += 2;
                continue;
            } else if item.starts_with("BOX BOUNDS") {
                for axis in 0..3 {
                    let bounds = line_at(&lines, i + 1 + axis, "BOX BOUNDS")?;
                    let fields: Vec<&str> = bounds.split_whitespace().collect();
                    if fields.len() < 2 {
                        return Err(DefectError::InvalidDump(format!(
                            "line {}: box bounds need two values",
                            i + 2 + axis
                        )));
                    }
                    dump.box_bounds[axis] = [
                        parse_field(fields[0], i + 2 + axis)?,
                        parse_field(fields[1], i + 2 + axis)?,
                    ];
                }
                i += 4;
                continue;
            } else if let Some(header) = item.strip_prefix("ATOMS") {
                let names: Vec<&str> = header.split_whitespace().collect();
                let columns = ColumnMap::from_header(&names, clusters)?;
                let count = atom_count.ok_or_else(|| {
                    DefectError::InvalidDump("ITEM: ATOMS before ITEM: NUMBER OF ATOMS".to_string())
                })?;
                let available = lines.len().saturating_sub(i + 1);
                if count > available {
                    return Err(DefectError::InvalidDump(format!(
                        "header announces {} sites but only {} lines follow",
                        count, available
                    )));
                }
                dump.sites.reserve(count);
                for row in 0..count {
                    let number = i + 2 + row;
                    let fields: Vec<&str> = line_at(&lines, i + 1 + row, "ATOMS")?
                        .split_whitespace()
                        .collect();
                    if fields.len() < columns.width() {
                        return Err(DefectError::ParseError {
                            line: number,
                            message: format!(
                                "expected at least {} columns, found {}",
                                columns.width(),
                                fields.len()
                            ),
                        });
                    }
                    let occupancy = parse_integer(fields[columns.occupancy], number)?;
                    let cluster = match DefectKind::classify(occupancy) {
                        Some(kind) => parse_integer(fields[columns.cluster(kind)], number)?,
                        None => 0,
                    };
                    dump.sites.push(DefectSite {
                        position: Vector3D::new(
                            parse_field(fields[columns.x], number)?,
                            parse_field(fields[columns.y], number)?,
                            parse_field(fields[columns.z], number)?,
                        ),
                        occupancy,
                        cluster: cluster.max(0) as usize,
                    });
                }
                i += 1 + count;
                continue;
            }
        }
        i += 1;
    }

    if !seen_timestep {
        return Err(DefectError::InvalidDump("no ITEM: TIMESTEP found".to_string()));
    }
    Ok(dump)
}

/// Read the first snapshot of a dump file
pub fn read_dump<P: AsRef<Path>>(path: P) -> Result<DefectDump> {
    read_dump_with(path, &ClusterColumns::default())
}

pub fn read_dump_with<P: AsRef<Path>>(path: P, clusters: &ClusterColumns) -> Result<DefectDump> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DefectError::MissingFile(path.to_path_buf()));
    }
    parse_dump_with(&fs::read_to_string(path)?, clusters)
}

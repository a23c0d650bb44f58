/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

//! Arguments and entry points of the command-line tools

use crate::config::{AnalysisConfig, ClusterConfig};
use crate::defects::{
    point_defects_by_energy, production_distribution, read_dump_with, scale_production,
    ClusterFrequencyAggregator, DefectKind, EnergyResult, FrequencyTable, ProductionDistribution,
    ScaledProduction,
};
use crate::plot;
use crate::sampling::{save_velocities, speed_scan, write_speed_scan, DirectionSampler};
use crate::spectrum::{
    read_collision_log, DamageEnergyModel, LogBins, PkaSpectrum, SpectrumBinner, SpectrumTable,
};
use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Draw random initial PKA velocities over the irreducible triangle
#[derive(Parser, Debug)]
#[command(name = "generate-directions", version)]
pub struct GenerateDirectionsArgs {
    /// Half length of the simulation box in lattice units
    pub half_length: i64,
    /// PKA energy in keV
    pub energy_kev: f64,
    /// Number of directions
    pub count: Option<usize>,
}

/// Tabulate speeds and ZBL splice radii for low-energy dimer runs
#[derive(Parser, Debug)]
#[command(name = "zbl-scan", version)]
pub struct ZblScanArgs {
    /// Distance between inner and outer splice radius in Angstroms
    #[arg(default_value_t = 0.5)]
    pub delta: f64,
}

/// Cluster-size frequencies of the cascade trials of one PKA energy
#[derive(Parser, Debug)]
#[command(name = "detect-clusters", version)]
pub struct DetectClustersArgs {
    /// Half length of the simulation box in lattice units
    pub box_half_length: i64,
    /// Number of trials
    pub trials: Option<usize>,
    /// Directory holding the trial dumps
    pub dir: Option<PathBuf>,
}

/// Bin the recoil energies of a SRIM collision log
#[derive(Parser, Debug)]
#[command(name = "recoil-spectrum", version)]
pub struct RecoilSpectrumArgs {
    /// SRIM COLLISON.txt file
    pub collision_log: PathBuf,
    /// Output name without extension
    #[arg(default_value = "result")]
    pub output: String,
}

/// Cluster production distribution over a PKA spectrum
#[derive(Parser, Debug)]
#[command(name = "cluster-production", version)]
pub struct ClusterProductionArgs {
    /// PKA spectrum table
    pub spectrum: PathBuf,
    /// Rows of `<pka energy in keV> <directory with frequency tables>`
    pub manifest: PathBuf,
    /// Suffix of the output names
    #[arg(default_value = "spectrum")]
    pub suffix: String,
}

/// Cluster production rates at an experimental dose rate
#[derive(Parser, Debug)]
#[command(name = "defects-production", version)]
pub struct DefectsProductionArgs {
    /// Cluster production table
    pub file: PathBuf,
    /// Point defects per µm³·s
    pub scaling: Option<f64>,
}

/// Damage energy of the mean energies of a PKA spectrum
#[derive(Parser, Debug)]
#[command(name = "damage-energy", version)]
pub struct DamageEnergyArgs {
    /// PKA spectrum table
    pub spectrum: PathBuf,
}

/// Overlay cluster production tables on log-log axes
#[derive(Parser, Debug)]
#[command(name = "plot-production", version)]
pub struct PlotProductionArgs {
    /// Cluster production tables
    #[arg(required = true, num_args = 1..=3)]
    pub files: Vec<PathBuf>,
}

fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Plots are a convenience; a failed chart must not lose the tables
fn report_plot(result: plot::Result<()>, path: &Path) {
    match result {
        Ok(()) => info!("Wrote {}", path.display()),
        Err(e) => warn!("Could not draw {}: {}", path.display(), e),
    }
}

/// Write `velocities.txt` into `out_dir`
pub fn run_generate_directions(
    args: &GenerateDirectionsArgs,
    config: &AnalysisConfig,
    out_dir: &Path,
) -> Result<PathBuf> {
    let count = args.count.unwrap_or(config.sampling.count);
    let mut rng = StdRng::seed_from_u64(config.sampling.seed);
    let samples = DirectionSampler::default()
        .sample(count, args.half_length, args.energy_kev, &mut rng)
        .context("cannot sample directions")?;

    let path = out_dir.join(&config.sampling.output);
    save_velocities(&path, &samples)
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!(
        "Wrote {} velocities for {} keV to {}",
        samples.len(),
        args.energy_kev,
        path.display()
    );
    Ok(path)
}

/// Write `study_ZBL.txt` into `out_dir`
pub fn run_zbl_scan(args: &ZblScanArgs, out_dir: &Path) -> Result<PathBuf> {
    let rows = speed_scan(args.delta)?;
    let path = out_dir.join("study_ZBL.txt");
    let mut writer = create_writer(&path)?;
    write_speed_scan(&mut writer, &rows)?;
    writer.flush()?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path)
}

/// Summary of a cluster detection run
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionSummary {
    pub trials: usize,
    pub effective_trials: usize,
    /// Indices of the trials dropped at the box boundary
    pub excluded_trials: Vec<usize>,
    pub interstitials: FrequencyTable,
    pub vacancies: FrequencyTable,
}

fn save_frequency_table(
    kind: DefectKind,
    aggregator: &ClusterFrequencyAggregator,
    clusters: &ClusterConfig,
    out_dir: &Path,
) -> Result<FrequencyTable> {
    let table = aggregator.finish()?;
    let path = out_dir.join(clusters.frequency_file(kind));
    table
        .save(&path, clusters.include_variance)
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(table)
}

/// Aggregate the trial dumps and write both frequency tables into `out_dir`
pub fn run_detect_clusters(
    args: &DetectClustersArgs,
    config: &AnalysisConfig,
    out_dir: &Path,
) -> Result<DetectionSummary> {
    if args.box_half_length <= 0 {
        bail!("box half-length must be positive, got {}", args.box_half_length);
    }
    let clusters = &config.clusters;
    let trials = args.trials.unwrap_or(clusters.trials);
    if trials == 0 {
        bail!("number of trials must be positive");
    }
    let dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let analyzer = clusters.analyzer(args.box_half_length as f64);
    let columns = clusters.cluster_columns();

    let mut interstitials = ClusterFrequencyAggregator::new(clusters.variance_mode);
    let mut vacancies = ClusterFrequencyAggregator::new(clusters.variance_mode);
    let mut excluded_trials = Vec::new();
    for index in 0..trials {
        let path = dir.join(clusters.trial_file(index));
        let dump = read_dump_with(&path, &columns)
            .with_context(|| format!("cannot read {}", path.display()))?;
        if columns.is_shared() {
            let shared = dump.shared_cluster_ids();
            if !shared.is_empty() {
                warn!(
                    "Trial {}: cluster IDs {:?} span vacancies and interstitials",
                    index, shared
                );
            }
        }
        let outcome = analyzer.analyze(&dump);
        info!(
            "Trial {}: {} vacancies, {} interstitials",
            index, outcome.vacancies.site_count, outcome.interstitials.site_count
        );
        let effective = outcome.is_effective();
        if !effective {
            warn!(
                "Trial {}: cascade crosses simulation box boundary, excluded",
                index
            );
            excluded_trials.push(index);
        }
        interstitials.record(&outcome.interstitials.cluster_sizes, effective);
        vacancies.record(&outcome.vacancies.cluster_sizes, effective);
    }
    info!("effective simulations: {}", interstitials.effective_trials());

    let interstitial_table =
        save_frequency_table(DefectKind::Interstitial, &interstitials, clusters, out_dir)?;
    let vacancy_table = save_frequency_table(DefectKind::Vacancy, &vacancies, clusters, out_dir)?;

    Ok(DetectionSummary {
        trials,
        effective_trials: interstitials.effective_trials(),
        excluded_trials,
        interstitials: interstitial_table,
        vacancies: vacancy_table,
    })
}

/// Bin a collision log, write `<output>.txt` and `<output>_hist.png` into `out_dir`
pub fn run_recoil_spectrum(
    args: &RecoilSpectrumArgs,
    config: &AnalysisConfig,
    out_dir: &Path,
) -> Result<SpectrumTable> {
    let log = read_collision_log(&args.collision_log)
        .with_context(|| format!("cannot read {}", args.collision_log.display()))?;
    if log.total_pkas() == 0 {
        bail!("{} contains no recoils", args.collision_log.display());
    }

    let s = &config.spectrum;
    let bins = LogBins::centered(s.start_exponent, s.end_exponent, s.step)?;
    // energies in eV, tables in keV
    let table = SpectrumBinner::new(bins)
        .with_output_scale(1.0e-3)
        .bin(log.energies());

    info!("total pka: {}", log.total_pkas());
    info!("total ions: {}", log.total_ions());
    info!(
        "total proportion (correct if 1.0): {}",
        table.total_proportion()
    );

    let path = out_dir.join(format!("{}.txt", args.output));
    let mut writer = create_writer(&path)?;
    table.write(&mut writer)?;
    writer.flush()?;
    info!("Write to file: {}", path.display());

    let png = out_dir.join(format!("{}_hist.png", args.output));
    report_plot(
        plot::plot_spectrum_histogram(&png, &[(args.output.clone(), &table)]),
        &png,
    );
    Ok(table)
}

/// `(pka energy, directory)` rows of a production manifest
pub fn read_manifest(path: &Path) -> Result<Vec<(f64, PathBuf)>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let mut rows = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            bail!(
                "{}:{}: expected '<energy> <directory>'",
                path.display(),
                index + 1
            );
        }
        let energy: f64 = fields[0].parse().with_context(|| {
            format!("{}:{}: bad energy '{}'", path.display(), index + 1, fields[0])
        })?;
        rows.push((energy, base.join(fields[1])));
    }
    if rows.is_empty() {
        bail!("{} lists no energies", path.display());
    }
    Ok(rows)
}

/// Production distributions of both defect kinds
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionSummary {
    pub interstitials: ProductionDistribution,
    pub vacancies: ProductionDistribution,
    /// (PKA energy, point defects per cascade) from the interstitial tables
    pub point_defects: Vec<(f64, f64)>,
}

fn load_frequency_tables(
    manifest: &[(f64, PathBuf)],
    clusters: &ClusterConfig,
    kind: DefectKind,
) -> Result<Vec<EnergyResult>> {
    let mut results = Vec::with_capacity(manifest.len());
    for (energy, dir) in manifest {
        let path = dir.join(clusters.frequency_file(kind));
        let table =
            FrequencyTable::read(&path).with_context(|| format!("cannot read {}", path.display()))?;
        results.push(EnergyResult {
            pka_energy: *energy,
            table,
        });
    }
    Ok(results)
}

fn write_production(
    kind: DefectKind,
    spectrum: &PkaSpectrum,
    results: &[EnergyResult],
    config: &AnalysisConfig,
    suffix: &str,
    out_dir: &Path,
) -> Result<ProductionDistribution> {
    let distribution = production_distribution(spectrum, results, config.production.trim_ratio)?;
    let stem = format!("{}cluster_production_{}", kind.prefix(), suffix);
    let path = out_dir.join(format!("{}.txt", stem));
    distribution
        .save(&path)
        .with_context(|| format!("cannot write {}", path.display()))?;
    info!("Wrote {}", path.display());

    let png = out_dir.join(format!("{}.png", stem));
    let label = format!(
        "{} random directions for each PKA energy",
        config.clusters.trials
    );
    report_plot(plot::plot_cluster_histogram(&png, &distribution, &label), &png);
    Ok(distribution)
}

/// Combine frequency tables over a spectrum and write the results into `out_dir`
pub fn run_cluster_production(
    args: &ClusterProductionArgs,
    config: &AnalysisConfig,
    out_dir: &Path,
) -> Result<ProductionSummary> {
    let spectrum = PkaSpectrum::read(&args.spectrum)
        .with_context(|| format!("cannot read {}", args.spectrum.display()))?;
    let manifest = read_manifest(&args.manifest)?;

    let interstitial_results =
        load_frequency_tables(&manifest, &config.clusters, DefectKind::Interstitial)?;
    let vacancy_results = load_frequency_tables(&manifest, &config.clusters, DefectKind::Vacancy)?;

    let point_defects = point_defects_by_energy(&interstitial_results);
    let png = out_dir.join("pka_pointdefects.png");
    report_plot(plot::plot_point_defects(&png, &point_defects), &png);

    let interstitials = write_production(
        DefectKind::Interstitial,
        &spectrum,
        &interstitial_results,
        config,
        &args.suffix,
        out_dir,
    )?;
    let vacancies = write_production(
        DefectKind::Vacancy,
        &spectrum,
        &vacancy_results,
        config,
        &args.suffix,
        out_dir,
    )?;

    Ok(ProductionSummary {
        interstitials,
        vacancies,
        point_defects,
    })
}

/// Scale a production table by the dose-rate factor
pub fn run_defects_production(
    args: &DefectsProductionArgs,
    config: &AnalysisConfig,
) -> Result<ScaledProduction> {
    info!("Read data from {}", args.file.display());
    let distribution = ProductionDistribution::read(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;
    if distribution.entries.is_empty() {
        bail!("{} is empty", args.file.display());
    }
    let factor = args.scaling.unwrap_or(config.production.scaling_factor);
    Ok(scale_production(&distribution, factor))
}

/// Damage energies in keV of every spectrum interval's mean energy
pub fn run_damage_energy(args: &DamageEnergyArgs) -> Result<Vec<(f64, f64)>> {
    let spectrum = PkaSpectrum::read(&args.spectrum)
        .with_context(|| format!("cannot read {}", args.spectrum.display()))?;
    let model = DamageEnergyModel::tungsten();
    Ok(spectrum
        .mean_energies()
        .into_iter()
        .map(|e| (e, model.damage_energy_kev(e)))
        .collect())
}

/// Draw `cluster_production.png` into `out_dir`
pub fn run_plot_production(args: &PlotProductionArgs, out_dir: &Path) -> Result<PathBuf> {
    let mut series = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let distribution = ProductionDistribution::read(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        series.push((label, distribution));
    }

    let png = out_dir.join("cluster_production.png");
    plot::plot_cluster_production(&png, &series)
        .with_context(|| format!("cannot draw {}", png.display()))?;
    info!("Wrote {}", png.display());
    Ok(png)
}

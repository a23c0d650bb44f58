/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use irradiation_rs::cli::{
    read_manifest, run_cluster_production, run_damage_energy, run_defects_production,
    run_detect_clusters, run_generate_directions, run_plot_production, run_recoil_spectrum,
    run_zbl_scan, ClusterProductionArgs, DamageEnergyArgs, DefectsProductionArgs,
    DetectClustersArgs, GenerateDirectionsArgs, PlotProductionArgs, RecoilSpectrumArgs,
    ZblScanArgs,
};
use irradiation_rs::config::AnalysisConfig;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const A: f64 = 3.1658;

fn write_dump(path: &Path, sites: &[(f64, f64, f64, i64, usize)]) {
    let mut text = format!(
        "ITEM: TIMESTEP\n0\nITEM: NUMBER OF ATOMS\n{}\nITEM: BOX BOUNDS pp pp pp\n\
         -31.658 31.658\n-31.658 31.658\n-31.658 31.658\n\
         ITEM: ATOMS id type x y z Occupancy Cluster\n",
        sites.len()
    );
    for (i, (x, y, z, occ, cluster)) in sites.iter().enumerate() {
        text.push_str(&format!("{} 1 {} {} {} {} {}\n", i + 1, x, y, z, occ, cluster));
    }
    fs::write(path, text).unwrap();
}

/// Interstitial sites for the given cluster sizes plus one 4-vacancy cluster
fn trial_sites(sizes: &[usize]) -> Vec<(f64, f64, f64, i64, usize)> {
    let mut sites = Vec::new();
    for (id, &size) in sizes.iter().enumerate() {
        for k in 0..size {
            sites.push((id as f64 * A, k as f64 * A, 0.0, 2, id + 1));
        }
    }
    for k in 0..4 {
        sites.push((-A, -(k as f64) * A, -A, 0, 1));
    }
    sites
}

#[test]
fn test_detect_clusters_over_trial_dumps() {
    let dir = tempdir().unwrap();
    write_dump(&dir.path().join("defects_0.dump"), &trial_sites(&[1, 1, 2]));
    write_dump(&dir.path().join("defects_1.dump"), &trial_sites(&[1, 3]));
    write_dump(&dir.path().join("defects_2.dump"), &trial_sites(&[2, 2]));
    // crosses the boundary through the box corner
    let mut escaped = trial_sites(&[5]);
    escaped.push((9.5 * A, 9.5 * A, 9.5 * A, 0, 2));
    write_dump(&dir.path().join("defects_3.dump"), &escaped);

    let args = DetectClustersArgs {
        box_half_length: 10,
        trials: Some(4),
        dir: Some(dir.path().to_path_buf()),
    };
    let summary = run_detect_clusters(&args, &AnalysisConfig::default(), dir.path()).unwrap();
    assert_eq!(summary.trials, 4);
    assert_eq!(summary.effective_trials, 3);
    assert_eq!(summary.excluded_trials, vec![3]);
    assert!(summary.interstitials.entry(5).is_none());

    let itext = fs::read_to_string(dir.path().join("icluster_frequency.txt")).unwrap();
    assert_eq!(
        itext,
        "# Size Number Variance\n1 1.0000 0.6667\n2 1.0000 0.6667\n3 0.3333 0.2222\n"
    );
    let vtext = fs::read_to_string(dir.path().join("vcluster_frequency.txt")).unwrap();
    assert_eq!(vtext, "# Size Number Variance\n4 1.0000 0.0000\n");
}

#[test]
fn test_detect_clusters_missing_trial_fails() {
    let dir = tempdir().unwrap();
    write_dump(&dir.path().join("defects_0.dump"), &trial_sites(&[1]));
    let args = DetectClustersArgs {
        box_half_length: 10,
        trials: Some(2),
        dir: Some(dir.path().to_path_buf()),
    };
    assert!(run_detect_clusters(&args, &AnalysisConfig::default(), dir.path()).is_err());
}

#[test]
fn test_detect_clusters_with_per_kind_columns() {
    let dir = tempdir().unwrap();
    // ID 1 is a 3-vacancy cluster in VCluster and a 2-SIA cluster in ICluster
    let text = "ITEM: TIMESTEP\n0\nITEM: NUMBER OF ATOMS\n6\nITEM: BOX BOUNDS pp pp pp\n\
                -31.658 31.658\n-31.658 31.658\n-31.658 31.658\n\
                ITEM: ATOMS id type x y z Occupancy VCluster ICluster\n\
                1 1 0.0 0.0 0.0 0 1 0\n\
                2 1 1.58 1.58 1.58 0 1 0\n\
                3 1 3.17 0.0 0.0 0 1 0\n\
                4 1 -6.3 0.0 0.0 2 0 1\n\
                5 1 -6.3 3.17 0.0 2 0 1\n\
                6 1 6.3 6.3 6.3 2 0 2\n";
    fs::write(dir.path().join("defects_0.dump"), text).unwrap();

    let mut config = AnalysisConfig::default();
    config.clusters.vacancy_cluster_column = "VCluster".to_string();
    config.clusters.interstitial_cluster_column = "ICluster".to_string();
    let args = DetectClustersArgs {
        box_half_length: 10,
        trials: Some(1),
        dir: Some(dir.path().to_path_buf()),
    };
    let summary = run_detect_clusters(&args, &config, dir.path()).unwrap();
    assert_eq!(summary.effective_trials, 1);
    assert!(summary.excluded_trials.is_empty());
    assert_relative_eq!(summary.vacancies.mean(3), 1.0);
    assert!(summary.vacancies.entry(1).is_none());
    assert_relative_eq!(summary.interstitials.mean(2), 1.0);
    assert_relative_eq!(summary.interstitials.mean(1), 1.0);

    // the shared default column is missing from these dumps
    assert!(run_detect_clusters(&args, &AnalysisConfig::default(), dir.path()).is_err());
}

#[test]
fn test_generate_directions_file() {
    let dir = tempdir().unwrap();
    let args = GenerateDirectionsArgs {
        half_length: 20,
        energy_kev: 10.0,
        count: None,
    };
    let path = run_generate_directions(&args, &AnalysisConfig::default(), dir.path()).unwrap();
    assert_eq!(path, dir.path().join("velocities.txt"));

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 30);
    assert!(text.lines().all(|l| l.starts_with("20 ")));

    // same seed, same file
    let again = tempdir().unwrap();
    let second = run_generate_directions(&args, &AnalysisConfig::default(), again.path()).unwrap();
    assert_eq!(fs::read_to_string(second).unwrap(), text);
}

#[test]
fn test_zbl_scan_file() {
    let dir = tempdir().unwrap();
    let path = run_zbl_scan(&ZblScanArgs { delta: 0.5 }, dir.path()).unwrap();
    let text = fs::read_to_string(path).unwrap();
    assert_eq!(text.lines().count(), 40);
    assert_eq!(text.lines().next(), Some("0.0300 56.1129 0.5000 1.0000"));
}

#[test]
fn test_recoil_spectrum_table() {
    let dir = tempdir().unwrap();
    let log = dir.path().join("COLLISON.txt");
    fs::write(
        &log,
        "-----\nx 1 W 0 0 0 0 150.0\nx 1 W 0 0 0 0 15000.0\n=====\n\
         -----\nx 2 W 0 0 0 0 150.0\nx 2 W 0 0 0 0 150000.0\n=====\n",
    )
    .unwrap();

    let args = RecoilSpectrumArgs {
        collision_log: log,
        output: "W150".to_string(),
    };
    let table = run_recoil_spectrum(&args, &AnalysisConfig::default(), dir.path()).unwrap();
    assert_eq!(table.total, 4);
    assert_eq!(table.bins.len(), 20);
    assert_relative_eq!(table.total_proportion(), 1.0, epsilon = 1e-12);

    let text = fs::read_to_string(dir.path().join("W150.txt")).unwrap();
    assert_eq!(text.lines().count(), 21);
}

#[test]
fn test_manifest_paths_are_relative_to_the_manifest() {
    let dir = tempdir().unwrap();
    let manifest = dir.path().join("runs.txt");
    fs::write(&manifest, "# energy dir\n5 e5\n\n50.0 e50\n").unwrap();

    let rows = read_manifest(&manifest).unwrap();
    assert_eq!(rows.len(), 2);
    assert_relative_eq!(rows[1].0, 50.0);
    assert_eq!(rows[1].1, dir.path().join("e50"));

    fs::write(&manifest, "5\n").unwrap();
    assert!(read_manifest(&manifest).is_err());
}

#[test]
fn test_cluster_production_pipeline() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(
        root.join("spectrum.txt"),
        "Left[keV]  right[keV]  median[keV]  Prop  Variance\n\
         1.0 10.0 3.0 0.4 0.0\n10.0 100.0 30.0 0.6 0.0\n",
    )
    .unwrap();
    for (name, table) in [
        ("e5", "# Size Number Variance\n1 2.0000 0.0000\n"),
        ("e50", "# Size Number Variance\n1 2.0000 0.0000\n2 1.0000 0.0000\n"),
    ] {
        fs::create_dir(root.join(name)).unwrap();
        fs::write(root.join(name).join("icluster_frequency.txt"), table).unwrap();
        fs::write(root.join(name).join("vcluster_frequency.txt"), table).unwrap();
    }
    fs::write(root.join("runs.txt"), "5 e5\n50 e50\n").unwrap();

    let args = ClusterProductionArgs {
        spectrum: root.join("spectrum.txt"),
        manifest: root.join("runs.txt"),
        suffix: "test".to_string(),
    };
    let summary = run_cluster_production(&args, &AnalysisConfig::default(), root).unwrap();
    assert_eq!(summary.point_defects, vec![(5.0, 2.0), (50.0, 4.0)]);
    assert_relative_eq!(summary.interstitials.point_defects, 3.2, epsilon = 1e-12);
    assert_eq!(summary.interstitials, summary.vacancies);

    let text = fs::read_to_string(root.join("icluster_production_test.txt")).unwrap();
    assert_eq!(
        text,
        "Size   Number   Std\n1 0.62500000 0.00000000\n2 0.18750000 0.00000000\n"
    );
    assert!(root.join("vcluster_production_test.txt").exists());

    // rates at the default dose rate
    let scaled = run_defects_production(
        &DefectsProductionArgs {
            file: root.join("icluster_production_test.txt"),
            scaling: Some(100.0),
        },
        &AnalysisConfig::default(),
    )
    .unwrap();
    assert_relative_eq!(scaled.rows[0].1, 62.5, epsilon = 1e-9);
    assert_relative_eq!(scaled.total_point_defects, 100.0, epsilon = 1e-9);

    let damage = run_damage_energy(&DamageEnergyArgs {
        spectrum: root.join("spectrum.txt"),
    })
    .unwrap();
    assert_eq!(damage.len(), 2);
    assert_relative_eq!(damage[0].0, 3.0);
    assert!(damage[1].1 < 30.0);
}

#[test]
fn test_missing_frequency_table_stops_production() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    fs::write(
        root.join("spectrum.txt"),
        "Left[keV]  right[keV]  median[keV]  Prop  Variance\n1.0 10.0 3.0 1.0 0.0\n",
    )
    .unwrap();
    fs::write(root.join("runs.txt"), "5 e5\n").unwrap();
    let args = ClusterProductionArgs {
        spectrum: root.join("spectrum.txt"),
        manifest: root.join("runs.txt"),
        suffix: "x".to_string(),
    };
    assert!(run_cluster_production(&args, &AnalysisConfig::default(), root).is_err());
}

#[test]
fn test_plot_production_needs_readable_tables() {
    let dir = tempdir().unwrap();
    let args = PlotProductionArgs {
        files: vec![dir.path().join("missing.txt")],
    };
    assert!(run_plot_production(&args, dir.path()).is_err());
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{"sampling": {"seed": 7, "count": 5}, "clusters": {"trials": 12}}"#,
    )
    .unwrap();
    let config = AnalysisConfig::from_file(&path).unwrap();
    assert_eq!(config.sampling.seed, 7);
    assert_eq!(config.sampling.count, 5);
    assert_eq!(config.clusters.trials, 12);
    assert_relative_eq!(config.production.scaling_factor, 7.9e8);

    fs::write(&path, r#"{"clusters": {"lattice_parameter": -1.0}}"#).unwrap();
    assert!(AnalysisConfig::from_file(&path).is_err());
}

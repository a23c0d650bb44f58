/*
MIT License

Copyright (c) 2025 Ameyanagi
*/

use approx::assert_relative_eq;
use irradiation_rs::config::ClusterConfig;
use irradiation_rs::defects::{
    cluster_sizes, parse_dump, ClusterFrequencyAggregator, DefectError, DefectKind,
    FrequencyTable, VarianceMode,
};
use tempfile::tempdir;

const A: f64 = 3.1658;

/// Dump text for `(x, y, z, occupancy, cluster)` rows
fn dump_text(sites: &[(f64, f64, f64, i64, usize)]) -> String {
    let mut text = format!(
        "ITEM: TIMESTEP\n0\nITEM: NUMBER OF ATOMS\n{}\nITEM: BOX BOUNDS pp pp pp\n\
         -31.658 31.658\n-31.658 31.658\n-31.658 31.658\n\
         ITEM: ATOMS id type x y z Occupancy Cluster\n",
        sites.len()
    );
    for (i, (x, y, z, occ, cluster)) in sites.iter().enumerate() {
        text.push_str(&format!("{} 1 {} {} {} {} {}\n", i + 1, x, y, z, occ, cluster));
    }
    text
}

fn aggregate(trials: &[&[usize]], mode: VarianceMode) -> FrequencyTable {
    let mut aggregator = ClusterFrequencyAggregator::new(mode);
    for sizes in trials {
        aggregator.add_trial(sizes);
    }
    aggregator.finish().unwrap()
}

#[test]
fn test_three_trial_means_and_variances() {
    let table = aggregate(&[&[1, 1, 2], &[1, 3], &[2, 2]], VarianceMode::PerTrial);

    assert_eq!(table.effective_trials, Some(3));
    assert_eq!(table.entries.len(), 3);
    assert_relative_eq!(table.mean(1), 1.0);
    assert_relative_eq!(table.mean(2), 1.0);
    assert_relative_eq!(table.mean(3), 1.0 / 3.0);
    assert_relative_eq!(table.mean(4), 0.0);

    let var = |s| table.entry(s).and_then(|e| e.variance).unwrap();
    assert_relative_eq!(var(1), 2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(var(2), 2.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(var(3), 2.0 / 9.0, epsilon = 1e-12);
}

#[test]
fn test_variance_of_the_mean_divides_by_trials() {
    let per_trial = aggregate(&[&[1, 1, 2], &[1, 3], &[2, 2]], VarianceMode::PerTrial);
    let of_mean = aggregate(&[&[1, 1, 2], &[1, 3], &[2, 2]], VarianceMode::OfMean);
    for (a, b) in per_trial.entries.iter().zip(&of_mean.entries) {
        assert_relative_eq!(a.mean, b.mean);
        assert_relative_eq!(a.variance.unwrap() / 3.0, b.variance.unwrap(), epsilon = 1e-12);
    }
}

#[test]
fn test_total_point_defects_equals_mean_defects_per_trial() {
    // 4 defects in every trial
    let table = aggregate(&[&[1, 1, 2], &[1, 3], &[2, 2]], VarianceMode::PerTrial);
    assert_relative_eq!(table.total_point_defects(), 4.0, epsilon = 1e-12);
}

#[test]
fn test_excluded_trial_changes_only_the_denominator() {
    let mut aggregator = ClusterFrequencyAggregator::new(VarianceMode::PerTrial);
    aggregator.record(&[1, 1, 2], true);
    aggregator.record(&[5, 5, 5], false);
    aggregator.record(&[1, 3], true);

    assert_eq!(aggregator.effective_trials(), 2);
    assert_eq!(aggregator.skipped_trials(), 1);
    let table = aggregator.finish().unwrap();
    assert_relative_eq!(table.mean(1), 1.5);
    assert_relative_eq!(table.mean(2), 0.5);
    assert_relative_eq!(table.mean(3), 0.5);
    assert!(table.entry(5).is_none());
}

#[test]
fn test_all_trials_excluded() {
    let mut aggregator = ClusterFrequencyAggregator::new(VarianceMode::PerTrial);
    aggregator.record(&[1], false);
    aggregator.record(&[2], false);
    match aggregator.finish() {
        Err(DefectError::NoEffectiveTrials(2)) => {}
        other => panic!("expected NoEffectiveTrials, got {:?}", other),
    }
}

#[test]
fn test_table_survives_a_file_round_trip() {
    let table = aggregate(&[&[1, 1, 2], &[1, 3], &[2, 2]], VarianceMode::PerTrial);
    let dir = tempdir().unwrap();
    let path = dir.path().join("icluster_frequency.txt");
    table.save(&path, true).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "# Size Number Variance\n1 1.0000 0.6667\n2 1.0000 0.6667\n3 0.3333 0.2222\n"
    );

    let back = FrequencyTable::read(&path).unwrap();
    assert_eq!(back.entries.len(), 3);
    for (a, b) in table.entries.iter().zip(&back.entries) {
        assert_eq!(a.size, b.size);
        assert_relative_eq!(a.mean, b.mean, epsilon = 5e-5);
        assert_relative_eq!(a.variance.unwrap(), b.variance.unwrap(), epsilon = 5e-5);
    }
}

#[test]
fn test_legacy_two_column_table() {
    let table = FrequencyTable::parse("1 3.5000\n2 0.2000\n").unwrap();
    assert!(!table.has_variance());
    assert_relative_eq!(table.total_point_defects(), 3.9, epsilon = 1e-12);
}

#[test]
fn test_missing_table_is_an_error() {
    let dir = tempdir().unwrap();
    match FrequencyTable::read(dir.path().join("vcluster_frequency.txt")) {
        Err(DefectError::MissingFile(_)) => {}
        other => panic!("expected MissingFile, got {:?}", other),
    }
}

#[test]
fn test_trial_analysis_from_dump() {
    // three single interstitials, one di-interstitial, a 3-vacancy cluster
    let dump = parse_dump(&dump_text(&[
        (0.0, 0.0, 0.0, 2, 1),
        (A, 0.0, 0.0, 2, 2),
        (0.0, A, 0.0, 2, 3),
        (2.0 * A, 2.0 * A, 0.0, 2, 4),
        (2.5 * A, 2.0 * A, 0.0, 2, 4),
        (-A, 0.0, 0.0, 0, 1),
        (-A, -A, 0.0, 0, 1),
        (-A, -A, -A, 0, 1),
        (0.5 * A, 0.5 * A, 0.5 * A, 1, 0),
    ]))
    .unwrap();

    assert_eq!(dump.count(DefectKind::Interstitial), 5);
    assert_eq!(dump.count(DefectKind::Vacancy), 3);

    let analyzer = ClusterConfig::default().analyzer(10.0);
    let outcome = analyzer.analyze(&dump);
    assert!(outcome.is_effective());

    let mut isizes = outcome.interstitials.cluster_sizes.clone();
    isizes.sort_unstable();
    assert_eq!(isizes, vec![1, 1, 1, 2]);
    assert_eq!(outcome.vacancies.cluster_sizes, vec![3]);
    assert_eq!(outcome.vacancies.site_count, 3);
}

#[test]
fn test_vacancy_in_the_box_corner_excludes_the_trial() {
    let dump = parse_dump(&dump_text(&[
        (0.0, 0.0, 0.0, 2, 1),
        (8.5 * A, 8.5 * A, -8.5 * A, 0, 1),
    ]))
    .unwrap();
    let analyzer = ClusterConfig::default().analyzer(10.0);
    let outcome = analyzer.analyze(&dump);

    assert!(outcome.interstitials.valid);
    // vacancy margin 2: 8.5 > 10 - 2 on all three axes
    assert!(!outcome.vacancies.valid);
    assert!(!outcome.is_effective());
}

#[test]
fn test_cluster_sizes_ignore_unassigned_sites() {
    assert_eq!(cluster_sizes(&[0, 2, 2, 0, 1]), vec![1, 2]);
}
